//! Localizer
//!
//! Loads every culture file in a directory and resolves keys through the
//! culture fallback chain.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::{Result, SettingsError};

use super::culture::{lookup_chain, CultureId};
use super::dictionary::{Dictionary, Layout};

/// File extensions recognized as culture files
const EXTENSIONS: &[&str] = &["ini", "lang", "txt"];

/// Everything loaded from one directory scan
#[derive(Default)]
struct Catalog {
    /// Directory of the last successful load
    dir: Option<PathBuf>,
    /// lower-cased file stem (`en_us`, `en-us`, `ja`) → dictionary
    dictionaries: HashMap<String, Dictionary>,
    /// Normalized cultures, sorted and deduplicated
    cultures: Vec<CultureId>,
}

/// Culture-aware string lookup
///
/// ## Concurrency:
/// Lookups take a shared lock. `load`/`reload` build the new catalog
/// without holding the lock and swap it in under the exclusive lock, so a
/// lookup sees either the old catalog or the new one.
pub struct Localizer {
    catalog: RwLock<Catalog>,
    fallback: Option<String>,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Localizer {
    /// Create an empty localizer; every lookup returns its default
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog::default()),
            fallback: None,
        }
    }

    /// Culture consulted after the requested culture's chain
    pub fn with_fallback(mut self, culture: impl Into<String>) -> Self {
        self.fallback = Some(culture.into());
        self
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load all culture files in `dir`, replacing anything loaded before
    ///
    /// A missing directory loads nothing. Files whose stem is not a culture
    /// tag are skipped. When a culture has both flat and sectioned files,
    /// sectioned entries win on conflicting keys.
    pub fn load(&self, dir: &Path) -> Result<Vec<CultureId>> {
        let catalog = Self::scan(dir)?;
        let cultures = catalog.cultures.clone();

        tracing::info!(
            dir = %dir.display(),
            cultures = cultures.len(),
            "localization loaded"
        );

        *self.catalog.write() = catalog;
        Ok(cultures)
    }

    /// Re-scan the directory of the last load
    pub fn reload(&self) -> Result<Vec<CultureId>> {
        let dir = self.catalog.read().dir.clone();
        match dir {
            Some(dir) => self.load(&dir).map_err(|e| {
                tracing::error!(path = %dir.display(), op = "reload", error = %e, "failed to reload localization");
                e
            }),
            None => Err(SettingsError::Localization(
                "reload requested before any directory was loaded".to_string(),
            )),
        }
    }

    /// Register a dictionary directly under `culture`
    ///
    /// The name is used verbatim (lower-cased) as a dictionary name, so
    /// `en_US` and `en-US` stay distinct, as they would on disk.
    pub fn insert(&self, culture: &str, dictionary: Dictionary) {
        let mut catalog = self.catalog.write();
        catalog
            .dictionaries
            .entry(culture.trim().to_lowercase())
            .or_default()
            .merge(dictionary);
        if let Some(id) = CultureId::parse(culture) {
            if let Err(pos) = catalog.cultures.binary_search(&id) {
                catalog.cultures.insert(pos, id);
            }
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Resolve `key` for `culture`, or return `default`
    ///
    /// Chain, first dictionary holding the key wins:
    /// 1. the culture as requested
    /// 2. its hyphenated form
    /// 3. its underscore form
    /// 4. its neutral language prefix
    /// 5. the configured fallback culture (same chain), if any
    /// 6. `default`
    pub fn resolve(&self, key: &str, culture: &str, default: &str) -> String {
        self.lookup(key, culture)
            .unwrap_or_else(|| default.to_string())
    }

    /// Resolve `key`, falling back to the key itself
    pub fn text(&self, key: &str, culture: &str) -> String {
        self.resolve(key, culture, key)
    }

    /// Resolve without a default
    pub fn lookup(&self, key: &str, culture: &str) -> Option<String> {
        let catalog = self.catalog.read();

        let mut chain = lookup_chain(culture);
        if let Some(fallback) = &self.fallback {
            chain.extend(lookup_chain(fallback));
        }

        chain
            .iter()
            .filter_map(|name| catalog.dictionaries.get(name))
            .find_map(|dict| dict.get(key))
            .map(str::to_string)
    }

    /// Cultures with a loaded dictionary, sorted
    pub fn available_cultures(&self) -> Vec<CultureId> {
        self.catalog.read().cultures.clone()
    }

    /// True if some dictionary on `culture`'s chain is loaded
    pub fn supports(&self, culture: &str) -> bool {
        let catalog = self.catalog.read();
        lookup_chain(culture)
            .iter()
            .any(|name| catalog.dictionaries.contains_key(name))
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn scan(dir: &Path) -> Result<Catalog> {
        if dir.is_file() {
            return Err(SettingsError::Localization(format!(
                "{} is a file, not a directory",
                dir.display()
            )));
        }

        let read_dir = match fs::read_dir(dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(dir = %dir.display(), "localization directory not found");
                return Ok(Catalog {
                    dir: Some(dir.to_path_buf()),
                    ..Catalog::default()
                });
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: dir.to_path_buf(),
                    source,
                })
            }
        };

        // stem → files, sorted by path for a stable merge order
        let mut files: BTreeMap<String, Vec<PathBuf>> = BTreeMap::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| SettingsError::Read {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() || !has_culture_extension(&path) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if CultureId::parse(stem).is_none() {
                tracing::debug!(path = %path.display(), "skipping non-culture file");
                continue;
            }
            files.entry(stem.to_lowercase()).or_default().push(path);
        }

        let mut catalog = Catalog {
            dir: Some(dir.to_path_buf()),
            ..Catalog::default()
        };

        for (stem, mut paths) in files {
            paths.sort();
            let mut flat = Dictionary::new();
            let mut sectioned = Dictionary::new();

            for path in &paths {
                let bytes = fs::read(path).map_err(|source| SettingsError::Read {
                    path: path.clone(),
                    source,
                })?;
                let (dict, layout) = Dictionary::parse(&String::from_utf8_lossy(&bytes));
                tracing::debug!(path = %path.display(), ?layout, entries = dict.len(), "culture file parsed");
                match layout {
                    Layout::Flat => flat.merge(dict),
                    Layout::Sectioned => sectioned.merge(dict),
                }
            }

            flat.merge(sectioned);
            if let Some(id) = CultureId::parse(&stem) {
                catalog.cultures.push(id);
            }
            catalog.dictionaries.insert(stem, flat);
        }

        catalog.cultures.sort();
        catalog.cultures.dedup();
        Ok(catalog)
    }
}

fn has_culture_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
}
