//! Flat namespace store
//!
//! One `[Section]Name` string per key, persisted as plain `key=value`
//! lines. Saving rewrites the whole file; comments are not kept.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::config::SaveDurability;
use crate::error::Result;
use crate::store::persist;

/// Build a composite key: `("Dev", "IsDevBuild")` → `"[Dev]IsDevBuild"`
pub fn composite_key(section: &str, name: &str) -> String {
    format!("[{}]{}", section, name)
}

/// Split a composite key into section and name
pub fn split_composite(key: &str) -> Option<(&str, &str)> {
    let rest = key.strip_prefix('[')?;
    let close = rest.find(']')?;
    Some((&rest[..close], &rest[close + 1..]))
}

/// Parse flat `key=value` text
///
/// Blank lines, `;`/`#` comments and bare `[Section]` marker lines are
/// skipped. Lines without `=` (or with an empty key) are ignored. A key
/// given twice keeps its last value.
pub fn parse(text: &str) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();

    for line in text.lines() {
        let trimmed = line.trim().trim_start_matches('\u{feff}');

        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
            continue;
        }

        let Some(eq_pos) = trimmed.find('=') else {
            // Bare section marker or junk
            continue;
        };

        let key = trimmed[..eq_pos].trim();
        if key.is_empty() {
            continue;
        }
        values.insert(key.to_string(), trimmed[eq_pos + 1..].trim().to_string());
    }

    values
}

/// Serialize a mapping as `key=value` lines in key order
pub fn serialize(values: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (key, value) in values {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out
}

struct State {
    values: BTreeMap<String, String>,
    dirty: bool,
    checksum: Option<u32>,
}

/// Application settings addressed by composite `[Section]Key` strings
///
/// Same locking discipline as [`crate::store::SectionStore`]: shared reads,
/// exclusive mutation, upgradable lock while saving.
pub struct FlatStore {
    path: PathBuf,
    durability: SaveDurability,
    defaults: BTreeMap<String, String>,
    state: RwLock<State>,
}

impl FlatStore {
    /// Open the store backed by `path`
    ///
    /// File values are layered over `defaults`. When the file does not
    /// exist the defaults are written out; if that write fails the store
    /// still opens with the defaults in memory.
    pub fn open<I, K, V>(path: impl Into<PathBuf>, defaults: I, durability: SaveDurability) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let path = path.into();
        let defaults: BTreeMap<String, String> = defaults
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let state = match Self::load(&path, &defaults)? {
            Some(state) => state,
            None => {
                tracing::info!(path = %path.display(), "app settings not found, writing defaults");
                let text = serialize(&defaults);
                let checksum = match persist::write_atomic(&path, &text, durability) {
                    Ok(checksum) => Some(checksum),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), op = "create", error = %e, "could not write default app settings");
                        None
                    }
                };
                State {
                    values: defaults.clone(),
                    dirty: false,
                    checksum,
                }
            }
        };

        Ok(Self {
            path,
            durability,
            defaults,
            state: RwLock::new(state),
        })
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Stored value, or `default` when absent
    pub fn get(&self, key: &str, default: &str) -> String {
        self.state
            .read()
            .values
            .get(key)
            .map(String::as_str)
            .unwrap_or(default)
            .to_string()
    }

    /// Stored value parsed as `true`/`false`, or `default`
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.state
            .read()
            .values
            .get(key)
            .and_then(|v| crate::store::parse_bool(v))
            .unwrap_or(default)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.read().values.contains_key(key)
    }

    /// Set a value in memory; call [`save`](Self::save) to persist
    ///
    /// Returns `true` if the stored value changed.
    pub fn set(&self, key: &str, value: &str) -> bool {
        let mut state = self.state.write();
        if state.values.get(key).map(String::as_str) == Some(value) {
            return false;
        }
        state.values.insert(key.to_string(), value.to_string());
        state.dirty = true;
        true
    }

    /// Remove a key; returns `true` if it was present
    pub fn remove(&self, key: &str) -> bool {
        let mut state = self.state.write();
        let removed = state.values.remove(key).is_some();
        if removed {
            state.dirty = true;
        }
        removed
    }

    /// All keys under a `[Section]` prefix, keyed by the remainder
    ///
    /// `prefix` may be given as `"Dev"` or `"[Dev]"`.
    pub fn get_section(&self, prefix: &str) -> BTreeMap<String, String> {
        let prefix = normalize_prefix(prefix);
        self.state
            .read()
            .values
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .map(|(k, v)| (k[prefix.len()..].to_string(), v.clone()))
            .collect()
    }

    /// Ordered copy of every stored pair
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.state.read().values.clone()
    }

    /// Compiled-in defaults this store was opened with
    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    pub fn has_changes(&self) -> bool {
        self.state.read().dirty
    }

    /// Overwrite the backing file with the current mapping if it changed
    pub fn save(&self) -> Result<()> {
        let state = self.state.upgradable_read();
        if !state.dirty {
            return Ok(());
        }

        let text = serialize(&state.values);
        match persist::write_atomic(&self.path, &text, self.durability) {
            Ok(checksum) => {
                let mut state = RwLockUpgradableReadGuard::upgrade(state);
                state.dirty = false;
                state.checksum = Some(checksum);
                tracing::debug!(path = %self.path.display(), keys = state.values.len(), "app settings saved");
                Ok(())
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), op = "save", error = %e, "failed to save app settings");
                Err(e)
            }
        }
    }

    /// Replace the mapping with what is on disk, dropping unsaved changes
    pub fn reload(&self) -> Result<()> {
        let mut state = self.state.write();
        match Self::load(&self.path, &self.defaults) {
            Ok(fresh) => {
                *state = fresh.unwrap_or_else(|| State {
                    values: self.defaults.clone(),
                    dirty: false,
                    checksum: None,
                });
                Ok(())
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), op = "reload", error = %e, "failed to reload app settings");
                Err(e)
            }
        }
    }

    /// True when the file on disk differs from what was last loaded or saved
    pub fn is_stale(&self) -> Result<bool> {
        let on_disk = persist::checksum_on_disk(&self.path)?;
        Ok(on_disk != self.state.read().checksum)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// `Ok(None)` when the file is absent
    fn load(path: &Path, defaults: &BTreeMap<String, String>) -> Result<Option<State>> {
        let Some(loaded) = persist::read_optional(path)? else {
            return Ok(None);
        };

        let mut values = defaults.clone();
        values.extend(parse(&loaded.text));
        tracing::debug!(path = %path.display(), keys = values.len(), "app settings loaded");

        Ok(Some(State {
            values,
            dirty: false,
            checksum: Some(loaded.checksum),
        }))
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let inner = prefix.trim().trim_start_matches('[').trim_end_matches(']');
    format!("[{}]", inner)
}
