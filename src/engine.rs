//! Engine Module
//!
//! The settings coordinator that owns every store for the process.
//!
//! ## Responsibilities
//! - Open both stores and load localization at startup
//! - Save and reload everything as one operation
//! - Report whether anything is unsaved
//! - Flush unsaved changes on close

use std::path::Path;

use crate::config::Config;
use crate::error::{Result, SettingsError};
use crate::flat::{FlatStore, DEFAULT_APP_SETTINGS};
use crate::i18n::{CultureId, Localizer};
use crate::store::SectionStore;

/// Settings for one application instance
///
/// Constructed once at startup and handed to every collaborator by
/// reference (typically behind an `Arc`). All methods take `&self`.
///
/// ## Concurrency Model: Single-Writer / Multiple-Reader (SWMR)
///
/// Each store guards its state with its own `RwLock`:
/// - **Reads** (`get_*`, `resolve`) share the lock
/// - **Writes** (`set_*`, `reload`) take it exclusively
/// - **Save** holds an upgradable lock: readers continue, writers wait
pub struct Settings {
    /// Configuration this instance was opened with
    config: Config,

    /// Sectioned, comment-preserving settings
    store: SectionStore,

    /// Flat `[Section]Key` application settings
    app: FlatStore,

    /// Localized display strings
    strings: Localizer,

    /// Cultures found at startup, for request-level negotiation
    cultures: Vec<CultureId>,
}

impl Settings {
    /// Open all settings described by `config`
    ///
    /// On startup:
    /// 1. Validate config and create the data directory
    /// 2. Load the sectioned settings file (empty if absent)
    /// 3. Load the flat app settings (defaults written if absent)
    /// 4. Scan the localization directory
    pub fn open(config: Config) -> Result<Self> {
        // Step 1: Validate and create data directory
        config.validate()?;
        std::fs::create_dir_all(&config.data_dir).map_err(|source| {
            tracing::error!(path = %config.data_dir.display(), op = "open", error = %source, "failed to create data directory");
            SettingsError::Write {
                path: config.data_dir.clone(),
                source,
            }
        })?;

        // Step 2: Sectioned settings
        let store = SectionStore::open(config.settings_path(), config.save_durability)?;

        // Step 3: Flat app settings, seeded from compiled-in defaults
        let app = FlatStore::open(
            config.app_settings_path(),
            DEFAULT_APP_SETTINGS.iter().copied(),
            config.save_durability,
        )?;

        // Step 4: Localization
        let strings = match &config.fallback_culture {
            Some(culture) => Localizer::new().with_fallback(culture.clone()),
            None => Localizer::new(),
        };
        let cultures = strings.load(&config.localization_path())?;

        tracing::info!(
            data_dir = %config.data_dir.display(),
            sections = store.sections().len(),
            cultures = cultures.len(),
            "settings opened"
        );

        Ok(Self {
            config,
            store,
            app,
            strings,
            cultures,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    /// True when either store has changes not yet on disk
    pub fn has_unsaved_changes(&self) -> bool {
        self.store.has_changes() || self.app.has_changes()
    }

    /// Save both stores
    ///
    /// Both saves are attempted; the first failure is returned. A store
    /// that failed keeps its dirty flag.
    pub fn save(&self) -> Result<()> {
        let store_result = self.store.save();
        let app_result = self.app.save();
        store_result.and(app_result)
    }

    /// Re-read both stores and the localization directory from disk
    ///
    /// Unsaved in-memory changes are discarded. All three reloads are
    /// attempted; the first failure is returned and the part that failed
    /// keeps its previous state.
    pub fn reload(&self) -> Result<()> {
        let store_result = self.store.reload();
        let app_result = self.app.reload();
        let strings_result = self.strings.reload().map(|_| ());
        store_result.and(app_result).and(strings_result)
    }

    /// Reload only the stores whose files changed on disk since they were
    /// last loaded or saved. Returns `true` if anything was reloaded.
    pub fn reload_if_stale(&self) -> Result<bool> {
        let mut reloaded = false;

        if self.store.is_stale()? {
            tracing::info!(path = %self.store.path().display(), "settings changed on disk, reloading");
            self.store.reload()?;
            reloaded = true;
        }

        if self.app.is_stale()? {
            tracing::info!(path = %self.app.path().display(), "app settings changed on disk, reloading");
            self.app.reload()?;
            reloaded = true;
        }

        Ok(reloaded)
    }

    /// Close gracefully, flushing unsaved changes
    pub fn close(self) -> Result<()> {
        if self.has_unsaved_changes() {
            self.save()?;
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Sectioned settings store
    pub fn store(&self) -> &SectionStore {
        &self.store
    }

    /// Flat application settings store
    pub fn app(&self) -> &FlatStore {
        &self.app
    }

    /// Localized strings
    pub fn strings(&self) -> &Localizer {
        &self.strings
    }

    /// Cultures found when the localization directory was first scanned
    pub fn cultures(&self) -> &[CultureId] {
        &self.cultures
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
