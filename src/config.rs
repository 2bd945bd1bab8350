//! Configuration for settingskv
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, SettingsError};

/// Main configuration for a settings instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // File Layout
    // -------------------------------------------------------------------------
    /// Root directory for all settings files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── settings.ini     (sectioned, comment-preserving)
    ///     ├── app.cfg          (flat `[Section]Key=value` lines)
    ///     └── lang/            (one file per culture)
    pub data_dir: PathBuf,

    /// File name of the sectioned settings file
    pub settings_file: String,

    /// File name of the flat application settings file
    pub app_settings_file: String,

    /// Localization directory. Relative paths are resolved against `data_dir`.
    pub localization_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------
    /// How hard a save tries to reach stable storage
    pub save_durability: SaveDurability,

    // -------------------------------------------------------------------------
    // Localization
    // -------------------------------------------------------------------------
    /// Culture tried after the requested culture's chain is exhausted
    pub fallback_culture: Option<String>,
}

/// Save durability strategy
///
/// Both strategies replace the file by renaming a temp file over it, so a
/// crash never exposes a half-written file. Only `Durable` guarantees the
/// renamed file has its contents after a power loss; without the fsync
/// some filesystems can surface an empty file there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveDurability {
    /// Write a temp file and rename it into place, no fsync
    BestEffort,

    /// Also fsync the temp file and its directory around the rename
    #[default]
    Durable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./settings_data"),
            settings_file: "settings.ini".to_string(),
            app_settings_file: "app.cfg".to_string(),
            localization_dir: PathBuf::from("lang"),
            save_durability: SaveDurability::Durable,
            fallback_culture: None,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the sectioned settings file
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(&self.settings_file)
    }

    /// Full path of the flat application settings file
    pub fn app_settings_path(&self) -> PathBuf {
        self.data_dir.join(&self.app_settings_file)
    }

    /// Full path of the localization directory
    pub fn localization_path(&self) -> PathBuf {
        if self.localization_dir.is_absolute() {
            self.localization_dir.clone()
        } else {
            self.data_dir.join(&self.localization_dir)
        }
    }

    /// Reject configurations that cannot name a backing file
    pub fn validate(&self) -> Result<()> {
        if self.settings_file.trim().is_empty() {
            return Err(SettingsError::Config("settings_file is empty".to_string()));
        }
        if self.app_settings_file.trim().is_empty() {
            return Err(SettingsError::Config("app_settings_file is empty".to_string()));
        }
        if self.settings_file == self.app_settings_file {
            return Err(SettingsError::Config(format!(
                "settings_file and app_settings_file both point at '{}'",
                self.settings_file
            )));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all settings files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the sectioned settings file name
    pub fn settings_file(mut self, name: impl Into<String>) -> Self {
        self.config.settings_file = name.into();
        self
    }

    /// Set the flat application settings file name
    pub fn app_settings_file(mut self, name: impl Into<String>) -> Self {
        self.config.app_settings_file = name.into();
        self
    }

    /// Set the localization directory
    pub fn localization_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.localization_dir = path.into();
        self
    }

    /// Set the save durability strategy
    pub fn save_durability(mut self, durability: SaveDurability) -> Self {
        self.config.save_durability = durability;
        self
    }

    /// Set the culture used when the requested one has no match
    pub fn fallback_culture(mut self, culture: impl Into<String>) -> Self {
        self.config.fallback_culture = Some(culture.into());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
