//! Error types for settingskv
//!
//! Only the I/O boundary can fail. Absent keys, malformed lines and
//! unparsable values all resolve to caller-supplied defaults instead.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using SettingsError
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Unified error type for settingskv operations
#[derive(Debug, Error)]
pub enum SettingsError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backing file exists but could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Backing file could not be written or replaced
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Localization Errors
    // -------------------------------------------------------------------------
    #[error("Localization error: {0}")]
    Localization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SettingsError {
    /// Path of the file involved, when the error is tied to one
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            SettingsError::Read { path, .. } | SettingsError::Write { path, .. } => Some(path),
            _ => None,
        }
    }
}
