//! # settingskv
//!
//! Settings core for a local mod manager front-end:
//! - Comment-preserving sectioned settings (`[Section]` / `key=value`)
//! - Flat application settings addressed as `[Section]Key`
//! - Localized strings with a culture fallback chain
//! - Atomic saves, explicit reload, unsaved-change tracking
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Page / request handlers                      │
//! │                (many concurrent readers)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                Settings (engine.rs)                          │
//! │          open · save · reload · has_unsaved_changes          │
//! └──────┬──────────────────────┬───────────────────────┬───────┘
//!        │                      │                       │
//!        ▼                      ▼                       ▼
//! ┌─────────────┐        ┌─────────────┐         ┌─────────────┐
//! │SectionStore │        │  FlatStore  │         │  Localizer  │
//! │  (RwLock)   │        │  (RwLock)   │         │  (RwLock)   │
//! └──────┬──────┘        └──────┬──────┘         └──────┬──────┘
//!        │                      │                       │
//!        ▼                      ▼                       ▼
//! ┌─────────────┐        ┌─────────────┐         ┌─────────────┐
//! │  Document   │        │ key=value   │         │ Dictionary  │
//! │ (line table)│        │   lines     │         │ per culture │
//! └─────────────┘        └─────────────┘         └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod document;
pub mod store;
pub mod flat;
pub mod i18n;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SettingsError};
pub use config::{Config, SaveDurability};
pub use document::Document;
pub use engine::Settings;
pub use flat::FlatStore;
pub use i18n::{CultureId, Localizer};
pub use store::SectionStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of settingskv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
