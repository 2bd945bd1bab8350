//! Flat Module
//!
//! Application-level settings addressed by a single composite key.
//!
//! ## File Format
//! ```text
//! [Dev]IsDevBuild=false
//! [General]Language=en_US
//! [Server]Port=5000
//! ```
//!
//! Bare `[Section]` lines are tolerated and ignored. This store does not
//! preserve comments; files that need that go through
//! [`crate::store::SectionStore`] instead.

pub mod defaults;
mod store;

pub use defaults::DEFAULT_APP_SETTINGS;
pub use store::{composite_key, parse, serialize, split_composite, FlatStore};
