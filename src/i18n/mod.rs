//! Localization Module
//!
//! Per-culture string dictionaries and the lookup chain across culture
//! variants.
//!
//! ## Lookup Chain
//! ```text
//! request "ja-JP"
//!   ├── ja-JP   (as requested)
//!   ├── ja_JP   (other separator)
//!   ├── ja      (neutral language)
//!   ├── fallback culture, if configured
//!   └── caller default
//! ```
//!
//! Lookups never fail: a missing key yields the default (or the key).

mod culture;
mod dictionary;
mod localizer;

pub use culture::{lookup_chain, CultureId};
pub use dictionary::{Dictionary, Layout};
pub use localizer::Localizer;
