//! Document Module
//!
//! In-memory model of a sectioned `key=value` text file that keeps every
//! line it did not have to touch exactly as it was read.
//!
//! ## Responsibilities
//! - Classify lines without ever rejecting one
//! - Keep a case-insensitive (section, key) → line index
//! - Edit values in place, append new entries at the end of their section
//! - Re-emit untouched lines byte-for-byte
//!
//! ## Line Classes
//! ```text
//! ; comment            → Comment
//! # comment            → Comment
//!                      → Blank
//! [Section]            → Section
//! key = value ; note   → Entry (only after a section header)
//! anything else        → Opaque (kept verbatim)
//! ```

mod line;
mod parser;
mod table;
mod writer;

pub use line::{Entry, Line, SectionHeader};
pub use parser::parse;
pub use table::{Document, Newline, Upsert};
pub use writer::serialize;
