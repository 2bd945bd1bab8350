//! Store Module
//!
//! Section-keyed settings store over the document model, plus the
//! backing-file I/O both stores share.
//!
//! ## Responsibilities
//! - Typed get/set with caller defaults (reads never fail)
//! - Dirty tracking with value-level idempotence
//! - Atomic save (temp file + rename), reload, stale detection
//!
//! ## Lifecycle
//! ```text
//! open ──► get/set ... ──► save ──► get/set ... ──► save
//!   ▲                                         │
//!   └──────────────── reload ◄────────────────┘
//! ```

pub(crate) mod persist;
mod sectioned;

pub use sectioned::{parse_bool, SectionStore};
