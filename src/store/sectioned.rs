//! Section-keyed store
//!
//! Typed, defaulting accessors over a [`Document`] with change tracking
//! and atomic save.

use std::path::{Path, PathBuf};

use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::config::SaveDurability;
use crate::document::{self, Document, Upsert};
use crate::error::Result;

use super::persist;

/// Mutable state guarded by the store lock
struct State {
    doc: Document,
    dirty: bool,
    /// (section, key) pairs changed since load, first spelling wins
    modified: Vec<(String, String)>,
    /// CRC32 of the bytes last read from or written to disk
    checksum: Option<u32>,
}

impl State {
    fn loaded(doc: Document, checksum: Option<u32>) -> Self {
        Self {
            doc,
            dirty: false,
            modified: Vec::new(),
            checksum,
        }
    }

    fn record_modified(&mut self, section: &str, key: &str) {
        let seen = self
            .modified
            .iter()
            .any(|(s, k)| s.eq_ignore_ascii_case(section) && k.eq_ignore_ascii_case(key));
        if !seen {
            self.modified.push((section.to_string(), key.to_string()));
        }
    }
}

/// Comment-preserving `[Section]` / `key=value` settings store
///
/// ## Concurrency:
/// - Reads take a shared lock and may run alongside each other
/// - `set_*`/`remove`/`reload` take the exclusive lock, so a reader sees
///   a line list either fully before or fully after a change
/// - `save` holds an upgradable lock while writing: readers continue,
///   other writers wait until the dirty flag has been cleared
pub struct SectionStore {
    path: PathBuf,
    durability: SaveDurability,
    state: RwLock<State>,
}

impl SectionStore {
    /// Open the store backed by `path`
    ///
    /// A missing file yields an empty store (the file is created on first
    /// save). A file that exists but cannot be read is an error.
    pub fn open(path: impl Into<PathBuf>, durability: SaveDurability) -> Result<Self> {
        let path = path.into();
        let state = Self::load(&path)?;

        Ok(Self {
            path,
            durability,
            state: RwLock::new(state),
        })
    }

    // =========================================================================
    // Typed Reads
    // =========================================================================

    /// Stored value, or `default` when absent
    pub fn get_string(&self, section: &str, key: &str, default: &str) -> String {
        self.state
            .read()
            .doc
            .get(section, key)
            .unwrap_or(default)
            .to_string()
    }

    /// Stored value parsed as `true`/`false` (any case), or `default`
    pub fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.read_with(section, key, parse_bool).unwrap_or(default)
    }

    /// Stored value parsed as a decimal integer, or `default`
    pub fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.read_with(section, key, |v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    pub fn contains(&self, section: &str, key: &str) -> bool {
        self.state.read().doc.find_entry(section, key).is_some()
    }

    // =========================================================================
    // Typed Writes
    // =========================================================================

    /// Store a string value
    ///
    /// Returns `true` if the stored text changed. Writing the value already
    /// stored leaves the store clean. A write that could not be read back
    /// from disk unchanged (line breaks, a value containing ` ;`, a key
    /// containing `=`) is refused and logged; the store is left as it was.
    pub fn set_string(&self, section: &str, key: &str, value: &str) -> bool {
        let mut state = self.state.write();
        let outcome = state.doc.upsert_entry(section, key, value);
        if outcome == Upsert::Rejected {
            tracing::warn!(path = %self.path.display(), section, key, "refused setting that would not survive a save");
        }
        if outcome.changed() {
            state.dirty = true;
            state.record_modified(section, key);
            tracing::trace!(section, key, ?outcome, "setting changed");
        }
        outcome.changed()
    }

    /// Store a boolean as `true`/`false`
    pub fn set_bool(&self, section: &str, key: &str, value: bool) -> bool {
        self.set_string(section, key, if value { "true" } else { "false" })
    }

    /// Store an integer in decimal form
    pub fn set_int(&self, section: &str, key: &str, value: i64) -> bool {
        self.set_string(section, key, &value.to_string())
    }

    /// Remove an entry; returns `true` if one was removed
    pub fn remove(&self, section: &str, key: &str) -> bool {
        let mut state = self.state.write();
        let removed = state.doc.remove_entry(section, key).is_some();
        if removed {
            state.dirty = true;
            state.record_modified(section, key);
        }
        removed
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// True when in-memory changes have not been saved
    pub fn has_changes(&self) -> bool {
        self.state.read().dirty
    }

    /// Write the document back to disk if it has changes
    ///
    /// On failure the dirty flag stays set so the caller can retry.
    pub fn save(&self) -> Result<()> {
        let state = self.state.upgradable_read();
        if !state.dirty {
            return Ok(());
        }

        let text = document::serialize(&state.doc);
        match persist::write_atomic(&self.path, &text, self.durability) {
            Ok(checksum) => {
                let mut state = RwLockUpgradableReadGuard::upgrade(state);
                state.dirty = false;
                state.checksum = Some(checksum);
                tracing::debug!(path = %self.path.display(), lines = state.doc.line_count(), "settings saved");
                Ok(())
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), op = "save", error = %e, "failed to save settings");
                Err(e)
            }
        }
    }

    /// Discard in-memory state and re-read the backing file
    ///
    /// On failure the current state is kept.
    pub fn reload(&self) -> Result<()> {
        let mut state = self.state.write();
        match Self::load(&self.path) {
            Ok(fresh) => {
                if state.dirty {
                    tracing::warn!(path = %self.path.display(), discarded = state.modified.len(), "reload discarded unsaved settings");
                }
                *state = fresh;
                Ok(())
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), op = "reload", error = %e, "failed to reload settings");
                Err(e)
            }
        }
    }

    /// True when the file on disk differs from what was last loaded or saved
    pub fn is_stale(&self) -> Result<bool> {
        let on_disk = persist::checksum_on_disk(&self.path)?;
        Ok(on_disk != self.state.read().checksum)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// (section, key) pairs changed since the last load, in change order
    pub fn modified_keys(&self) -> Vec<(String, String)> {
        self.state.read().modified.clone()
    }

    /// Section names in file order
    pub fn sections(&self) -> Vec<String> {
        self.state.read().doc.sections()
    }

    /// `(key, value)` pairs of one section in file order
    pub fn section_entries(&self, section: &str) -> Vec<(String, String)> {
        self.state.read().doc.entries(section)
    }

    /// Text a save would write right now
    pub fn snapshot_text(&self) -> String {
        document::serialize(&self.state.read().doc)
    }

    pub fn line_count(&self) -> usize {
        self.state.read().doc.line_count()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn read_with<T>(&self, section: &str, key: &str, parse: impl FnOnce(&str) -> Option<T>) -> Option<T> {
        let state = self.state.read();
        state.doc.get(section, key).and_then(parse)
    }

    fn load(path: &Path) -> Result<State> {
        match persist::read_optional(path)? {
            Some(loaded) => {
                let doc = document::parse(&loaded.text);
                tracing::debug!(path = %path.display(), lines = doc.line_count(), "settings loaded");
                Ok(State::loaded(doc, Some(loaded.checksum)))
            }
            None => {
                tracing::info!(path = %path.display(), "settings file not found, starting empty");
                Ok(State::loaded(Document::new(), None))
            }
        }
    }
}

/// `true`/`false` in any letter case, surrounding whitespace ignored
pub fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
