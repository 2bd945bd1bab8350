//! Backing-file I/O shared by both stores
//!
//! Reads distinguish "absent" from "unreadable". Writes go to a sibling
//! temp file that is renamed over the target, so a crash mid-write leaves
//! either the old file or the new one, never a truncated one.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::config::SaveDurability;
use crate::error::{Result, SettingsError};

/// Contents of a backing file as loaded from disk
#[derive(Debug, Clone)]
pub(crate) struct Loaded {
    pub text: String,
    pub checksum: u32,
}

/// Read a backing file
///
/// Returns `Ok(None)` when the file does not exist. Invalid UTF-8 is
/// replaced rather than rejected, matching the "never reject a line" rule.
pub(crate) fn read_optional(path: &Path) -> Result<Option<Loaded>> {
    match fs::read(path) {
        Ok(bytes) => {
            let checksum = crc32fast::hash(&bytes);
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "backing file is not valid UTF-8, replacing invalid bytes");
                    String::from_utf8_lossy(e.as_bytes()).into_owned()
                }
            };
            Ok(Some(Loaded { text, checksum }))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SettingsError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Checksum of the file currently on disk, `None` if absent
pub(crate) fn checksum_on_disk(path: &Path) -> Result<Option<u32>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(crc32fast::hash(&bytes))),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SettingsError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Atomically replace `path` with `text`, returning the new checksum
pub(crate) fn write_atomic(path: &Path, text: &str, durability: SaveDurability) -> Result<u32> {
    let tmp = temp_path(path);

    let result = write_temp(&tmp, text.as_bytes(), durability).and_then(|()| fs::rename(&tmp, path));

    if let Err(source) = result {
        // Best effort: don't leave a stale temp file next to the target
        let _ = fs::remove_file(&tmp);
        return Err(SettingsError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == SaveDurability::Durable {
        sync_parent_dir(path);
    }

    Ok(crc32fast::hash(text.as_bytes()))
}

// =============================================================================
// Private Helpers
// =============================================================================

fn write_temp(tmp: &Path, bytes: &[u8], durability: SaveDurability) -> std::io::Result<()> {
    if let Some(parent) = tmp.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(tmp)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;

    if durability == SaveDurability::Durable {
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
    }

    Ok(())
}

/// "settings.ini" → ".settings.ini.tmp" in the same directory
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "settings".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(unix)]
fn sync_parent_dir(path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
}

#[cfg(not(unix))]
fn sync_parent_dir(_path: &Path) {}
