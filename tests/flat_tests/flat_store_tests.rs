//! Tests for FlatStore
//!
//! These tests verify:
//! - Compiled-in defaults when the file is absent
//! - File values layered over defaults
//! - In-memory set, explicit save, reload
//! - Section prefix queries and snapshots

use std::fs;
use std::path::PathBuf;

use settingskv::flat::DEFAULT_APP_SETTINGS;
use settingskv::{FlatStore, SaveDurability, SettingsError};
use tempfile::TempDir;

const DEFAULTS: &[(&str, &str)] = &[
    ("[Dev]IsDevBuild", "false"),
    ("[Dev]Verbose", "false"),
    ("[Server]Port", "5000"),
];

// =============================================================================
// Helper Functions
// =============================================================================

fn app_path(temp: &TempDir) -> PathBuf {
    temp.path().join("app.cfg")
}

fn open_store(temp: &TempDir) -> FlatStore {
    FlatStore::open(app_path(temp), DEFAULTS.iter().copied(), SaveDurability::BestEffort).unwrap()
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_missing_file_uses_and_writes_defaults() {
    let temp = TempDir::new().unwrap();

    let store = open_store(&temp);

    assert_eq!(store.get("[Dev]IsDevBuild", "true"), "false");
    assert_eq!(store.get("[Server]Port", ""), "5000");
    assert!(!store.has_changes());
    assert_eq!(
        fs::read_to_string(app_path(&temp)).unwrap(),
        "[Dev]IsDevBuild=false\n[Dev]Verbose=false\n[Server]Port=5000\n"
    );
}

#[test]
fn test_open_layers_file_over_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(app_path(&temp), "[Dev]\n[Dev]IsDevBuild=true\n[Extra]Name=x\n").unwrap();

    let store = open_store(&temp);

    assert_eq!(store.get("[Dev]IsDevBuild", ""), "true");
    assert_eq!(store.get("[Dev]Verbose", ""), "false");
    assert_eq!(store.get("[Extra]Name", ""), "x");
}

#[test]
fn test_open_unwritable_location_still_opens() {
    let temp = TempDir::new().unwrap();
    // A directory where the save temp file would go
    fs::create_dir(temp.path().join(".app.cfg.tmp")).unwrap();

    let store = open_store(&temp);

    assert_eq!(store.get("[Server]Port", ""), "5000");
    assert!(!app_path(&temp).exists());
}

#[test]
fn test_open_unreadable_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(app_path(&temp)).unwrap();

    let result = FlatStore::open(app_path(&temp), DEFAULTS.iter().copied(), SaveDurability::BestEffort);

    assert!(matches!(result, Err(SettingsError::Read { .. })));
}

#[test]
fn test_builtin_defaults_include_dev_flag() {
    let temp = TempDir::new().unwrap();

    let store = FlatStore::open(
        app_path(&temp),
        DEFAULT_APP_SETTINGS.iter().copied(),
        SaveDurability::BestEffort,
    )
    .unwrap();

    assert!(!store.get_bool("[Dev]IsDevBuild", true));
    assert_eq!(store.defaults().len(), DEFAULT_APP_SETTINGS.len());
}

// =============================================================================
// Get/Set Tests
// =============================================================================

#[test]
fn test_get_missing_returns_default() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);

    assert_eq!(store.get("[Nope]Key", "fallback"), "fallback");
    assert!(!store.contains("[Nope]Key"));
    assert!(!store.has_changes());
}

#[test]
fn test_set_is_in_memory_until_save() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);

    assert!(store.set("[Server]Port", "8080"));
    assert_eq!(store.get("[Server]Port", ""), "8080");
    assert!(store.has_changes());
    assert!(fs::read_to_string(app_path(&temp)).unwrap().contains("[Server]Port=5000"));

    store.save().unwrap();
    assert!(!store.has_changes());
    assert!(fs::read_to_string(app_path(&temp)).unwrap().contains("[Server]Port=8080"));
}

#[test]
fn test_set_same_value_is_not_a_change() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);

    assert!(!store.set("[Server]Port", "5000"));
    assert!(!store.has_changes());
}

#[test]
fn test_last_write_wins() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);

    store.set("[A]k", "1");
    store.set("[A]k", "2");

    assert_eq!(store.get("[A]k", ""), "2");
}

#[test]
fn test_remove() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);

    assert!(store.remove("[Dev]Verbose"));
    assert!(!store.remove("[Dev]Verbose"));
    store.save().unwrap();

    assert!(!fs::read_to_string(app_path(&temp)).unwrap().contains("Verbose"));
}

// =============================================================================
// Section Prefix Tests
// =============================================================================

#[test]
fn test_get_section_by_prefix() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);
    store.set("[Devices]Mouse", "on");

    let dev = store.get_section("Dev");
    assert_eq!(dev.len(), 2);
    assert_eq!(dev.get("IsDevBuild").map(String::as_str), Some("false"));
    assert_eq!(dev.get("Verbose").map(String::as_str), Some("false"));

    assert_eq!(store.get_section("[Dev]"), dev);
    assert_eq!(store.get_section("Devices").len(), 1);
    assert!(store.get_section("Missing").is_empty());
}

#[test]
fn test_snapshot_is_a_copy() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);

    let snapshot = store.snapshot();
    store.set("[Server]Port", "1");

    assert_eq!(snapshot.get("[Server]Port").map(String::as_str), Some("5000"));
    assert_eq!(snapshot.len(), 3);
}

// =============================================================================
// Reload Tests
// =============================================================================

#[test]
fn test_reload_discards_unsaved_state() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);

    store.set("[Server]Port", "9999");
    store.reload().unwrap();

    assert_eq!(store.get("[Server]Port", ""), "5000");
    assert!(!store.has_changes());
}

#[test]
fn test_reload_after_external_edit() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);

    fs::write(app_path(&temp), "[Dev]IsDevBuild=true\n").unwrap();
    assert!(store.is_stale().unwrap());

    store.reload().unwrap();
    assert!(store.get_bool("[Dev]IsDevBuild", false));
    // Keys missing from the file fall back to defaults
    assert_eq!(store.get("[Server]Port", ""), "5000");
    assert!(!store.is_stale().unwrap());
}

#[test]
fn test_reload_when_file_deleted_restores_defaults() {
    let temp = TempDir::new().unwrap();
    let store = open_store(&temp);
    store.set("[Server]Port", "1");
    store.save().unwrap();

    fs::remove_file(app_path(&temp)).unwrap();
    store.reload().unwrap();

    assert_eq!(store.get("[Server]Port", ""), "5000");
}

#[test]
fn test_save_and_reopen() {
    let temp = TempDir::new().unwrap();
    {
        let store = open_store(&temp);
        store.set("[Game]Executable", "game.exe");
        store.save().unwrap();
    }

    let store = open_store(&temp);
    assert_eq!(store.get("[Game]Executable", ""), "game.exe");
}
