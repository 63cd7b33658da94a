//! Unit tests for settings persistence through the file store.

use macro_rail::config::SettingsRecord;
use macro_rail::store::{FileStore, SettingsStore};

#[test]
fn test_missing_file_loads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("rail.toml"));
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FileStore::new(dir.path().join("rail.toml"));
    let record = SettingsRecord {
        steps_per_mm: 3200,
        stack_delay_ms: 750,
        beep_enabled: false,
        ..SettingsRecord::default()
    };

    store.save(&record).unwrap();
    assert!(store.path().exists());
    assert_eq!(store.load().unwrap(), Some(record));
}

#[test]
fn test_corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rail.toml");
    std::fs::write(&path, "steps_per_mm = [").unwrap();

    let mut store = FileStore::new(path);
    assert!(store.load().is_err());
}
