use std::fs;

use shortener_engine::{FileStore, KeyValueStore, MemoryStore, StoreError, STORE_FILENAME};
use tempfile::TempDir;

#[test]
fn memory_store_sets_gets_and_removes() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("token").unwrap(), None);

    store.set("token", "abc").unwrap();
    store.set("username", "alice").unwrap();
    assert_eq!(store.get("token").unwrap().as_deref(), Some("abc"));
    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["token", "username"]);

    store.remove("token").unwrap();
    store.remove("missing").unwrap();
    assert_eq!(store.get("token").unwrap(), None);
}

#[test]
fn file_store_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("data");
    {
        let mut store = FileStore::open(&dir).unwrap();
        store.set("token", "abc").unwrap();
        store.set("shortenedLinks_alice", "[]").unwrap();
        store.remove("token").unwrap();
    }

    let store = FileStore::open(&dir).unwrap();
    assert_eq!(store.get("token").unwrap(), None);
    assert_eq!(
        store.get("shortenedLinks_alice").unwrap().as_deref(),
        Some("[]")
    );
    assert!(store.path().ends_with(STORE_FILENAME));
}

#[test]
fn file_store_opens_empty_when_file_is_missing() {
    let temp = TempDir::new().unwrap();
    let store = FileStore::open(temp.path()).unwrap();
    assert_eq!(store.get("username").unwrap(), None);
    assert!(!temp.path().join(STORE_FILENAME).exists());
}

#[test]
fn file_store_reports_malformed_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(STORE_FILENAME), "{ not ron").unwrap();

    let err = FileStore::open(temp.path()).unwrap_err();
    assert!(matches!(err, StoreError::Malformed { .. }));
}

#[test]
fn failed_write_leaves_previous_value() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("data");
    let mut store = FileStore::open(&dir).unwrap();
    store.set("username", "alice").unwrap();

    // Replace the data directory with a plain file so the next write fails.
    fs::remove_dir_all(&dir).unwrap();
    fs::write(&dir, "x").unwrap();

    assert!(store.set("username", "bob").is_err());
    assert_eq!(store.get("username").unwrap().as_deref(), Some("alice"));
}
