//! Tests for memo table persistence.

use std::sync::OnceLock;
use strictly_minimax::{Engine, MemoStore, MemoTable, Position, REACHABLE_POSITIONS};
use tempfile::TempDir;

fn solved() -> &'static MemoTable {
    static TABLE: OnceLock<MemoTable> = OnceLock::new();
    TABLE.get_or_init(MemoTable::build)
}

/// Creates a scratch directory and a store inside it. The directory must
/// stay in scope to keep the file alive.
fn setup_store() -> (TempDir, MemoStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = MemoStore::new(dir.path().join("tictactoe_cache.json"));
    (dir, store)
}

#[test]
fn test_missing_file_loads_empty() {
    let (_dir, store) = setup_store();
    let table = store.load().expect("missing file is not an error");
    assert!(table.is_empty());
}

#[test]
fn test_save_then_load_restores_table() {
    let (_dir, store) = setup_store();
    store.save(solved()).expect("Save failed");
    let loaded = store.load().expect("Load failed");
    assert_eq!(&loaded, solved());
    assert!(loaded.is_complete());
}

#[test]
fn test_saves_are_byte_identical() {
    let (dir, store) = setup_store();
    let other = MemoStore::new(dir.path().join("again.json"));

    store.save(solved()).expect("Save failed");
    other.save(&MemoTable::build()).expect("Save failed");

    let first = std::fs::read(store.path()).expect("Read failed");
    let second = std::fs::read(other.path()).expect("Read failed");
    assert_eq!(first, second);
}

#[test]
fn test_file_keys_are_literal_boards() {
    let (_dir, store) = setup_store();
    store.save(solved()).expect("Save failed");

    let text = std::fs::read_to_string(store.path()).expect("Read failed");
    let json: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    let map = json.as_object().expect("top level is an object");

    assert_eq!(map.len(), solved().len());
    assert_eq!(map["         "], serde_json::json!([0, 0]));
    assert_eq!(map["XXXOO    "], serde_json::json!([-1000, -1]));
    assert!(map.keys().all(|k| {
        k.chars().count() == 9 && k.chars().all(|c| matches!(c, ' ' | 'X' | 'O'))
    }));
}

#[test]
fn test_corrupt_file_fails_load_but_recovers() {
    let (_dir, store) = setup_store();
    std::fs::write(store.path(), "{ not json").expect("Write failed");

    let err = store.load().expect_err("corrupt file should not parse");
    assert!(err.message.contains("Malformed"));
    assert!(store.load_or_default().is_empty());
}

#[test]
fn test_bad_move_index_is_rejected() {
    let (_dir, store) = setup_store();
    std::fs::write(store.path(), r#"{"         ": [0, 12]}"#).expect("Write failed");
    assert!(store.load().is_err());
}

#[test]
fn test_impossible_board_is_rejected() {
    let (_dir, store) = setup_store();
    std::fs::write(store.path(), r#"{"OO       ": [0, -1]}"#).expect("Write failed");
    let err = store.load().expect_err("two O marks before any X");
    assert!(err.message.contains("Unreachable"));
}

#[test]
fn test_engine_open_builds_and_saves_when_missing() {
    let (_dir, store) = setup_store();
    assert!(!store.path().exists());

    let engine = Engine::open(&store).expect("Open failed");
    assert!(engine.table().is_complete());
    assert!(store.path().exists());
    assert_eq!(&store.load().expect("Load failed"), engine.table());
}

#[test]
fn test_engine_open_rebuilds_corrupt_file() {
    let (_dir, store) = setup_store();
    std::fs::write(store.path(), "garbage").expect("Write failed");

    let engine = Engine::open(&store).expect("Open failed");
    assert_eq!(engine.value(&Position::new()), Some(0));
    assert!(store.load().expect("file rewritten").is_complete());
}

#[test]
fn test_engine_open_rebuilds_partial_table() {
    let (_dir, store) = setup_store();
    let mut partial = MemoTable::new();
    partial.enumerate(&Position::new(), 2);
    store.save(&partial).expect("Save failed");

    let engine = Engine::open(&store).expect("Open failed");
    assert!(engine.table().is_complete());
}

#[test]
fn test_swapped_board_makes_loaded_table_incomplete() {
    let (_dir, store) = setup_store();
    store.save(solved()).expect("Save failed");

    // Trade a reachable board for one with legal counts that play never reaches.
    let text = std::fs::read_to_string(store.path()).expect("Read failed");
    let mut json: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    let map = json.as_object_mut().expect("top level is an object");
    assert!(map.remove("X        ").is_some());
    map.insert("XXXOOO   ".to_string(), serde_json::json!([-1000, -1]));
    std::fs::write(store.path(), json.to_string()).expect("Write failed");

    let loaded = store.load().expect("every key has legal counts");
    assert_eq!(loaded.len(), REACHABLE_POSITIONS);
    assert!(!loaded.is_complete());

    let engine = Engine::open(&store).expect("Open failed");
    assert_eq!(engine.table(), solved());
}

#[test]
fn test_save_into_missing_directory_fails() {
    let (dir, _store) = setup_store();
    let store = MemoStore::new(dir.path().join("no/such/dir/cache.json"));
    assert!(store.save(solved()).is_err());
}
