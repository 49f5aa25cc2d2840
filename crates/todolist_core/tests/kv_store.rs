use rusqlite::Connection;
use todolist_core::db::{open_db, open_db_in_memory};
use todolist_core::{KeyValueStore, RepoError, SqliteKeyValueStore, STORAGE_KEY};

#[test]
fn load_missing_key_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert_eq!(store.load(STORAGE_KEY).unwrap(), None);
}

#[test]
fn save_upserts_single_row_per_key() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    store.save(STORAGE_KEY, "first").unwrap();
    store.save(STORAGE_KEY, "second").unwrap();
    store.save("other", "kept apart").unwrap();

    assert_eq!(store.load(STORAGE_KEY).unwrap().as_deref(), Some("second"));
    assert_eq!(store.load("other").unwrap().as_deref(), Some("kept apart"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}

#[test]
fn saved_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todolist.db");

    {
        let conn = open_db(&path).unwrap();
        let store = SqliteKeyValueStore::try_new(&conn).unwrap();
        store.save(STORAGE_KEY, "[]").unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    assert_eq!(store.load(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKeyValueStore::try_new(&conn) {
        Err(RepoError::SchemaNotReady { found, expected }) => {
            assert_eq!(found, 0);
            assert!(expected >= 1);
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("unmigrated connection must be rejected"),
    }
}

#[test]
fn blank_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert!(matches!(store.save(" ", "v").unwrap_err(), RepoError::InvalidKey));
}
