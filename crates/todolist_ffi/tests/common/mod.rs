use std::path::{Path, PathBuf};
use todolist_core::db::open_db;
use todolist_core::{deserialize, Document, KeyValueStore, SqliteKeyValueStore, STORAGE_KEY};

/// Points the FFI session at `dir/todolist.db`.
///
/// The session resolves its path once per process, so each test binary
/// calls this before its first FFI call and holds a single test.
pub fn use_store_in(dir: &Path) -> PathBuf {
    let path = dir.join("todolist.db");
    std::env::set_var("TODOLIST_DB_PATH", &path);
    path
}

/// Reads the document currently stored on disk, bypassing the FFI session.
#[allow(dead_code)]
pub fn stored_document(path: &Path) -> Option<Document> {
    let conn = open_db(path).unwrap();
    let store = SqliteKeyValueStore::try_new(&conn).unwrap();
    let payload = store.load(STORAGE_KEY).unwrap()?;
    Some(deserialize(&payload).unwrap())
}
