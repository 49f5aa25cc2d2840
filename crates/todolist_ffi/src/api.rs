//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the document operations the UI triggers on user actions.
//! - Return a full snapshot after every call so the UI can simply re-render.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Document calls are serialized; two calls never interleave.
//! - A failed save is reported with `ok == false` but the change is kept.
//! - The platform install prompt object stays on the Dart side; Rust only
//!   tracks an opaque `u64` handle for it.

use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use todolist_core::db::open_db;
use todolist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    Document, InstallAffordance, SqliteKeyValueStore, TodoService, ValidationError,
};

const DB_FILE_NAME: &str = "todolist.sqlite3";
const DB_PATH_ENV: &str = "TODOLIST_DB_PATH";

static DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: Mutex<Option<Session>> = Mutex::new(None);
static INSTALL: OnceLock<Mutex<InstallAffordance<u64>>> = OnceLock::new();

/// Open store plus the last document the UI was shown.
///
/// The document here is authoritative between calls; the store may lag
/// behind it after a failed save.
struct Session {
    conn: Connection,
    document: Document,
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and the error message on failure.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One todo row as rendered by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i64,
    pub text: String,
    pub completed: bool,
}

/// One list with its todos in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListItem {
    pub id: i64,
    pub name: String,
    pub todos: Vec<TodoItem>,
}

/// Everything the UI needs to render one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSnapshot {
    pub lists: Vec<TodoListItem>,
    pub active_list_id: Option<i64>,
    /// Show the "Install App" button.
    pub can_install: bool,
    pub is_installed: bool,
}

/// Result envelope for user actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// `false` for rejected input or storage failures.
    pub ok: bool,
    /// Human-readable detail for diagnostics; empty on plain success.
    pub message: String,
    /// State after the call, whether or not it changed.
    pub snapshot: AppSnapshot,
}

/// Records whether the app runs in standalone display mode.
///
/// Meant for startup. A late call with `standalone == true` still moves the
/// tracker to installed.
#[flutter_rust_bridge::frb(sync)]
pub fn install_init(standalone: bool) -> AppSnapshot {
    let already_tracking = INSTALL
        .set(Mutex::new(InstallAffordance::new(standalone)))
        .is_err();
    // An earlier call created the tracker; standalone mode must still land.
    if already_tracking && standalone {
        with_install(InstallAffordance::mark_installed);
    }
    app_snapshot()
}

/// Current document and install state.
#[flutter_rust_bridge::frb(sync)]
pub fn app_snapshot() -> AppSnapshot {
    with_service("app_snapshot", |_| Ok(())).snapshot
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_list(name: String) -> ActionResponse {
    with_service("add_list", |service| {
        service.add_list(&name).map(|_| ()).map_err(validation_message)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_list(list_id: i64) -> ActionResponse {
    with_service("delete_list", |service| {
        service.delete_list(list_id);
        Ok(())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn select_list(list_id: i64) -> ActionResponse {
    with_service("select_list", |service| {
        service.select_list(list_id);
        Ok(())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn add_todo(list_id: i64, text: String) -> ActionResponse {
    with_service("add_todo", |service| {
        service
            .add_todo(list_id, &text)
            .map(|_| ())
            .map_err(validation_message)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn toggle_todo(list_id: i64, todo_id: i64) -> ActionResponse {
    with_service("toggle_todo", |service| {
        service.toggle_todo(list_id, todo_id);
        Ok(())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn delete_todo(list_id: i64, todo_id: i64) -> ActionResponse {
    with_service("delete_todo", |service| {
        service.delete_todo(list_id, todo_id);
        Ok(())
    })
}

/// Platform offered installation; `token` identifies the Dart-side prompt.
#[flutter_rust_bridge::frb(sync)]
pub fn install_offer_available(token: u64) -> AppSnapshot {
    with_install(|install| {
        install.offer_available(token);
    });
    app_snapshot()
}

/// Hands out the pending prompt handle once; `None` when nothing is pending.
///
/// The Dart side shows the prompt for the returned handle. Whatever the
/// user answers, the handle is spent.
#[flutter_rust_bridge::frb(sync)]
pub fn install_take_prompt_token() -> Option<u64> {
    with_install(InstallAffordance::take_prompt_token)
}

/// Platform reported a completed installation.
#[flutter_rust_bridge::frb(sync)]
pub fn install_app_installed() -> AppSnapshot {
    with_install(InstallAffordance::mark_installed);
    app_snapshot()
}

fn with_service(
    operation: &'static str,
    f: impl FnOnce(&mut TodoService<SqliteKeyValueStore<'_>>) -> Result<(), String>,
) -> ActionResponse {
    let mut guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    let session = match guard.take() {
        Some(session) => session,
        None => match open_session() {
            Ok(session) => session,
            Err(message) => {
                warn!(
                    "event=ffi_call module=ffi status=error operation={operation} error={message}"
                );
                return failure(format!("{operation} failed: {message}"), &Document::new());
            }
        },
    };
    let session = guard.insert(session);

    let store = match SqliteKeyValueStore::try_new(&session.conn) {
        Ok(store) => store,
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error operation={operation} error={err}");
            return failure(format!("{operation} failed: {err}"), &session.document);
        }
    };

    let mut service = TodoService::resume(store, session.document.clone());
    let outcome = f(&mut service);
    let save_error = service.last_save_error().map(ToString::to_string);
    session.document = service.document().clone();

    match (outcome, save_error) {
        (Err(message), _) => failure(message, &session.document),
        (Ok(()), Some(err)) => {
            warn!("event=ffi_call module=ffi status=unsaved operation={operation}");
            failure(
                format!("{operation} applied but not saved: {err}"),
                &session.document,
            )
        }
        (Ok(()), None) => ActionResponse {
            ok: true,
            message: String::new(),
            snapshot: to_snapshot(&session.document),
        },
    }
}

fn open_session() -> Result<Session, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| format!("store open failed: {err}"))?;
    let document = {
        let store = SqliteKeyValueStore::try_new(&conn).map_err(|err| err.to_string())?;
        TodoService::initialize(store).document().clone()
    };
    Ok(Session { conn, document })
}

fn with_install<T>(f: impl FnOnce(&mut InstallAffordance<u64>) -> T) -> T {
    let install = INSTALL.get_or_init(|| Mutex::new(InstallAffordance::new(false)));
    let mut guard = install.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn failure(message: String, document: &Document) -> ActionResponse {
    ActionResponse {
        ok: false,
        message,
        snapshot: to_snapshot(document),
    }
}

fn validation_message(err: ValidationError) -> String {
    err.to_string()
}

fn to_snapshot(document: &Document) -> AppSnapshot {
    let (can_install, is_installed) =
        with_install(|install| (install.can_prompt(), install.is_installed()));
    AppSnapshot {
        lists: document
            .lists()
            .iter()
            .map(|list| TodoListItem {
                id: list.id,
                name: list.name.clone(),
                todos: list
                    .todos
                    .iter()
                    .map(|todo| TodoItem {
                        id: todo.id,
                        text: todo.text.clone(),
                        completed: todo.completed,
                    })
                    .collect(),
            })
            .collect(),
        active_list_id: document.active_list_id(),
        can_install,
        is_installed,
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}
