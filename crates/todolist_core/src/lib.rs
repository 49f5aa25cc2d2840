//! Core domain logic for the to-do list app.
//! This crate is the single source of truth for document invariants.

pub mod codec;
pub mod db;
pub mod install;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use codec::{deserialize, serialize, ParseError, FORMAT_VERSION, STORAGE_KEY};
pub use install::affordance::{
    InstallAffordance, InstallOutcome, InstallPromptBroker, InstallState,
};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::document::{Document, InvariantViolation};
pub use model::ids::{IdSource, SequentialIds, TimestampIds};
pub use model::todo::{ListId, Todo, TodoId, TodoList, ValidationError};
pub use repo::kv_repo::{
    KeyValueStore, MemoryKeyValueStore, RepoError, RepoResult, SqliteKeyValueStore,
};
pub use service::todo_service::{SubscriptionId, TodoService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
