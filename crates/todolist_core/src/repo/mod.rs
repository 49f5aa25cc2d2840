//! Persistent key-value store contract and implementations.
//!
//! # Responsibility
//! - Durably keep the serialized document under a string key.
//! - Isolate SQLite details from the document session.
//!
//! # Invariants
//! - Keys are non-blank.
//! - `save` replaces the whole value for a key; there are no partial writes.

pub mod kv_repo;
