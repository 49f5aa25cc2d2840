//! Textual encoding of the persisted document.
//!
//! # Responsibility
//! - Turn a `Document` into the single string kept in the key-value store.
//! - Decode stored strings back, rejecting corrupt structures as a whole.
//!
//! # Invariants
//! - `deserialize(&serialize(doc)) == Ok(doc)` for every valid document.
//! - Decoding never yields a document that fails `Document::validate()`.

pub mod document_codec;

pub use document_codec::{deserialize, serialize, ParseError, FORMAT_VERSION, STORAGE_KEY};
