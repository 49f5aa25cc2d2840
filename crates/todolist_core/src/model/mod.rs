//! Document model for lists, todos and the active-list pointer.
//!
//! # Responsibility
//! - Define the canonical data structures owned by core business logic.
//! - Provide pure, value-returning mutations over one `Document`.
//!
//! # Invariants
//! - List ids are unique within a document; todo ids are unique across it.
//! - `active_list_id` is `None` only when there are no lists.
//! - Names and texts are never blank after trim.

pub mod document;
pub mod ids;
pub mod todo;
