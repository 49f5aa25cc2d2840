//! Install-affordance tracking.
//!
//! Independent of the document; nothing here is persisted.

pub mod affordance;
