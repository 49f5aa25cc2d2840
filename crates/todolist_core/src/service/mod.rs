//! Core use-case services.
//!
//! # Responsibility
//! - Hold the live document for one process and route user actions to it.
//! - Keep rendering/FFI layers decoupled from storage details.

pub mod todo_service;
