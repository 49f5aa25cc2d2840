//! Todo item and list records.
//!
//! # Responsibility
//! - Define the persisted shape of a todo and a named list of todos.
//! - Normalize user-supplied display text at creation time.
//!
//! # Invariants
//! - `Todo::text` and `TodoList::name` are trimmed and non-empty when built
//!   through the constructors here.
//! - `TodoList::todos` keeps insertion order; it is also display order.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier of a `TodoList`.
///
/// Kept as an integer so persisted documents from the web build still load.
pub type ListId = i64;

/// Stable identifier of a `Todo`.
pub type TodoId = i64;

/// User input rejected by the non-blank rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// List name is empty after trim.
    BlankListName,
    /// Todo text is empty after trim.
    BlankTodoText,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankListName => write!(f, "list name must not be blank"),
            Self::BlankTodoText => write!(f, "todo text must not be blank"),
        }
    }
}

impl Error for ValidationError {}

/// Single checkable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
}

impl Todo {
    /// Creates an open todo from raw input text.
    ///
    /// # Errors
    /// - `ValidationError::BlankTodoText` when `raw_text` trims to nothing.
    pub fn new(id: TodoId, raw_text: &str) -> Result<Self, ValidationError> {
        let text = normalize_display_text(raw_text).ok_or(ValidationError::BlankTodoText)?;
        Ok(Self {
            id,
            text,
            completed: false,
        })
    }

    /// Returns a copy with `completed` flipped.
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }
}

/// Named, ordered collection of todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: ListId,
    pub name: String,
    pub todos: Vec<Todo>,
}

impl TodoList {
    /// Creates an empty list from a raw input name.
    ///
    /// # Errors
    /// - `ValidationError::BlankListName` when `raw_name` trims to nothing.
    pub fn new(id: ListId, raw_name: &str) -> Result<Self, ValidationError> {
        let name = normalize_display_text(raw_name).ok_or(ValidationError::BlankListName)?;
        Ok(Self {
            id,
            name,
            todos: Vec::new(),
        })
    }

    /// Returns one todo by id.
    pub fn todo(&self, todo_id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == todo_id)
    }

    /// Number of todos with `completed == true`.
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|todo| todo.completed).count()
    }
}

/// Trims user input; returns `None` when nothing is left.
pub fn normalize_display_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_display_text, Todo, TodoList, ValidationError};

    #[test]
    fn todo_new_trims_and_starts_open() {
        let todo = Todo::new(7, "  Milk \n").unwrap();
        assert_eq!(todo.id, 7);
        assert_eq!(todo.text, "Milk");
        assert!(!todo.completed);
    }

    #[test]
    fn constructors_reject_blank_input() {
        assert_eq!(Todo::new(1, " \t ").unwrap_err(), ValidationError::BlankTodoText);
        assert_eq!(TodoList::new(1, "").unwrap_err(), ValidationError::BlankListName);
    }

    #[test]
    fn toggled_flips_only_completed() {
        let todo = Todo::new(3, "Eggs").unwrap();
        let toggled = todo.toggled();
        assert!(toggled.completed);
        assert_eq!(toggled.id, todo.id);
        assert_eq!(toggled.text, todo.text);
        assert_eq!(toggled.toggled(), todo);
    }

    #[test]
    fn normalize_keeps_inner_whitespace() {
        assert_eq!(
            normalize_display_text("  weekly  shop ").as_deref(),
            Some("weekly  shop")
        );
    }
}
