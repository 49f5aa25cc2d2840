//! Whole-document state and its value-returning mutations.
//!
//! # Responsibility
//! - Own the ordered list collection and the active-list pointer.
//! - Apply each user-level mutation as `&Document -> Document`.
//! - Repair the active-list pointer after structural changes.
//!
//! # Invariants
//! - Every public constructor and mutation returns a document that passes
//!   `Document::validate()`.
//! - Unresolved list/todo ids are silent no-ops, never errors.

use crate::model::ids::IdSource;
use crate::model::todo::{
    normalize_display_text, ListId, Todo, TodoId, TodoList, ValidationError,
};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Broken document invariant, reported by `Document::validate()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    DuplicateListId(ListId),
    DuplicateTodoId { list_id: ListId, todo_id: TodoId },
    BlankListName(ListId),
    BlankTodoText { list_id: ListId, todo_id: TodoId },
    /// `active_list_id` points at a list that is not present.
    DanglingSelection(ListId),
    /// Lists exist but none is selected.
    MissingSelection,
}

impl Display for InvariantViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateListId(id) => write!(f, "duplicate list id: {id}"),
            Self::DuplicateTodoId { list_id, todo_id } => {
                write!(f, "duplicate todo id {todo_id} in list {list_id}")
            }
            Self::BlankListName(id) => write!(f, "list {id} has a blank name"),
            Self::BlankTodoText { list_id, todo_id } => {
                write!(f, "todo {todo_id} in list {list_id} has blank text")
            }
            Self::DanglingSelection(id) => write!(f, "active list {id} does not exist"),
            Self::MissingSelection => write!(f, "lists exist but none is active"),
        }
    }
}

impl Error for InvariantViolation {}

/// Complete application state: all lists plus the selection pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lists: Vec<TodoList>,
    active_list_id: Option<ListId>,
}

impl Document {
    /// Empty document with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from decoded parts.
    ///
    /// The selection is reconciled; list/todo invariants are checked.
    ///
    /// # Errors
    /// - Returns the first `InvariantViolation` found in `lists`.
    pub fn from_parts(
        lists: Vec<TodoList>,
        active_list_id: Option<ListId>,
    ) -> Result<Self, InvariantViolation> {
        let document = Self {
            lists,
            active_list_id,
        }
        .reconcile_selection();
        document.validate()?;
        Ok(document)
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn active_list_id(&self) -> Option<ListId> {
        self.active_list_id
    }

    /// Currently selected list, if any.
    pub fn active_list(&self) -> Option<&TodoList> {
        self.active_list_id.and_then(|id| self.list(id))
    }

    pub fn list(&self, list_id: ListId) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.id == list_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Appends a new list and makes it active.
    ///
    /// # Errors
    /// - `ValidationError::BlankListName` when `raw_name` trims to nothing;
    ///   the caller keeps its current document.
    pub fn add_list(
        &self,
        ids: &mut dyn IdSource,
        raw_name: &str,
    ) -> Result<Document, ValidationError> {
        let name = normalize_display_text(raw_name).ok_or(ValidationError::BlankListName)?;
        let id = self.fresh_list_id(ids);

        let mut next = self.clone();
        next.lists.push(TodoList::new(id, &name)?);
        next.active_list_id = Some(id);
        Ok(next.reconcile_selection())
    }

    /// Removes one list and all of its todos.
    pub fn delete_list(&self, list_id: ListId) -> Document {
        if self.list(list_id).is_none() {
            return self.clone();
        }

        let mut next = self.clone();
        next.lists.retain(|list| list.id != list_id);
        next.reconcile_selection()
    }

    /// Selects an existing list; unknown ids leave the selection alone.
    pub fn select_list(&self, list_id: ListId) -> Document {
        let mut next = self.clone();
        if self.list(list_id).is_some() {
            next.active_list_id = Some(list_id);
        }
        next
    }

    /// Appends an open todo to the target list.
    ///
    /// An unknown `list_id` returns the document unchanged.
    ///
    /// # Errors
    /// - `ValidationError::BlankTodoText` when `raw_text` trims to nothing.
    pub fn add_todo(
        &self,
        ids: &mut dyn IdSource,
        list_id: ListId,
        raw_text: &str,
    ) -> Result<Document, ValidationError> {
        let text = normalize_display_text(raw_text).ok_or(ValidationError::BlankTodoText)?;
        if self.list(list_id).is_none() {
            return Ok(self.clone());
        }

        let todo = Todo::new(self.fresh_todo_id(ids), &text)?;
        Ok(self.map_list(list_id, |list| list.todos.push(todo)))
    }

    /// Flips `completed` on one todo.
    pub fn toggle_todo(&self, list_id: ListId, todo_id: TodoId) -> Document {
        self.map_list(list_id, |list| {
            if let Some(todo) = list.todos.iter_mut().find(|todo| todo.id == todo_id) {
                *todo = todo.toggled();
            }
        })
    }

    /// Removes one todo by identity.
    pub fn delete_todo(&self, list_id: ListId, todo_id: TodoId) -> Document {
        self.map_list(list_id, |list| list.todos.retain(|todo| todo.id != todo_id))
    }

    /// Repairs `active_list_id` after lists were added or removed.
    ///
    /// Keeps a still-valid selection, else falls back to the first list,
    /// else clears it.
    pub fn reconcile_selection(mut self) -> Document {
        let still_valid = self
            .active_list_id
            .is_some_and(|id| self.lists.iter().any(|list| list.id == id));
        if !still_valid {
            self.active_list_id = self.lists.first().map(|list| list.id);
        }
        self
    }

    /// Checks every document invariant.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut list_ids = HashSet::with_capacity(self.lists.len());
        for list in &self.lists {
            if !list_ids.insert(list.id) {
                return Err(InvariantViolation::DuplicateListId(list.id));
            }
            if list.name.trim().is_empty() {
                return Err(InvariantViolation::BlankListName(list.id));
            }

            let mut todo_ids = HashSet::with_capacity(list.todos.len());
            for todo in &list.todos {
                if !todo_ids.insert(todo.id) {
                    return Err(InvariantViolation::DuplicateTodoId {
                        list_id: list.id,
                        todo_id: todo.id,
                    });
                }
                if todo.text.trim().is_empty() {
                    return Err(InvariantViolation::BlankTodoText {
                        list_id: list.id,
                        todo_id: todo.id,
                    });
                }
            }
        }

        match self.active_list_id {
            Some(id) if !list_ids.contains(&id) => Err(InvariantViolation::DanglingSelection(id)),
            None if !self.lists.is_empty() => Err(InvariantViolation::MissingSelection),
            _ => Ok(()),
        }
    }

    fn map_list(&self, list_id: ListId, apply: impl FnOnce(&mut TodoList)) -> Document {
        let mut next = self.clone();
        if let Some(list) = next.lists.iter_mut().find(|list| list.id == list_id) {
            apply(list);
        }
        next
    }

    fn fresh_list_id(&self, ids: &mut dyn IdSource) -> ListId {
        loop {
            let candidate = ids.next_id();
            if self.list(candidate).is_none() {
                return candidate;
            }
        }
    }

    // Unique across every list, not only the target one.
    fn fresh_todo_id(&self, ids: &mut dyn IdSource) -> TodoId {
        loop {
            let candidate = ids.next_id();
            let taken = self
                .lists
                .iter()
                .any(|list| list.todo(candidate).is_some());
            if !taken {
                return candidate;
            }
        }
    }
}
