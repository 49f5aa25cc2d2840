//! Document session: the live document plus its persistence side effects.
//!
//! # Responsibility
//! - Load the stored document once at startup, degrading to empty on failure.
//! - Apply user actions, persist every changed snapshot, notify subscribers.
//!
//! # Invariants
//! - Storage failures never change or drop the in-memory document.
//! - Subscribers and the store only see snapshots that differ from the
//!   previous one.
//! - Log lines carry ids and counts, never list names or todo text.

use crate::codec::{deserialize, serialize, STORAGE_KEY};
use crate::model::document::Document;
use crate::model::ids::{IdSource, TimestampIds};
use crate::model::todo::{ListId, TodoId, ValidationError};
use crate::repo::kv_repo::{KeyValueStore, RepoError};
use log::{debug, error, info, warn};

/// Handle returned by `TodoService::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&Document)>;

/// Single-actor document store over a key-value backend.
pub struct TodoService<S: KeyValueStore> {
    store: S,
    document: Document,
    ids: Box<dyn IdSource>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    last_save_error: Option<RepoError>,
}

impl<S: KeyValueStore> TodoService<S> {
    /// Loads the stored document and starts a session with timestamp ids.
    pub fn initialize(store: S) -> Self {
        Self::with_id_source(store, Box::new(TimestampIds::new()))
    }

    /// Same as `initialize`, with a caller-provided id source.
    pub fn with_id_source(store: S, ids: Box<dyn IdSource>) -> Self {
        let document = load_document(&store);
        Self::resume_with_id_source(store, document, ids)
    }

    /// Continues a session from an already-loaded document without reading
    /// the store.
    ///
    /// Used by callers that keep the document between short-lived store
    /// handles, so an unsaved change is not replaced by an older stored copy.
    pub fn resume(store: S, document: Document) -> Self {
        Self::resume_with_id_source(store, document, Box::new(TimestampIds::new()))
    }

    fn resume_with_id_source(store: S, document: Document, ids: Box<dyn IdSource>) -> Self {
        Self {
            store,
            document,
            ids,
            subscribers: Vec::new(),
            next_subscription: 1,
            last_save_error: None,
        }
    }

    /// Current document snapshot.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Failure of the most recent save attempt.
    ///
    /// `Some` means the stored copy is behind `document()`; the next
    /// successful save writes the whole document and clears it.
    pub fn last_save_error(&self) -> Option<&RepoError> {
        self.last_save_error.as_ref()
    }

    /// Registers a callback invoked after every change, in registration order.
    pub fn subscribe(&mut self, callback: impl FnMut(&Document) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback; returns `false` for unknown handles.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }

    /// Creates a list and makes it active.
    ///
    /// # Errors
    /// - `ValidationError::BlankListName`; the document is left untouched.
    pub fn add_list(&mut self, raw_name: &str) -> Result<&Document, ValidationError> {
        match self.document.add_list(self.ids.as_mut(), raw_name) {
            Ok(next) => Ok(self.commit("list_add", next)),
            Err(err) => {
                debug!("event=list_add module=service status=rejected reason={err}");
                Err(err)
            }
        }
    }

    pub fn delete_list(&mut self, list_id: ListId) -> &Document {
        let next = self.document.delete_list(list_id);
        self.commit("list_delete", next)
    }

    pub fn select_list(&mut self, list_id: ListId) -> &Document {
        let next = self.document.select_list(list_id);
        self.commit("list_select", next)
    }

    /// Appends a todo to `list_id`; unknown lists are a no-op.
    ///
    /// # Errors
    /// - `ValidationError::BlankTodoText`; the document is left untouched.
    pub fn add_todo(
        &mut self,
        list_id: ListId,
        raw_text: &str,
    ) -> Result<&Document, ValidationError> {
        match self.document.add_todo(self.ids.as_mut(), list_id, raw_text) {
            Ok(next) => Ok(self.commit("todo_add", next)),
            Err(err) => {
                debug!(
                    "event=todo_add module=service status=rejected list_id={list_id} reason={err}"
                );
                Err(err)
            }
        }
    }

    pub fn toggle_todo(&mut self, list_id: ListId, todo_id: TodoId) -> &Document {
        let next = self.document.toggle_todo(list_id, todo_id);
        self.commit("todo_toggle", next)
    }

    pub fn delete_todo(&mut self, list_id: ListId, todo_id: TodoId) -> &Document {
        let next = self.document.delete_todo(list_id, todo_id);
        self.commit("todo_delete", next)
    }

    fn commit(&mut self, event: &'static str, next: Document) -> &Document {
        if next == self.document {
            debug!("event={event} module=service status=noop");
            return &self.document;
        }

        self.document = next;
        self.persist(event);
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.document);
        }
        &self.document
    }

    fn persist(&mut self, event: &'static str) {
        let payload = serialize(&self.document);
        match self.store.save(STORAGE_KEY, &payload) {
            Ok(()) => {
                debug!(
                    "event={event} module=service status=ok lists={} active_list_id={:?} bytes={}",
                    self.document.lists().len(),
                    self.document.active_list_id(),
                    payload.len()
                );
                self.last_save_error = None;
            }
            Err(err) => {
                error!(
                    "event=document_save module=service status=error trigger={event} error={err}"
                );
                self.last_save_error = Some(err);
            }
        }
    }
}

fn load_document(store: &impl KeyValueStore) -> Document {
    let payload = match store.load(STORAGE_KEY) {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            info!("event=document_load module=service status=empty");
            return Document::new();
        }
        Err(err) => {
            error!("event=document_load module=service status=error error={err}");
            return Document::new();
        }
    };

    match deserialize(&payload) {
        Ok(document) => {
            info!(
                "event=document_load module=service status=ok lists={} active_list_id={:?}",
                document.lists().len(),
                document.active_list_id()
            );
            document
        }
        Err(err) => {
            warn!(
                "event=document_load module=service status=fallback bytes={} error={err}",
                payload.len()
            );
            Document::new()
        }
    }
}
