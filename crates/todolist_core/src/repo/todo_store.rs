//! In-memory record store for todos.
//!
//! # Responsibility
//! - Hold the current known todo sequence for one session.
//! - Expose the narrow `replace`/`apply_*`/`read` mutation surface.
//! - Publish a revision counter so consumers know when to re-derive views.
//!
//! # Invariants
//! - Each `apply_*` call is atomic with respect to the others.
//! - Unknown-id update/delete are silent no-ops and do not bump the revision.
//! - `apply_create` always appends; id uniqueness is the caller's concern.
//! - No I/O happens here.

use crate::model::todo::{Todo, TodoId, TodoPatch};
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

/// Shared handle passed to the pipelines that mutate or read the store.
pub type StoreHandle = Arc<TodoStore>;

/// Authoritative in-memory todo cache.
#[derive(Debug)]
pub struct TodoStore {
    records: RwLock<Vec<Todo>>,
    revision: watch::Sender<u64>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    /// Creates an empty store at revision 0.
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Creates a store pre-populated with `records` at revision 0.
    pub fn with_records(records: Vec<Todo>) -> Self {
        Self {
            records: RwLock::new(records),
            revision: watch::Sender::new(0),
        }
    }

    /// Creates an empty store behind a shared handle.
    pub fn shared() -> StoreHandle {
        Arc::new(Self::new())
    }

    /// Snapshot of the current sequence.
    pub fn read(&self) -> Vec<Todo> {
        self.records.read().clone()
    }

    /// First record carrying `id`, if any.
    pub fn get(&self, id: TodoId) -> Option<Todo> {
        self.records.read().iter().find(|todo| todo.id == id).cloned()
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.records.read().iter().any(|todo| todo.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Current revision. Starts at 0 and grows by one per effective change.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Subscribes to revision changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Replaces the whole sequence, used by the fetch pipeline.
    pub fn replace(&self, all: Vec<Todo>) {
        let count = all.len();
        *self.records.write() = all;
        self.bump();
        debug!("event=store_replace module=store status=ok count={count}");
    }

    /// Appends `todo` unconditionally.
    pub fn apply_create(&self, todo: Todo) {
        let id = todo.id;
        self.records.write().push(todo);
        self.bump();
        debug!("event=store_create module=store status=ok id={id}");
    }

    /// Merges `patch` over every record carrying `id`.
    ///
    /// Returns whether anything matched.
    pub fn apply_update(&self, id: TodoId, patch: &TodoPatch) -> bool {
        let matched = {
            let mut records = self.records.write();
            let mut matched = false;
            for todo in records.iter_mut().filter(|todo| todo.id == id) {
                patch.apply_to(todo);
                matched = true;
            }
            matched
        };
        if matched {
            self.bump();
        }
        debug!("event=store_update module=store status=ok id={id} matched={matched}");
        matched
    }

    /// Removes every record carrying `id`.
    ///
    /// Returns whether anything was removed.
    pub fn apply_delete(&self, id: TodoId) -> bool {
        let removed = {
            let mut records = self.records.write();
            let before = records.len();
            records.retain(|todo| todo.id != id);
            before - records.len()
        };
        if removed > 0 {
            self.bump();
        }
        debug!("event=store_delete module=store status=ok id={id} removed={removed}");
        removed > 0
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}
