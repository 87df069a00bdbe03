//! Mutation pipeline: create/update/delete state machines.
//!
//! # Responsibility
//! - Perform the remote (or simulated) write, then apply it to the store.
//! - Publish one `Idle -> Pending -> Success | Error` machine per operation kind.
//!
//! # Invariants
//! - The store is only touched after the write succeeds.
//! - A failed write leaves the store exactly as before the attempt.
//! - Validation failures are rejected before `Pending` is entered.
//! - Concurrent invocations of one kind share its machine; the last one to
//!   finish determines the terminal state.

use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch, TodoValidationError};
use crate::remote::source::{SourceError, TodoSource};
use crate::repo::todo_store::StoreHandle;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Observable status of one mutation kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationState<T> {
    Idle,
    Pending,
    Success(T),
    Error(String),
}

impl<T> MutationState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Errors returned to the immediate caller of a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    Validation(TodoValidationError),
    Source(SourceError),
}

impl Display for MutationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MutationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Source(err) => Some(err),
        }
    }
}

impl From<TodoValidationError> for MutationError {
    fn from(value: TodoValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SourceError> for MutationError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

struct Machine<T> {
    kind: MutationKind,
    state: watch::Sender<MutationState<T>>,
}

impl<T: Clone> Machine<T> {
    fn new(kind: MutationKind) -> Self {
        Self {
            kind,
            state: watch::Sender::new(MutationState::Idle),
        }
    }

    fn current(&self) -> MutationState<T> {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<MutationState<T>> {
        self.state.subscribe()
    }

    fn reject(&self, err: &TodoValidationError) {
        warn!(
            "event=mutation module=mutation status=rejected op={} error={}",
            self.kind.as_str(),
            err
        );
    }

    fn begin(&self, id: Option<TodoId>) -> Instant {
        self.state.send_replace(MutationState::Pending);
        info!(
            "event=mutation module=mutation status=start op={} id={}",
            self.kind.as_str(),
            display_id(id)
        );
        Instant::now()
    }

    fn succeed(&self, id: TodoId, value: T, started_at: Instant) {
        info!(
            "event=mutation module=mutation status=ok op={} id={id} duration_ms={}",
            self.kind.as_str(),
            started_at.elapsed().as_millis()
        );
        self.state.send_replace(MutationState::Success(value));
    }

    fn fail(&self, id: Option<TodoId>, err: &SourceError, started_at: Instant) {
        error!(
            "event=mutation module=mutation status=error op={} id={} duration_ms={} error_code={} error={}",
            self.kind.as_str(),
            display_id(id),
            started_at.elapsed().as_millis(),
            err.code(),
            err
        );
        self.state.send_replace(MutationState::Error(err.to_string()));
    }
}

fn display_id(id: Option<TodoId>) -> String {
    id.map_or_else(|| "pending".to_string(), |id| id.to_string())
}

/// Write-then-apply mutation entry points over one store.
pub struct MutationPipeline {
    source: Arc<dyn TodoSource>,
    store: StoreHandle,
    create: Machine<Todo>,
    update: Machine<Option<Todo>>,
    delete: Machine<TodoId>,
}

impl MutationPipeline {
    pub fn new(source: Arc<dyn TodoSource>, store: StoreHandle) -> Self {
        Self {
            source,
            store,
            create: Machine::new(MutationKind::Create),
            update: Machine::new(MutationKind::Update),
            delete: Machine::new(MutationKind::Delete),
        }
    }

    /// Creates a todo and appends it to the store once the write confirms.
    ///
    /// # Errors
    /// - `Validation` before any write; the create state is left unchanged.
    /// - `Source` when the write fails; the store is left unchanged.
    pub async fn create(&self, request: NewTodo) -> Result<Todo, MutationError> {
        if let Err(err) = request.validate() {
            self.create.reject(&err);
            return Err(err.into());
        }

        let started_at = self.create.begin(None);
        match self.source.create_todo(&request).await {
            Ok(todo) => {
                self.store.apply_create(todo.clone());
                self.create.succeed(todo.id, todo.clone(), started_at);
                Ok(todo)
            }
            Err(err) => {
                self.create.fail(None, &err, started_at);
                Err(err.into())
            }
        }
    }

    /// Merges `patch` into record `id` once the write confirms.
    ///
    /// Returns the merged record, or `None` when `id` is not in the store.
    pub async fn update(
        &self,
        id: TodoId,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, MutationError> {
        if let Err(err) = patch.validate() {
            self.update.reject(&err);
            return Err(err.into());
        }

        let started_at = self.update.begin(Some(id));
        match self.source.update_todo(id, &patch).await {
            Ok(_canonical) => {
                self.store.apply_update(id, &patch);
                let merged = self.store.get(id);
                self.update.succeed(id, merged.clone(), started_at);
                Ok(merged)
            }
            Err(err) => {
                self.update.fail(Some(id), &err, started_at);
                Err(err.into())
            }
        }
    }

    /// Convenience for the common completion toggle.
    ///
    /// Unknown ids are a no-op returning `Ok(None)` without a write.
    pub async fn toggle(&self, id: TodoId) -> Result<Option<Todo>, MutationError> {
        match self.store.get(id) {
            Some(todo) => self.update(id, TodoPatch::completed(!todo.completed)).await,
            None => Ok(None),
        }
    }

    /// Removes record `id` once the write confirms.
    pub async fn delete(&self, id: TodoId) -> Result<TodoId, MutationError> {
        let started_at = self.delete.begin(Some(id));
        match self.source.delete_todo(id).await {
            Ok(()) => {
                self.store.apply_delete(id);
                self.delete.succeed(id, id, started_at);
                Ok(id)
            }
            Err(err) => {
                self.delete.fail(Some(id), &err, started_at);
                Err(err.into())
            }
        }
    }

    pub fn create_state(&self) -> MutationState<Todo> {
        self.create.current()
    }

    pub fn update_state(&self) -> MutationState<Option<Todo>> {
        self.update.current()
    }

    pub fn delete_state(&self) -> MutationState<TodoId> {
        self.delete.current()
    }

    pub fn subscribe_create(&self) -> watch::Receiver<MutationState<Todo>> {
        self.create.subscribe()
    }

    pub fn subscribe_update(&self) -> watch::Receiver<MutationState<Option<Todo>>> {
        self.update.subscribe()
    }

    pub fn subscribe_delete(&self) -> watch::Receiver<MutationState<TodoId>> {
        self.delete.subscribe()
    }
}
