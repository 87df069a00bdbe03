//! Source contract shared by HTTP and simulated implementations.

use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch};
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SourceResult<T> = Result<T, SourceError>;

/// Failures surfaced by a remote source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Connection-level failure; the message is the underlying description.
    Transport(String),
    /// The request exceeded its time bound.
    Timeout { timeout_ms: u64 },
    /// The remote answered with a non-success status.
    Status(u16),
    /// The response body did not match the expected shape.
    Decode(String),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => f.write_str(message),
            Self::Timeout { timeout_ms } => write!(f, "request timed out after {timeout_ms}ms"),
            Self::Status(code) => write!(f, "HTTP error status: {code}"),
            Self::Decode(message) => write!(f, "invalid response body: {message}"),
        }
    }
}

impl Error for SourceError {}

impl SourceError {
    /// Stable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport_failed",
            Self::Timeout { .. } => "timeout",
            Self::Status(_) => "bad_status",
            Self::Decode(_) => "decode_failed",
        }
    }
}

/// Remote source of truth for todos.
///
/// Writes return the canonical record when the remote provides one.
#[async_trait]
pub trait TodoSource: Send + Sync {
    /// Reads one bounded page of records.
    async fn fetch_todos(&self, limit: u32) -> SourceResult<Vec<Todo>>;

    /// Persists a new record and returns it with its assigned id.
    async fn create_todo(&self, request: &NewTodo) -> SourceResult<Todo>;

    /// Applies a partial update. `Ok(None)` means no canonical record came back.
    async fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> SourceResult<Option<Todo>>;

    async fn delete_todo(&self, id: TodoId) -> SourceResult<()>;
}
