//! Client-side todo cache core.
//! Owns the record store, the fetch/mutation pipelines and the derived view.

pub mod config;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repo;
pub mod service;
pub mod session;

pub use config::{ClientConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::filter::{CompletionFilter, FilterParseError, StatusFilter};
pub use model::todo::{
    NewTodo, OwnerId, Todo, TodoId, TodoPatch, TodoStatus, TodoValidationError,
};
pub use remote::http::HttpTodoSource;
pub use remote::simulated::{SimulatedLatency, SimulatedTodoSource};
pub use remote::source::{SourceError, SourceResult, TodoSource};
pub use repo::todo_store::{StoreHandle, TodoStore};
pub use service::fetch::{FetchPhase, FetchPipeline, FetchState};
pub use service::mutation::{MutationError, MutationKind, MutationPipeline, MutationState};
pub use service::priority::{can_complete, priority_score, sanitize_title, sort_by_priority, DisplayTodo};
pub use service::view::derive_view;
pub use session::{SessionError, TodoSession};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
