//! Session wiring: one store shared by the fetch and mutation pipelines.
//!
//! # Responsibility
//! - Build the store and both pipelines from one configuration.
//! - Hand out read-only derived snapshots to presentation callers.
//!
//! # Invariants
//! - The store is owned by the session; callers only reach it through the
//!   pipelines or read-only snapshots.
//! - The store lives as long as the session; nothing is persisted.

use crate::config::{ClientConfig, ConfigError};
use crate::model::filter::{CompletionFilter, StatusFilter};
use crate::model::todo::Todo;
use crate::remote::http::HttpTodoSource;
use crate::remote::simulated::{SimulatedLatency, SimulatedTodoSource};
use crate::remote::source::{SourceError, TodoSource};
use crate::repo::todo_store::{StoreHandle, TodoStore};
use crate::service::fetch::FetchPipeline;
use crate::service::mutation::MutationPipeline;
use crate::service::view::derive_view;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::sync::watch;

/// Session construction errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    Config(ConfigError),
    Source(SourceError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Source(err) => Some(err),
        }
    }
}

impl From<ConfigError> for SessionError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<SourceError> for SessionError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

/// One client session over the todo cache.
pub struct TodoSession {
    config: ClientConfig,
    store: StoreHandle,
    fetch: FetchPipeline,
    mutations: MutationPipeline,
}

impl TodoSession {
    /// Builds the default stack: HTTP reads with locally simulated writes.
    ///
    /// # Errors
    /// - `Config` when `config` does not validate.
    /// - `Source` when the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let http = HttpTodoSource::from_config(&config)?;
        let source = SimulatedTodoSource::new(http, SimulatedLatency::from_config(&config));
        info!(
            "event=session_open module=session status=ok base_url={} limit={} timeout_ms={}",
            config.base_url, config.page_limit, config.request_timeout_ms
        );
        Ok(Self::with_source(config, Arc::new(source)))
    }

    /// Builds a session over a caller-provided source.
    pub fn with_source(config: ClientConfig, source: Arc<dyn TodoSource>) -> Self {
        let store = TodoStore::shared();
        let fetch = FetchPipeline::from_config(Arc::clone(&source), Arc::clone(&store), &config);
        let mutations = MutationPipeline::new(source, Arc::clone(&store));
        Self {
            config,
            store,
            fetch,
            mutations,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn fetch(&self) -> &FetchPipeline {
        &self.fetch
    }

    pub fn mutations(&self) -> &MutationPipeline {
        &self.mutations
    }

    /// Read-only snapshot of the full store.
    pub fn records(&self) -> Vec<Todo> {
        self.store.read()
    }

    /// Derived display list for the given selectors.
    pub fn view(&self, completion: CompletionFilter, status: StatusFilter) -> Vec<Todo> {
        derive_view(&self.store.read(), completion, status)
    }

    /// Store revision stream; a change means views should be re-derived.
    pub fn subscribe_changes(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }
}
