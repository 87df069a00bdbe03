//! Fetch pipeline: initial load of the record store.
//!
//! # Responsibility
//! - Read one bounded page from the source and replace the store with it.
//! - Publish `Loading | Error | Ready` for polling or subscription.
//!
//! # Invariants
//! - `Ready` records are always read from the store, so later mutations are
//!   visible through the fetch state.
//! - The read is bounded by the configured timeout; expiry surfaces as `Error`.
//! - A failed read leaves the store untouched.
//! - No automatic retry; callers re-invoke `load` to recover.

use crate::config::ClientConfig;
use crate::model::todo::Todo;
use crate::remote::source::{SourceError, TodoSource};
use crate::repo::todo_store::StoreHandle;
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Published load phase; carries no records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchPhase {
    Loading,
    Error(String),
    Ready,
}

impl FetchPhase {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Observable fetch status, with `Ready` records taken from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    /// No data yet and no error.
    Loading,
    /// Last read failed; carries the underlying failure description.
    Error(String),
    /// Data available.
    Ready(Vec<Todo>),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn records(&self) -> Option<&[Todo]> {
        match self {
            Self::Ready(records) => Some(records.as_slice()),
            _ => None,
        }
    }
}

/// Loads the store from a remote source.
pub struct FetchPipeline {
    source: Arc<dyn TodoSource>,
    store: StoreHandle,
    page_limit: u32,
    timeout: Duration,
    started: AtomicBool,
    phase: watch::Sender<FetchPhase>,
}

impl FetchPipeline {
    pub fn new(
        source: Arc<dyn TodoSource>,
        store: StoreHandle,
        page_limit: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            source,
            store,
            page_limit,
            timeout,
            started: AtomicBool::new(false),
            phase: watch::Sender::new(FetchPhase::Loading),
        }
    }

    pub fn from_config(
        source: Arc<dyn TodoSource>,
        store: StoreHandle,
        config: &ClientConfig,
    ) -> Self {
        Self::new(source, store, config.page_limit, config.request_timeout())
    }

    /// Current state snapshot. `Ready` carries the store's live contents.
    pub fn current(&self) -> FetchState {
        match self.phase() {
            FetchPhase::Loading => FetchState::Loading,
            FetchPhase::Error(message) => FetchState::Error(message),
            FetchPhase::Ready => FetchState::Ready(self.store.read()),
        }
    }

    pub fn phase(&self) -> FetchPhase {
        self.phase.borrow().clone()
    }

    /// Subscribes to phase transitions; record changes are published by the
    /// store's revision stream.
    pub fn subscribe(&self) -> watch::Receiver<FetchPhase> {
        self.phase.subscribe()
    }

    /// Loads once on first use; later calls return the current state.
    pub async fn ensure_loaded(&self) -> FetchState {
        if self.started.swap(true, Ordering::AcqRel) {
            return self.current();
        }
        self.load().await
    }

    /// Issues the read and publishes its outcome.
    ///
    /// Re-invocation repeats the same read and replace. While a reload is in
    /// flight, previously loaded data stays visible as `Ready`.
    pub async fn load(&self) -> FetchState {
        self.started.store(true, Ordering::Release);
        self.phase.send_if_modified(|phase| {
            if phase.is_ready() || phase.is_loading() {
                return false;
            }
            *phase = FetchPhase::Loading;
            true
        });

        let started_at = Instant::now();
        info!(
            "event=fetch_todos module=fetch status=start limit={}",
            self.page_limit
        );

        let outcome = match tokio::time::timeout(
            self.timeout,
            self.source.fetch_todos(self.page_limit),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }),
        };

        let next = match outcome {
            Ok(records) => {
                info!(
                    "event=fetch_todos module=fetch status=ok count={} duration_ms={}",
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                self.store.replace(records);
                FetchPhase::Ready
            }
            Err(err) => {
                error!(
                    "event=fetch_todos module=fetch status=error duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    err.code(),
                    err
                );
                FetchPhase::Error(err.to_string())
            }
        };

        self.phase.send_replace(next);
        self.current()
    }
}
