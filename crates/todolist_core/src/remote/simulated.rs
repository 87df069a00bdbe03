//! Source wrapper that reads remotely and simulates writes locally.
//!
//! # Invariants
//! - Reads are delegated unchanged to the inner source.
//! - Writes never reach the inner source; each one waits its configured
//!   latency and then succeeds.
//! - Created ids are drawn from `[SIMULATED_ID_MIN, SIMULATED_ID_MIN + SIMULATED_ID_SPAN)`,
//!   which is disjoint from the remote seed ids `1..=200`.

use crate::config::ClientConfig;
use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch};
use crate::remote::source::{SourceResult, TodoSource};
use async_trait::async_trait;
use log::debug;
use rand::Rng;
use std::ops::Range;
use std::time::Duration;

/// Highest id served by the remote seed data.
pub const SEED_ID_MAX: TodoId = 200;
/// Lowest id handed out for simulated creates.
pub const SIMULATED_ID_MIN: TodoId = SEED_ID_MAX + 1;
/// Size of the simulated id space.
pub const SIMULATED_ID_SPAN: TodoId = 10_000;

/// Artificial latency per write kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub create: Duration,
    pub update: Duration,
    pub delete: Duration,
}

impl SimulatedLatency {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            create: config.create_latency(),
            update: config.update_latency(),
            delete: config.delete_latency(),
        }
    }

    /// No artificial delay.
    pub fn none() -> Self {
        Self {
            create: Duration::ZERO,
            update: Duration::ZERO,
            delete: Duration::ZERO,
        }
    }
}

/// Delegates reads to `S`, fakes writes.
#[derive(Debug, Clone)]
pub struct SimulatedTodoSource<S> {
    reads: S,
    latency: SimulatedLatency,
    id_range: Range<TodoId>,
}

impl<S: TodoSource> SimulatedTodoSource<S> {
    pub fn new(reads: S, latency: SimulatedLatency) -> Self {
        Self {
            reads,
            latency,
            id_range: SIMULATED_ID_MIN..SIMULATED_ID_MIN + SIMULATED_ID_SPAN,
        }
    }

    /// Range created ids are drawn from.
    pub fn id_range(&self) -> Range<TodoId> {
        self.id_range.clone()
    }

    fn next_id(&self) -> TodoId {
        rand::rng().random_range(self.id_range.clone())
    }
}

async fn simulate(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[async_trait]
impl<S: TodoSource> TodoSource for SimulatedTodoSource<S> {
    async fn fetch_todos(&self, limit: u32) -> SourceResult<Vec<Todo>> {
        self.reads.fetch_todos(limit).await
    }

    async fn create_todo(&self, request: &NewTodo) -> SourceResult<Todo> {
        simulate(self.latency.create).await;
        let id = self.next_id();
        debug!("event=simulated_write module=remote status=ok op=create id={id}");
        Ok(request.clone().into_todo(id))
    }

    async fn update_todo(&self, id: TodoId, _patch: &TodoPatch) -> SourceResult<Option<Todo>> {
        simulate(self.latency.update).await;
        debug!("event=simulated_write module=remote status=ok op=update id={id}");
        Ok(None)
    }

    async fn delete_todo(&self, id: TodoId) -> SourceResult<()> {
        simulate(self.latency.delete).await;
        debug!("event=simulated_write module=remote status=ok op=delete id={id}");
        Ok(())
    }
}
