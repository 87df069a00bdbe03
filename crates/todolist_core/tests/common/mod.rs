#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use todolist_core::{NewTodo, SourceError, SourceResult, Todo, TodoId, TodoPatch, TodoSource};
use tokio::sync::Notify;

/// Scriptable in-process source.
pub struct FakeSource {
    fetch_result: Mutex<SourceResult<Vec<Todo>>>,
    fetch_delay: Duration,
    write_error: Mutex<Option<SourceError>>,
    gate: Option<Arc<Notify>>,
    fetch_gate: Mutex<Option<Arc<Notify>>>,
    next_id: AtomicI64,
    pub fetch_calls: AtomicUsize,
    pub write_calls: AtomicUsize,
}

impl FakeSource {
    pub fn new(fetch_result: SourceResult<Vec<Todo>>) -> Self {
        Self {
            fetch_result: Mutex::new(fetch_result),
            fetch_delay: Duration::ZERO,
            write_error: Mutex::new(None),
            gate: None,
            fetch_gate: Mutex::new(None),
            next_id: AtomicI64::new(1_000),
            fetch_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
        }
    }

    pub fn serving(records: Vec<Todo>) -> Self {
        Self::new(Ok(records))
    }

    /// Reads wait `delay` before answering.
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    /// Writes wait until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Later reads wait until `gate` is notified.
    pub fn gate_fetches(&self, gate: Arc<Notify>) {
        *self.fetch_gate.lock() = Some(gate);
    }

    pub fn set_fetch_result(&self, result: SourceResult<Vec<Todo>>) {
        *self.fetch_result.lock() = result;
    }

    pub fn fail_writes(&self, err: SourceError) {
        *self.write_error.lock() = Some(err);
    }

    pub fn fail_writes_clear(&self) {
        *self.write_error.lock() = None;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    async fn write(&self) -> SourceResult<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.write_error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TodoSource for FakeSource {
    async fn fetch_todos(&self, limit: u32) -> SourceResult<Vec<Todo>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.fetch_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }
        let result = self.fetch_result.lock().clone();
        result.map(|records| records.into_iter().take(limit as usize).collect())
    }

    async fn create_todo(&self, request: &NewTodo) -> SourceResult<Todo> {
        self.write().await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(request.clone().into_todo(id))
    }

    async fn update_todo(&self, _id: TodoId, _patch: &TodoPatch) -> SourceResult<Option<Todo>> {
        self.write().await?;
        Ok(None)
    }

    async fn delete_todo(&self, _id: TodoId) -> SourceResult<()> {
        self.write().await
    }
}

pub fn todo(id: TodoId, title: &str, completed: bool) -> Todo {
    Todo::new(id, title, completed, 1)
}

pub fn transport_failure() -> SourceError {
    SourceError::Transport("Failed to fetch todos".to_string())
}
