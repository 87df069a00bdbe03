//! HTTP-backed todo source.
//!
//! # Responsibility
//! - Issue `GET /todos?_limit=N` for reads.
//! - Issue `POST /todos`, `PATCH /todos/{id}`, `DELETE /todos/{id}` for writes.
//!
//! # Invariants
//! - Every request is bounded by the configured timeout.
//! - Non-success statuses are failures, except `404` on update/delete which
//!   mirrors the store's unknown-id no-op.
//!
//! # Side effects
//! - Emits `http_request` logging events with duration and status.

use crate::config::ClientConfig;
use crate::model::todo::{NewTodo, Todo, TodoId, TodoPatch};
use crate::remote::source::{SourceError, SourceResult, TodoSource};
use async_trait::async_trait;
use log::{error, info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};

const TODOS_PATH: &str = "/todos";
const JSON_MIME: &str = "application/json";

/// Todo source speaking the JSON REST contract.
#[derive(Debug, Clone)]
pub struct HttpTodoSource {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpTodoSource {
    /// Builds a client bound to `base_url` with a per-request `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SourceError::Transport(err.to_string()))?;
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }

    pub fn from_config(config: &ClientConfig) -> SourceResult<Self> {
        Self::new(config.base_url.as_str(), config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header(CONTENT_TYPE, JSON_MIME)
            .header(ACCEPT, JSON_MIME)
    }

    async fn send(&self, op: &'static str, builder: RequestBuilder) -> SourceResult<Response> {
        let started_at = Instant::now();
        info!("event=http_request module=remote status=start op={op}");

        let result = builder.send().await.map_err(|err| self.map_error(err));
        match &result {
            Ok(response) => info!(
                "event=http_request module=remote status=ok op={op} http_status={} duration_ms={}",
                response.status().as_u16(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=http_request module=remote status=error op={op} duration_ms={} error_code={} error={}",
                started_at.elapsed().as_millis(),
                err.code(),
                err
            ),
        }
        result
    }

    async fn decode<T: DeserializeOwned>(&self, response: Response) -> SourceResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }
        let body = response.bytes().await.map_err(|err| self.map_error(err))?;
        serde_json::from_slice(&body).map_err(|err| SourceError::Decode(err.to_string()))
    }

    fn map_error(&self, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout {
                timeout_ms: self.timeout_ms,
            }
        } else if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl TodoSource for HttpTodoSource {
    async fn fetch_todos(&self, limit: u32) -> SourceResult<Vec<Todo>> {
        let builder = self
            .request(Method::GET, TODOS_PATH)
            .query(&[("_limit", limit)]);
        let response = self.send("fetch", builder).await?;
        self.decode(response).await
    }

    async fn create_todo(&self, request: &NewTodo) -> SourceResult<Todo> {
        let builder = self.request(Method::POST, TODOS_PATH).json(request);
        let response = self.send("create", builder).await?;
        self.decode(response).await
    }

    async fn update_todo(&self, id: TodoId, patch: &TodoPatch) -> SourceResult<Option<Todo>> {
        let builder = self
            .request(Method::PATCH, &format!("{TODOS_PATH}/{id}"))
            .json(patch);
        let response = self.send("update", builder).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.decode(response).await.map(Some)
    }

    async fn delete_todo(&self, id: TodoId) -> SourceResult<()> {
        let builder = self.request(Method::DELETE, &format!("{TODOS_PATH}/{id}"));
        let response = self.send("delete", builder).await?;
        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            Ok(())
        } else {
            Err(SourceError::Status(status.as_u16()))
        }
    }
}
