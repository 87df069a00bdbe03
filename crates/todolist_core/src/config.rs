//! Client configuration.
//!
//! # Responsibility
//! - Carry the remote endpoint, request bounds and simulated write latency.
//! - Parse configuration from JSON and reject unusable values.
//!
//! # Invariants
//! - A validated config has an http(s) base URL, a non-zero timeout and a
//!   non-zero page limit.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_PAGE_LIMIT: u32 = 10;
pub const DEFAULT_CREATE_LATENCY_MS: u64 = 500;
/// Shared by update and delete.
pub const DEFAULT_MUTATION_LATENCY_MS: u64 = 300;

/// Recognized configuration options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    pub page_limit: u32,
    pub create_latency_ms: u64,
    pub update_latency_ms: u64,
    pub delete_latency_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            page_limit: DEFAULT_PAGE_LIMIT,
            create_latency_ms: DEFAULT_CREATE_LATENCY_MS,
            update_latency_ms: DEFAULT_MUTATION_LATENCY_MS,
            delete_latency_ms: DEFAULT_MUTATION_LATENCY_MS,
        }
    }
}

impl ClientConfig {
    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    /// - `Parse` on malformed JSON or wrongly typed fields.
    /// - Any `validate()` error.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(base.to_string()));
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.page_limit == 0 {
            return Err(ConfigError::ZeroPageLimit);
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn create_latency(&self) -> Duration {
        Duration::from_millis(self.create_latency_ms)
    }

    pub fn update_latency(&self) -> Duration {
        Duration::from_millis(self.update_latency_ms)
    }

    pub fn delete_latency(&self) -> Duration {
        Duration::from_millis(self.delete_latency_ms)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    EmptyBaseUrl,
    UnsupportedScheme(String),
    ZeroTimeout,
    ZeroPageLimit,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid config document: {message}"),
            Self::EmptyBaseUrl => write!(f, "base_url cannot be empty"),
            Self::UnsupportedScheme(url) => {
                write!(f, "base_url must use http or https, got `{url}`")
            }
            Self::ZeroTimeout => write!(f, "request_timeout_ms must be greater than zero"),
            Self::ZeroPageLimit => write!(f, "page_limit must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}
