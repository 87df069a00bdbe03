//! Todo domain model.
//!
//! # Responsibility
//! - Define the record held by the store and exchanged with the remote source.
//! - Define create/update request shapes and their validation rules.
//!
//! # Invariants
//! - `title` of a create request is non-empty after trimming.
//! - `owner` of a create request is a positive integer.
//! - A patch only touches the fields it carries; absent fields stay unchanged.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Identifier assigned by the source of truth.
pub type TodoId = i64;

/// Reference to an external user identity.
pub type OwnerId = i64;

/// Minimum title length accepted on create, counted in characters.
pub const TITLE_MIN_CHARS: usize = 3;
/// Maximum title length accepted on create/update, counted in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Secondary classification tag used by the status selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    Primary,
    Secondary,
}

impl TodoStatus {
    /// Stable wire value (`PRIMARY|SECONDARY`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::Secondary => "SECONDARY",
        }
    }

    /// Parses a status tag case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PRIMARY" => Some(Self::Primary),
            "SECONDARY" => Some(Self::Secondary),
            _ => None,
        }
    }
}

impl Display for TodoStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical todo record.
///
/// Wire shape follows the remote schema, so `owner` travels as `userId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub owner: OwnerId,
    /// Absent means unclassified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TodoStatus>,
    /// Optional long-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Todo {
    /// Creates an unclassified record without description.
    pub fn new(id: TodoId, title: impl Into<String>, completed: bool, owner: OwnerId) -> Self {
        Self {
            id,
            title: title.into(),
            completed,
            owner,
            status: None,
            description: None,
        }
    }

    /// Builder-style helper to attach a status tag.
    pub fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Create request. The id is assigned by whoever performs the write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    #[serde(rename = "userId")]
    pub owner: OwnerId,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, completed: bool, owner: OwnerId) -> Self {
        Self {
            title: title.into(),
            completed,
            owner,
        }
    }

    /// Checks create-time invariants before any write is attempted.
    ///
    /// # Errors
    /// - `EmptyTitle` when the trimmed title is empty.
    /// - `TitleTooShort` / `TitleTooLong` outside `TITLE_MIN_CHARS..=TITLE_MAX_CHARS`.
    /// - `InvalidOwner` when `owner <= 0`.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        validate_title(&self.title, TITLE_MIN_CHARS)?;
        if self.owner <= 0 {
            return Err(TodoValidationError::InvalidOwner(self.owner));
        }
        Ok(())
    }

    /// Materializes the full record once an id is known.
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo::new(id, self.title, self.completed, self.owner)
    }
}

/// Partial update. Only `Some` fields are merged over the stored record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TodoStatus>,
}

impl TodoPatch {
    /// Patch that only flips the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Patch that only replaces the title.
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none() && self.status.is_none()
    }

    /// Validates carried fields. An empty patch is valid.
    pub fn validate(&self) -> Result<(), TodoValidationError> {
        match self.title.as_deref() {
            Some(title) => validate_title(title, 1),
            None => Ok(()),
        }
    }

    /// Merges carried fields over `todo`, last write wins per field.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(status) = self.status {
            todo.status = Some(status);
        }
    }
}

fn validate_title(title: &str, min_chars: usize) -> Result<(), TodoValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(TodoValidationError::EmptyTitle);
    }
    let chars = title.chars().count();
    if chars > TITLE_MAX_CHARS {
        return Err(TodoValidationError::TitleTooLong {
            max: TITLE_MAX_CHARS,
            actual: chars,
        });
    }
    if chars < min_chars {
        return Err(TodoValidationError::TitleTooShort {
            min: min_chars,
            actual: chars,
        });
    }
    Ok(())
}

/// Request validation errors raised before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TodoValidationError {
    EmptyTitle,
    TitleTooShort { min: usize, actual: usize },
    TitleTooLong { max: usize, actual: usize },
    InvalidOwner(OwnerId),
}

impl Display for TodoValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title is required"),
            Self::TitleTooShort { min, actual } => {
                write!(f, "title must be at least {min} characters, got {actual}")
            }
            Self::TitleTooLong { max, actual } => {
                write!(f, "title must be at most {max} characters, got {actual}")
            }
            Self::InvalidOwner(owner) => write!(f, "valid owner id is required, got {owner}"),
        }
    }
}

impl Error for TodoValidationError {}
