//! Filter selectors owned by the presentation layer.

use crate::model::todo::{Todo, TodoStatus};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Completion selector (`all|active|completed`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompletionFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl CompletionFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Result<Self, FilterParseError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(FilterParseError::UnknownCompletion(other.to_string())),
        }
    }

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Completed => todo.completed,
        }
    }
}

/// Status selector (`all` or one status tag).
///
/// Unclassified records only pass `All`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TodoStatus),
}

impl StatusFilter {
    pub fn parse(value: &str) -> Result<Self, FilterParseError> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        TodoStatus::parse(trimmed)
            .map(Self::Only)
            .ok_or_else(|| FilterParseError::UnknownStatus(trimmed.to_string()))
    }

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => todo.status == Some(status),
        }
    }
}

impl From<TodoStatus> for StatusFilter {
    fn from(value: TodoStatus) -> Self {
        Self::Only(value)
    }
}

/// Selector parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterParseError {
    UnknownCompletion(String),
    UnknownStatus(String),
}

impl Display for FilterParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCompletion(value) => write!(
                f,
                "unknown completion filter `{value}`; expected all|active|completed"
            ),
            Self::UnknownStatus(value) => write!(
                f,
                "unknown status filter `{value}`; expected all|primary|secondary"
            ),
        }
    }
}

impl Error for FilterParseError {}

#[cfg(test)]
mod tests {
    use super::{CompletionFilter, FilterParseError, StatusFilter};
    use crate::model::todo::TodoStatus;

    #[test]
    fn parse_accepts_known_selectors() {
        assert_eq!(
            CompletionFilter::parse(" Active ").unwrap(),
            CompletionFilter::Active
        );
        assert_eq!(StatusFilter::parse("ALL").unwrap(), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse("primary").unwrap(),
            StatusFilter::Only(TodoStatus::Primary)
        );
    }

    #[test]
    fn parse_rejects_unknown_selectors() {
        assert!(matches!(
            CompletionFilter::parse("done"),
            Err(FilterParseError::UnknownCompletion(value)) if value == "done"
        ));
        assert!(matches!(
            StatusFilter::parse("urgent"),
            Err(FilterParseError::UnknownStatus(_))
        ));
    }
}
