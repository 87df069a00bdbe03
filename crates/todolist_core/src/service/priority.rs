//! Presentational helpers layered on top of the derived view.
//!
//! # Responsibility
//! - Score and sort todos by urgency.
//! - Decide whether a todo may be marked completed.
//! - Produce a display-safe title.
//!
//! These never mutate the store and are optional for consumers.

use crate::model::todo::Todo;
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;

const OPEN_TODO_SCORE: u32 = 10;
const LONG_TITLE_SCORE: u32 = 5;
const LONG_TITLE_CHARS: usize = 50;
const URGENT_KEYWORD_SCORE: u32 = 20;
const URGENT_KEYWORDS: &[&str] = &["urgent", "asap", "critical", "important"];
const BLOCKING_KEYWORDS: &[&str] = &["blocked", "pending approval", "waiting"];

static ANGLE_BRACKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[<>]").expect("valid angle bracket regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Urgency score; higher sorts first.
pub fn priority_score(todo: &Todo) -> u32 {
    let mut score = 0;
    if !todo.completed {
        score += OPEN_TODO_SCORE;
    }
    if todo.title.chars().count() > LONG_TITLE_CHARS {
        score += LONG_TITLE_SCORE;
    }
    let title = todo.title.to_lowercase();
    for keyword in URGENT_KEYWORDS {
        if title.contains(keyword) {
            score += URGENT_KEYWORD_SCORE;
        }
    }
    score
}

/// Stable descending sort by `priority_score`.
pub fn sort_by_priority(todos: &[Todo]) -> Vec<Todo> {
    let mut sorted = todos.to_vec();
    sorted.sort_by_key(|todo| Reverse(priority_score(todo)));
    sorted
}

/// False when the title names a blocking condition.
pub fn can_complete(todo: &Todo) -> bool {
    let title = todo.title.to_lowercase();
    !BLOCKING_KEYWORDS
        .iter()
        .any(|keyword| title.contains(keyword))
}

/// Trims, strips `<`/`>`, and collapses whitespace runs.
pub fn sanitize_title(title: &str) -> String {
    let stripped = ANGLE_BRACKET_RE.replace_all(title.trim(), "");
    WHITESPACE_RE.replace_all(&stripped, " ").into_owned()
}

/// Todo plus computed display properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTodo {
    pub todo: Todo,
    pub priority_score: u32,
    pub can_complete: bool,
    pub sanitized_title: String,
}

impl From<&Todo> for DisplayTodo {
    fn from(todo: &Todo) -> Self {
        Self {
            todo: todo.clone(),
            priority_score: priority_score(todo),
            can_complete: can_complete(todo),
            sanitized_title: sanitize_title(&todo.title),
        }
    }
}
