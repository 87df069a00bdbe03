//! Domain model for the todo cache.
//!
//! # Responsibility
//! - Define the canonical todo record and its create/update request shapes.
//! - Define the filter selectors consumed by the derived view.
//!
//! # Invariants
//! - `Todo::id` is assigned by the source of truth, never by callers.
//! - `Todo::owner` is a positive user reference.

pub mod filter;
pub mod todo;
