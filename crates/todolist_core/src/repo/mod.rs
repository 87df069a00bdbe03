//! Record storage for the session.
//!
//! # Responsibility
//! - Hold the authoritative in-memory todo sequence.
//!
//! # Invariants
//! - Only the pipelines mutate the store; presentation code reads snapshots.

pub mod todo_store;
