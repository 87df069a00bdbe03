//! Core use-case services.
//!
//! # Responsibility
//! - Load the store (`fetch`) and mutate it behind confirmed writes (`mutation`).
//! - Project the store into display lists (`view`, `priority`).
//!
//! # Invariants
//! - Services reach the store only through its `replace`/`apply_*`/`read` surface.

pub mod fetch;
pub mod mutation;
pub mod priority;
pub mod view;
