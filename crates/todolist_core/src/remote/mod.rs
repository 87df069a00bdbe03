//! Remote todo sources.
//!
//! # Responsibility
//! - Define the async read/write contract against the remote source of truth.
//! - Provide an HTTP implementation and a locally simulated write layer.
//!
//! # Invariants
//! - Source implementations never touch the record store.
//! - Unknown-id update/delete are not failures at this boundary.

pub mod http;
pub mod simulated;
pub mod source;
