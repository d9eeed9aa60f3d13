//! Append-only audit history for Taskhub tasks.
//!
//! History entries record field-level changes to tasks: the changed field,
//! its old and new values, an action label, and the acting user. Entries are
//! never updated or deleted. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
