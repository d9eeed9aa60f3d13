//! Comment threads for Taskhub tasks.
//!
//! Comments belong to exactly one task and one author, carry an internal
//! visibility flag, and are soft-deletable. The module follows hexagonal
//! architecture:
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
