//! User and role management for Taskhub.
//!
//! This module owns the identity side of the data model: user records with
//! hashed credentials, role records, and the replaceable user-to-role
//! assignment set. Password hashing sits behind a port so services stay
//! deterministic under test. The module follows hexagonal architecture:
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
