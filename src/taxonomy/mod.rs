//! Category and project management for Taskhub.
//!
//! Categories and projects are the taxonomy side of the data model: simple
//! named, colored, soft-deletable records linked to tasks through
//! many-to-many join rows owned by the task module. The module follows
//! hexagonal architecture:
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
