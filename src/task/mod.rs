//! Task management for Taskhub.
//!
//! The task module is the centre of the data model: tasks carry a required
//! creator, a status and priority, optional due dates, many-to-many links to
//! categories and projects, a replaceable assignment set, and a comment
//! thread. Relation wiring at creation and the full update (scalar patch plus
//! set replacement) are single atomic commands; field-level changes are
//! recorded to the audit history. The module follows hexagonal architecture:
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
