//! Taskhub: task-management data core.
//!
//! This crate provides the data model and typed query/command operations for
//! a task-management system: tasks organized by categories and projects,
//! assigned to role-based users, with comment threads and an append-only
//! audit history. HTTP routing and authentication are external collaborators;
//! every operation that needs an actor receives the actor identifier as an
//! explicit parameter.
//!
//! # Architecture
//!
//! Taskhub follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`identity`]: Users, roles, and role assignment
//! - [`taxonomy`]: Categories and projects
//! - [`task`]: Tasks, assignments, and relation sets
//! - [`comment`]: Per-task comment threads
//! - [`history`]: Append-only field-change audit log
//! - [`storage`]: Shared in-memory and `PostgreSQL` storage backends

pub mod comment;
pub mod history;
pub mod identity;
pub mod storage;
pub mod task;
pub mod taxonomy;
