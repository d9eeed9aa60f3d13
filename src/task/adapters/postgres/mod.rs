//! `PostgreSQL` adapter for task persistence and joined reads.

mod models;
mod repository;

pub(crate) use models::{AssignmentRow, TaskRow};
pub use repository::PostgresTaskRepository;
