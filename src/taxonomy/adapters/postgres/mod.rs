//! `PostgreSQL` adapters for taxonomy persistence.

mod category;
mod models;
mod project;

pub use category::PostgresCategoryRepository;
pub use project::PostgresProjectRepository;

pub(crate) use models::{CategoryRow, ProjectRow};
