//! Persistence adapters for taxonomy records.

pub mod memory;
pub mod postgres;

pub use memory::{InMemoryCategoryRepository, InMemoryProjectRepository};
pub use postgres::{PostgresCategoryRepository, PostgresProjectRepository};
