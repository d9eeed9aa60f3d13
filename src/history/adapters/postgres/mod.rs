//! `PostgreSQL` adapter for history persistence.

mod models;
mod repository;

pub use repository::PostgresHistoryRepository;
