//! Port contracts for audit history persistence.

pub mod repository;

pub use repository::{HistoryRepository, HistoryRepositoryError, HistoryRepositoryResult};
