//! Service layer for the audit history.

mod audit;

pub use audit::{HistoryService, HistoryServiceError, HistoryServiceResult};
