//! Repository port for the append-only audit history.

use crate::history::domain::{HistoryEntry, HistoryEntryId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for history repository operations.
pub type HistoryRepositoryResult<T> = Result<T, HistoryRepositoryError>;

/// Audit history persistence contract.
///
/// The log is append-only: there are no update or delete operations.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Appends an entry to the log.
    async fn append(&self, entry: &HistoryEntry) -> HistoryRepositoryResult<()>;

    /// Lists the entries for a task, newest-first.
    async fn find_by_task(&self, task_id: TaskId) -> HistoryRepositoryResult<Vec<HistoryEntry>>;

    /// Lists all entries, newest-first.
    async fn find_all(&self) -> HistoryRepositoryResult<Vec<HistoryEntry>>;

    /// Finds an entry by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryRepositoryError::NotFound`] when the entry is
    /// absent.
    async fn find_by_id(&self, id: HistoryEntryId) -> HistoryRepositoryResult<HistoryEntry>;
}

/// Errors returned by history repository implementations.
#[derive(Debug, Clone, Error)]
pub enum HistoryRepositoryError {
    /// The entry was not found.
    #[error("history entry not found: {0}")]
    NotFound(HistoryEntryId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl HistoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
