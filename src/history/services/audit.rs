//! Audit history read service.
//!
//! Entries are written by the task update path; this service only records
//! and reads. The log is append-only and immune to soft-deletion.

use crate::history::domain::{HistoryEntry, HistoryEntryId};
use crate::history::ports::{HistoryRepository, HistoryRepositoryError};
use crate::task::domain::TaskId;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for history operations.
#[derive(Debug, Error)]
pub enum HistoryServiceError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] HistoryRepositoryError),
}

/// Result type for history service operations.
pub type HistoryServiceResult<T> = Result<T, HistoryServiceError>;

/// Audit history service.
#[derive(Clone)]
pub struct HistoryService<R>
where
    R: HistoryRepository,
{
    history: Arc<R>,
}

impl<R> HistoryService<R>
where
    R: HistoryRepository,
{
    /// Creates a new history service.
    #[must_use]
    pub const fn new(history: Arc<R>) -> Self {
        Self { history }
    }

    /// Appends an entry to the log.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the append fails.
    pub async fn record(&self, entry: &HistoryEntry) -> HistoryServiceResult<()> {
        self.history.append(entry).await?;
        Ok(())
    }

    /// Lists the entries for a task, newest-first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn find_by_task(&self, task_id: TaskId) -> HistoryServiceResult<Vec<HistoryEntry>> {
        Ok(self.history.find_by_task(task_id).await?)
    }

    /// Lists all entries, newest-first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn find_all(&self) -> HistoryServiceResult<Vec<HistoryEntry>> {
        Ok(self.history.find_all().await?)
    }

    /// Finds an entry by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryRepositoryError::NotFound`] (wrapped) when the entry
    /// is absent.
    pub async fn find_one(&self, id: HistoryEntryId) -> HistoryServiceResult<HistoryEntry> {
        Ok(self.history.find_by_id(id).await?)
    }
}
