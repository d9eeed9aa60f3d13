//! In-memory history repository.

use crate::history::domain::{HistoryEntry, HistoryEntryId};
use crate::history::ports::{HistoryRepository, HistoryRepositoryError, HistoryRepositoryResult};
use crate::storage::MemoryDb;
use crate::storage::memory::newest_first;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory implementation of [`HistoryRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryHistoryRepository {
    db: Arc<MemoryDb>,
}

impl InMemoryHistoryRepository {
    /// Creates a repository over the shared in-memory database.
    #[must_use]
    pub const fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(&self, entry: &HistoryEntry) -> HistoryRepositoryResult<()> {
        let mut state = self
            .db
            .write()
            .map_err(HistoryRepositoryError::persistence)?;
        state.task_history.push(entry.clone());
        Ok(())
    }

    async fn find_by_task(&self, task_id: TaskId) -> HistoryRepositoryResult<Vec<HistoryEntry>> {
        let state = self.db.read().map_err(HistoryRepositoryError::persistence)?;
        let matching = state
            .task_history
            .iter()
            .filter(|entry| entry.task_id() == task_id);
        Ok(newest_first(matching.cloned(), HistoryEntry::created_at))
    }

    async fn find_all(&self) -> HistoryRepositoryResult<Vec<HistoryEntry>> {
        let state = self.db.read().map_err(HistoryRepositoryError::persistence)?;
        Ok(newest_first(
            state.task_history.iter().cloned(),
            HistoryEntry::created_at,
        ))
    }

    async fn find_by_id(&self, id: HistoryEntryId) -> HistoryRepositoryResult<HistoryEntry> {
        let state = self.db.read().map_err(HistoryRepositoryError::persistence)?;
        state
            .task_history
            .iter()
            .find(|entry| entry.id() == id)
            .cloned()
            .ok_or(HistoryRepositoryError::NotFound(id))
    }
}
