//! `PostgreSQL` history repository.

use super::models::HistoryRow;
use crate::history::domain::{HistoryEntry, HistoryEntryId};
use crate::history::ports::{HistoryRepository, HistoryRepositoryError, HistoryRepositoryResult};
use crate::storage::PgPool;
use crate::storage::postgres::schema::task_history;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed history repository.
#[derive(Debug, Clone)]
pub struct PostgresHistoryRepository {
    pool: PgPool,
}

impl PostgresHistoryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> HistoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> HistoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(HistoryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(HistoryRepositoryError::persistence)?
    }
}

#[async_trait]
impl HistoryRepository for PostgresHistoryRepository {
    async fn append(&self, entry: &HistoryEntry) -> HistoryRepositoryResult<()> {
        let row = HistoryRow::from_domain(entry);
        self.run_blocking(move |connection| {
            diesel::insert_into(task_history::table)
                .values(&row)
                .execute(connection)
                .map_err(HistoryRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn find_by_task(&self, task_id: TaskId) -> HistoryRepositoryResult<Vec<HistoryEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_history::table
                .filter(task_history::task_id.eq(task_id.into_inner()))
                .order(task_history::created_at.desc())
                .select(HistoryRow::as_select())
                .load::<HistoryRow>(connection)
                .map_err(HistoryRepositoryError::persistence)?;
            Ok(rows.into_iter().map(HistoryRow::into_domain).collect())
        })
        .await
    }

    async fn find_all(&self) -> HistoryRepositoryResult<Vec<HistoryEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_history::table
                .order(task_history::created_at.desc())
                .select(HistoryRow::as_select())
                .load::<HistoryRow>(connection)
                .map_err(HistoryRepositoryError::persistence)?;
            Ok(rows.into_iter().map(HistoryRow::into_domain).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: HistoryEntryId) -> HistoryRepositoryResult<HistoryEntry> {
        self.run_blocking(move |connection| {
            let row = task_history::table
                .find(id.into_inner())
                .select(HistoryRow::as_select())
                .first::<HistoryRow>(connection)
                .optional()
                .map_err(HistoryRepositoryError::persistence)?
                .ok_or(HistoryRepositoryError::NotFound(id))?;
            Ok(row.into_domain())
        })
        .await
    }
}
