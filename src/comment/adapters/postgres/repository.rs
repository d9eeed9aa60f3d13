//! `PostgreSQL` comment repository.

use super::models::CommentRow;
use crate::comment::domain::{Comment, CommentId};
use crate::comment::ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
use crate::storage::PgPool;
use crate::storage::postgres::schema::comments;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CommentRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CommentRepositoryError::persistence)?
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn insert(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let row = CommentRow::from_domain(comment);
        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let id = comment.id();
        let row = CommentRow::from_domain(comment);
        self.run_blocking(move |connection| {
            let updated = diesel::update(comments::table.find(id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(CommentRepositoryError::persistence)?;
            if updated == 0 {
                return Err(CommentRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Comment> {
        self.run_blocking(move |connection| {
            let row = comments::table
                .filter(comments::id.eq(id.into_inner()))
                .filter(comments::deleted_at.is_null())
                .select(CommentRow::as_select())
                .first::<CommentRow>(connection)
                .optional()
                .map_err(CommentRepositoryError::persistence)?
                .ok_or(CommentRepositoryError::NotFound(id))?;
            Ok(row.into_domain())
        })
        .await
    }

    async fn find_all(&self) -> CommentRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .filter(comments::deleted_at.is_null())
                .order(comments::created_at.desc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(rows.into_iter().map(CommentRow::into_domain).collect())
        })
        .await
    }

    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .filter(comments::task_id.eq(task_id.into_inner()))
                .filter(comments::deleted_at.is_null())
                .order(comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            Ok(rows.into_iter().map(CommentRow::into_domain).collect())
        })
        .await
    }
}
