//! In-memory comment repository.

use crate::comment::domain::{Comment, CommentId};
use crate::comment::ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult};
use crate::storage::MemoryDb;
use crate::storage::memory::newest_first;
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory implementation of [`CommentRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryCommentRepository {
    db: Arc<MemoryDb>,
}

impl InMemoryCommentRepository {
    /// Creates a repository over the shared in-memory database.
    #[must_use]
    pub const fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn insert(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut state = self
            .db
            .write()
            .map_err(CommentRepositoryError::persistence)?;
        state.comments.push(comment.clone());
        Ok(())
    }

    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut state = self
            .db
            .write()
            .map_err(CommentRepositoryError::persistence)?;
        let row = state
            .comments
            .iter_mut()
            .find(|row| row.id() == comment.id())
            .ok_or(CommentRepositoryError::NotFound(comment.id()))?;
        *row = comment.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Comment> {
        let state = self.db.read().map_err(CommentRepositoryError::persistence)?;
        state
            .comments
            .iter()
            .find(|comment| comment.id() == id && !comment.is_deleted())
            .cloned()
            .ok_or(CommentRepositoryError::NotFound(id))
    }

    async fn find_all(&self) -> CommentRepositoryResult<Vec<Comment>> {
        let state = self.db.read().map_err(CommentRepositoryError::persistence)?;
        let live = state.comments.iter().filter(|comment| !comment.is_deleted());
        Ok(newest_first(live.cloned(), Comment::created_at))
    }

    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        let state = self.db.read().map_err(CommentRepositoryError::persistence)?;
        let mut thread: Vec<Comment> = state
            .comments
            .iter()
            .filter(|comment| comment.task_id() == task_id && !comment.is_deleted())
            .cloned()
            .collect();
        thread.sort_by_key(Comment::created_at);
        Ok(thread)
    }
}
