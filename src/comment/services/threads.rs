//! Comment thread service.

use crate::comment::domain::{Comment, CommentDomainError, CommentId, CommentPatch};
use crate::comment::ports::{CommentRepository, CommentRepositoryError};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] CommentDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CommentRepositoryError),
}

/// Result type for comment service operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;

/// Comment thread service.
#[derive(Clone)]
pub struct CommentService<R, C>
where
    R: CommentRepository,
    C: Clock + Send + Sync,
{
    comments: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> CommentService<R, C>
where
    R: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub const fn new(comments: Arc<R>, clock: Arc<C>) -> Self {
        Self { comments, clock }
    }

    /// Creates a comment on `task_id` authored by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the trimmed content is empty.
    pub async fn create(
        &self,
        task_id: TaskId,
        author_id: UserId,
        content: impl Into<String> + Send,
        is_internal: bool,
    ) -> CommentServiceResult<Comment> {
        let comment = Comment::new(task_id, author_id, content, is_internal, &*self.clock)?;
        self.comments.insert(&comment).await?;
        tracing::debug!(comment_id = %comment.id(), task_id = %task_id, "created comment");
        Ok(comment)
    }

    /// Lists all non-deleted comments, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn find_all(&self) -> CommentServiceResult<Vec<Comment>> {
        Ok(self.comments.find_all().await?)
    }

    /// Lists a task's non-deleted comment thread, oldest-first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn find_by_task(&self, task_id: TaskId) -> CommentServiceResult<Vec<Comment>> {
        Ok(self.comments.find_by_task(task_id).await?)
    }

    /// Finds a comment by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] (wrapped) when the
    /// comment is absent or soft-deleted.
    pub async fn find_one(&self, id: CommentId) -> CommentServiceResult<Comment> {
        Ok(self.comments.find_by_id(id).await?)
    }

    /// Applies a partial update to content or internal visibility.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] (wrapped) when the
    /// comment is absent or soft-deleted.
    pub async fn update(&self, id: CommentId, patch: &CommentPatch) -> CommentServiceResult<Comment> {
        let mut comment = self.comments.find_by_id(id).await?;
        comment.apply(patch, &*self.clock);
        self.comments.update(&comment).await?;
        Ok(comment)
    }

    /// Soft-deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] (wrapped) when the
    /// comment is absent or already soft-deleted.
    pub async fn remove(&self, id: CommentId) -> CommentServiceResult<()> {
        let mut comment = self.comments.find_by_id(id).await?;
        comment.mark_deleted(&*self.clock);
        self.comments.update(&comment).await?;
        tracing::debug!(comment_id = %id, "soft-deleted comment");
        Ok(())
    }
}
