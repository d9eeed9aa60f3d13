//! Repository port for comment persistence.

use crate::comment::domain::{Comment, CommentId};
use crate::task::domain::TaskId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Comment persistence contract.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    async fn insert(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Persists changes to an existing comment, including soft-deletion
    /// stamps.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] when no row matches.
    async fn update(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Finds a non-deleted comment by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] when the row is absent
    /// or soft-deleted.
    async fn find_by_id(&self, id: CommentId) -> CommentRepositoryResult<Comment>;

    /// Lists all non-deleted comments, newest-created first.
    async fn find_all(&self) -> CommentRepositoryResult<Vec<Comment>>;

    /// Lists the non-deleted comment thread of a task, oldest-first.
    async fn find_by_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// The comment was not found (absent or soft-deleted).
    #[error("comment not found: {0}")]
    NotFound(CommentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
