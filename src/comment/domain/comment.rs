//! Comment aggregate.

use super::{CommentDomainError, CommentId};
use crate::identity::domain::UserId;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Comment aggregate root: one entry in a task's thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author_id: UserId,
    content: String,
    is_internal: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone)]
pub struct PersistedCommentData {
    /// Persisted comment identifier.
    pub id: CommentId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted author reference.
    pub author_id: UserId,
    /// Persisted text content.
    pub content: String,
    /// Persisted internal-visibility flag.
    pub is_internal: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Partial update for a comment; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CommentPatch {
    /// Replacement text content.
    pub content: Option<String>,
    /// Replacement internal-visibility flag.
    pub is_internal: Option<bool>,
}

impl Comment {
    /// Creates a new comment authored by `author_id` on `task_id`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyContent`] when the trimmed content
    /// is empty.
    pub fn new(
        task_id: TaskId,
        author_id: UserId,
        content: impl Into<String>,
        is_internal: bool,
        clock: &impl Clock,
    ) -> Result<Self, CommentDomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(CommentDomainError::EmptyContent);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: CommentId::new(),
            task_id,
            author_id,
            content,
            is_internal,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            author_id: data.author_id,
            content: data.content,
            is_internal: data.is_internal,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the task reference.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author reference.
    #[must_use]
    pub const fn author_id(&self) -> UserId {
        self.author_id
    }

    /// Returns the text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the internal-visibility flag.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        self.is_internal
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the soft-deletion timestamp, if any.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the comment has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies a partial update.
    pub fn apply(&mut self, patch: &CommentPatch, clock: &impl Clock) {
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(is_internal) = patch.is_internal {
            self.is_internal = is_internal;
        }
        self.updated_at = clock.utc();
    }

    /// Soft-deletes the comment by stamping the deletion timestamp.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
    }
}
