//! Diesel row model for comment persistence.

use crate::comment::domain::{Comment, CommentId, PersistedCommentData};
use crate::identity::domain::UserId;
use crate::storage::postgres::schema::comments;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for the `comments` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = comments)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub author_id: uuid::Uuid,
    pub content: String,
    pub is_internal: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CommentRow {
    /// Builds a row from the domain aggregate.
    pub(crate) fn from_domain(comment: &Comment) -> Self {
        Self {
            id: comment.id().into_inner(),
            task_id: comment.task_id().into_inner(),
            author_id: comment.author_id().into_inner(),
            content: comment.content().to_owned(),
            is_internal: comment.is_internal(),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
            deleted_at: comment.deleted_at(),
        }
    }

    /// Reconstructs the domain aggregate.
    pub(crate) fn into_domain(self) -> Comment {
        Comment::from_persisted(PersistedCommentData {
            id: CommentId::from_uuid(self.id),
            task_id: TaskId::from_uuid(self.task_id),
            author_id: UserId::from_uuid(self.author_id),
            content: self.content,
            is_internal: self.is_internal,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}
