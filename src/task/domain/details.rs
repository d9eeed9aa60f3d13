//! Joined read shapes returned by task queries.

use super::{Task, TaskAssignment};
use crate::comment::domain::Comment;
use crate::identity::domain::{User, UserId};
use crate::taxonomy::domain::{Category, Project};
use serde::{Deserialize, Serialize};

/// Flattened user fields attached to joined task reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login email.
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            email: user.email().as_str().to_owned(),
        }
    }
}

/// An assignment row paired with its assignee summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentWithUser {
    /// The assignment row.
    pub assignment: TaskAssignment,
    /// Flattened assignee fields.
    pub assignee: UserSummary,
}

/// The standard joined task shape: creator summary, categories, assignments
/// with assignee summaries, and projects.
///
/// Creator and assignee summaries resolve through unscoped user reads, so a
/// soft-deleted creator never hides their tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithRelations {
    /// The task record.
    pub task: Task,
    /// Flattened creator fields.
    pub created_by: UserSummary,
    /// Linked categories (non-deleted).
    pub categories: Vec<Category>,
    /// Assignment rows (non-deleted) with assignee summaries.
    pub assignments: Vec<AssignmentWithUser>,
    /// Linked projects (non-deleted).
    pub projects: Vec<Project>,
}

/// The single-task shape: the standard joins plus the full comment thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDetails {
    /// The task with its standard joins.
    pub summary: TaskWithRelations,
    /// Comment thread in oldest-first order.
    pub comments: Vec<Comment>,
}
