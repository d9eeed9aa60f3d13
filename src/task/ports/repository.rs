//! Repository port for task persistence, joined queries, and atomic
//! relation-set replacement.

use crate::identity::domain::UserId;
use crate::task::domain::{
    Task, TaskAssignment, TaskDetails, TaskFilters, TaskId, TaskWithRelations,
};
use crate::taxonomy::domain::{CategoryId, ProjectId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Visibility of soft-deleted assignment rows in the per-user lookup.
///
/// Whether a removed assignment should still surface the task to its former
/// assignee is a policy question, so both behaviors are first-class and the
/// caller picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentScope {
    /// Exclude soft-deleted assignment rows.
    ActiveOnly,
    /// Include soft-deleted assignment rows.
    IncludeRemoved,
}

/// Replacement assignment set for one task.
///
/// The previous active rows are soft-deleted at `removed_at` and the given
/// rows inserted, so `AssignmentScope::IncludeRemoved` can still surface the
/// superseded assignments.
#[derive(Debug, Clone)]
pub struct AssignmentReplacement {
    /// Replacement assignment rows, already constructed by the service.
    pub rows: Vec<TaskAssignment>,
    /// Soft-deletion stamp written onto the superseded rows.
    pub removed_at: DateTime<Utc>,
}

/// Full-replacement relation sets carried by a task update.
///
/// `None` leaves a set untouched; an empty replacement clears the set.
/// Category and project links are plain join rows and are rewritten in
/// place; assignments are soft-deleted and recreated.
#[derive(Debug, Clone, Default)]
pub struct RelationReplacement {
    /// Replacement assignment set.
    pub assignments: Option<AssignmentReplacement>,
    /// Replacement category link set.
    pub categories: Option<Vec<CategoryId>>,
    /// Replacement project link set.
    pub projects: Option<Vec<ProjectId>>,
}

impl RelationReplacement {
    /// A replacement that touches no relation set.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            assignments: None,
            categories: None,
            projects: None,
        }
    }
}

/// Task persistence contract.
///
/// Multi-statement commands (creation with relation wiring, update with
/// relation replacement) are atomic: either every statement applies or none
/// does.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task together with its assignment rows and category and
    /// project links, in one transaction.
    async fn create(
        &self,
        task: &Task,
        assignments: &[TaskAssignment],
        category_ids: &[CategoryId],
        project_ids: &[ProjectId],
    ) -> TaskRepositoryResult<()>;

    /// Persists a changed task and replaces the relation sets present in
    /// `relations`, in one transaction.
    ///
    /// Locates the row unscoped so soft-deletion stamps can be written.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task row is
    /// absent.
    async fn update(
        &self,
        task: &Task,
        relations: &RelationReplacement,
    ) -> TaskRepositoryResult<()>;

    /// Lists non-deleted tasks matching the filters, newest-created first,
    /// in the standard joined shape.
    async fn find_all(&self, filters: &TaskFilters) -> TaskRepositoryResult<Vec<TaskWithRelations>>;

    /// Finds a non-deleted task with the standard joins plus its comment
    /// thread.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the row is absent or
    /// soft-deleted.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<TaskDetails>;

    /// Finds a task by primary key regardless of soft-deletion, for audit
    /// reads.
    ///
    /// Returns `None` only when no row exists at all.
    async fn find_by_id_unscoped(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Lists non-deleted tasks created by the given user, newest-created
    /// first.
    async fn find_by_creator(
        &self,
        creator_id: UserId,
    ) -> TaskRepositoryResult<Vec<TaskWithRelations>>;

    /// Lists non-deleted tasks whose id is in `ids`, newest-created first.
    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<TaskWithRelations>>;

    /// Returns the assignment rows for a user under the given scope.
    ///
    /// An empty result is not an error.
    async fn assignments_for_user(
        &self,
        user_id: UserId,
        scope: AssignmentScope,
    ) -> TaskRepositoryResult<Vec<TaskAssignment>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found (absent or soft-deleted).
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for TaskRepositoryError {
    // Transaction closures need this conversion; NotFound mapping happens at
    // the statement level, so every stray diesel error is a persistence
    // failure.
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
