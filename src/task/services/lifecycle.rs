//! Task lifecycle orchestration service.
//!
//! Commands that touch relation sets hand the repository everything needed
//! for a single transaction; scalar updates record one audit entry per
//! changed field, attributed to the acting user.

use crate::history::domain::HistoryEntry;
use crate::history::ports::{HistoryRepository, HistoryRepositoryError};
use crate::identity::domain::UserId;
use crate::task::domain::{
    Task, TaskAssignment, TaskChangeSet, TaskDetails, TaskDomainError, TaskDraft, TaskFilters,
    TaskId, TaskWithRelations,
};
use crate::task::ports::{
    AssignmentReplacement, AssignmentScope, RelationReplacement, TaskRepository,
    TaskRepositoryError,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Audit history could not be recorded.
    #[error(transparent)]
    History(#[from] HistoryRepositoryError),
}

/// Result type for task lifecycle service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskService<R, H, C>
where
    R: TaskRepository,
    H: HistoryRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    history: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> TaskService<R, H, C>
where
    R: TaskRepository,
    H: HistoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, history: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            history,
            clock,
        }
    }

    /// Creates a task owned by `creator_id`, wiring one assignment row per
    /// assignee and linking categories and projects in the same transaction
    /// as the task row.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence fails.
    pub async fn create(&self, draft: TaskDraft, creator_id: UserId) -> TaskServiceResult<TaskDetails> {
        let task = Task::new(
            draft.title,
            draft.description,
            draft.status.unwrap_or_default(),
            draft.due_date,
            draft.priority.unwrap_or_default(),
            creator_id,
            &*self.clock,
        );
        let assignments: Vec<TaskAssignment> = draft
            .assignee_ids
            .iter()
            .map(|assignee_id| TaskAssignment::new(task.id(), *assignee_id, &*self.clock))
            .collect();

        self.tasks
            .create(&task, &assignments, &draft.category_ids, &draft.project_ids)
            .await?;
        tracing::debug!(
            task_id = %task.id(),
            assignees = assignments.len(),
            "created task"
        );
        Ok(self.tasks.find_by_id(task.id()).await?)
    }

    /// Lists non-deleted tasks matching the filters, newest-created first,
    /// in the standard joined shape.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn find_all(&self, filters: &TaskFilters) -> TaskServiceResult<Vec<TaskWithRelations>> {
        Ok(self.tasks.find_all(filters).await?)
    }

    /// Finds a task with the standard joins plus its comment thread.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task is
    /// absent or soft-deleted.
    pub async fn find_one(&self, id: TaskId) -> TaskServiceResult<TaskDetails> {
        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Applies a change set attributed to `actor_id`: scalar patches plus
    /// full replacement of any relation set present, all in one transaction.
    /// One audit entry is recorded per scalar field whose value actually
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task is
    /// absent or soft-deleted.
    pub async fn update(
        &self,
        id: TaskId,
        changes: &TaskChangeSet,
        actor_id: UserId,
    ) -> TaskServiceResult<TaskDetails> {
        let details = self.tasks.find_by_id(id).await?;
        let mut task = details.summary.task;

        let field_changes = task.apply(changes, &*self.clock);
        let relations = RelationReplacement {
            assignments: changes.assignee_ids.as_ref().map(|assignee_ids| {
                AssignmentReplacement {
                    rows: assignee_ids
                        .iter()
                        .map(|assignee_id| TaskAssignment::new(id, *assignee_id, &*self.clock))
                        .collect(),
                    removed_at: self.clock.utc(),
                }
            }),
            categories: changes.category_ids.clone(),
            projects: changes.project_ids.clone(),
        };
        self.tasks.update(&task, &relations).await?;

        for change in field_changes {
            let entry = HistoryEntry::from_change(id, actor_id, change, &*self.clock);
            self.history.append(&entry).await?;
        }
        tracing::debug!(task_id = %id, actor_id = %actor_id, "updated task");

        Ok(self.tasks.find_by_id(id).await?)
    }

    /// Soft-deletes a task. Assignment rows, links, and comments are left in
    /// place; the deletion scope hides them through the task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] (wrapped) when the task is
    /// absent or already soft-deleted.
    pub async fn remove(&self, id: TaskId) -> TaskServiceResult<()> {
        let details = self.tasks.find_by_id(id).await?;
        let mut task = details.summary.task;
        task.mark_deleted(&*self.clock);
        self.tasks
            .update(&task, &RelationReplacement::none())
            .await?;
        tracing::debug!(task_id = %id, "soft-deleted task");
        Ok(())
    }

    /// Lists non-deleted tasks created by the given user, newest-created
    /// first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn find_by_user(
        &self,
        creator_id: UserId,
    ) -> TaskServiceResult<Vec<TaskWithRelations>> {
        Ok(self.tasks.find_by_creator(creator_id).await?)
    }

    /// Lists the tasks assigned to a user under the given scope. Soft-deleted
    /// tasks are excluded regardless of scope; the scope only governs
    /// assignment rows. An empty list is not an error.
    ///
    /// # Errors
    ///
    /// Returns a repository error when a lookup fails.
    pub async fn find_assigned_to_user(
        &self,
        user_id: UserId,
        scope: AssignmentScope,
    ) -> TaskServiceResult<Vec<TaskWithRelations>> {
        let assignments = self.tasks.assignments_for_user(user_id, scope).await?;
        let mut task_ids: Vec<TaskId> = Vec::with_capacity(assignments.len());
        for assignment in &assignments {
            if !task_ids.contains(&assignment.task_id()) {
                task_ids.push(assignment.task_id());
            }
        }
        Ok(self.tasks.find_by_ids(&task_ids).await?)
    }
}
