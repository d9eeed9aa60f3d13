//! Diesel row models for task persistence.

use crate::identity::domain::UserId;
use crate::storage::postgres::schema::{task_assignments, task_categories, task_projects, tasks};
use crate::task::domain::{
    AssignmentId, AssignmentStatus, PersistedAssignmentData, PersistedTaskData, Priority, Task,
    TaskAssignment, TaskDomainError, TaskId, TaskStatus, TaskTitle,
};
use crate::task::ports::TaskRepositoryError;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for the `tasks` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskRow {
    pub id: uuid::Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: i32,
    pub created_by: uuid::Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TaskRow {
    /// Builds a row from the domain aggregate.
    pub(crate) fn from_domain(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status().as_str().to_owned(),
            due_date: task.due_date(),
            priority: task.priority().value(),
            created_by: task.created_by().into_inner(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            deleted_at: task.deleted_at(),
        }
    }

    /// Reconstructs the domain aggregate, surfacing invalid stored labels as
    /// persistence errors.
    pub(crate) fn into_domain(self) -> Result<Task, TaskRepositoryError> {
        let title = TaskTitle::new(self.title).map_err(TaskRepositoryError::persistence)?;
        let status = TaskStatus::try_from(self.status.as_str())
            .map_err(TaskRepositoryError::persistence)?;
        let priority = priority_from_stored(self.priority)?;
        Ok(Task::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(self.id),
            title,
            description: self.description,
            status,
            due_date: self.due_date,
            priority,
            created_by: UserId::from_uuid(self.created_by),
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }))
    }
}

fn priority_from_stored(value: i32) -> Result<Priority, TaskRepositoryError> {
    Priority::new(value).map_err(|_| {
        TaskRepositoryError::persistence(TaskDomainError::InvalidPriority(value))
    })
}

/// Row model for the `task_assignments` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_assignments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AssignmentRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub status: String,
    pub assigned_at: DateTime<Utc>,
    pub accepted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl AssignmentRow {
    /// Builds a row from the domain record.
    pub(crate) fn from_domain(assignment: &TaskAssignment) -> Self {
        Self {
            id: assignment.id().into_inner(),
            task_id: assignment.task_id().into_inner(),
            user_id: assignment.user_id().into_inner(),
            status: assignment.status().as_str().to_owned(),
            assigned_at: assignment.assigned_at(),
            accepted_at: assignment.accepted_at(),
            created_at: assignment.created_at(),
            updated_at: assignment.updated_at(),
            deleted_at: assignment.deleted_at(),
        }
    }

    /// Reconstructs the domain record, surfacing invalid stored labels as
    /// persistence errors.
    pub(crate) fn into_domain(self) -> Result<TaskAssignment, TaskRepositoryError> {
        let status = AssignmentStatus::try_from(self.status.as_str())
            .map_err(TaskRepositoryError::persistence)?;
        Ok(TaskAssignment::from_persisted(PersistedAssignmentData {
            id: AssignmentId::from_uuid(self.id),
            task_id: TaskId::from_uuid(self.task_id),
            user_id: UserId::from_uuid(self.user_id),
            status,
            assigned_at: self.assigned_at,
            accepted_at: self.accepted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }))
    }
}

/// Row model for the `task_categories` join table.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_categories)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskCategoryRow {
    pub task_id: uuid::Uuid,
    pub category_id: uuid::Uuid,
}

/// Row model for the `task_projects` join table.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TaskProjectRow {
    pub task_id: uuid::Uuid,
    pub project_id: uuid::Uuid,
}
