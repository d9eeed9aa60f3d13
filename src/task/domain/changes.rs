//! Creation and change-set payloads for task commands.

use super::{Priority, TaskStatus, TaskTitle};
use crate::identity::domain::UserId;
use crate::taxonomy::domain::{CategoryId, ProjectId};
use chrono::{DateTime, Utc};

/// Creation payload for a task.
///
/// Assignee, category, and project links are wired in the same transaction
/// as the task row itself.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    /// Required task title.
    pub title: TaskTitle,
    /// Optional description.
    pub description: Option<String>,
    /// Initial status; defaults to [`TaskStatus::Pending`].
    pub status: Option<TaskStatus>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Initial priority; defaults to 1.
    pub priority: Option<Priority>,
    /// Users to assign at creation.
    pub assignee_ids: Vec<UserId>,
    /// Categories to link at creation.
    pub category_ids: Vec<CategoryId>,
    /// Projects to link at creation.
    pub project_ids: Vec<ProjectId>,
}

impl TaskDraft {
    /// Creates a draft with only the required title set.
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            status: None,
            due_date: None,
            priority: None,
            assignee_ids: Vec::new(),
            category_ids: Vec::new(),
            project_ids: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the users to assign at creation.
    #[must_use]
    pub fn with_assignees(mut self, assignee_ids: impl IntoIterator<Item = UserId>) -> Self {
        self.assignee_ids = assignee_ids.into_iter().collect();
        self
    }

    /// Sets the categories to link at creation.
    #[must_use]
    pub fn with_categories(mut self, category_ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.category_ids = category_ids.into_iter().collect();
        self
    }

    /// Sets the projects to link at creation.
    #[must_use]
    pub fn with_projects(mut self, project_ids: impl IntoIterator<Item = ProjectId>) -> Self {
        self.project_ids = project_ids.into_iter().collect();
        self
    }
}

/// Partial update for a task; `None` fields are left unchanged.
///
/// Relation fields carry full replacement sets: `Some(vec![])` clears the
/// set, `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskChangeSet {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Full replacement of the assignment set.
    pub assignee_ids: Option<Vec<UserId>>,
    /// Full replacement of the category link set.
    pub category_ids: Option<Vec<CategoryId>>,
    /// Full replacement of the project link set.
    pub project_ids: Option<Vec<ProjectId>>,
}

/// A single field-level change, recorded to the audit history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    /// Name of the changed field.
    pub field: &'static str,
    /// Value before the change, rendered as text.
    pub old_value: Option<String>,
    /// Value after the change, rendered as text.
    pub new_value: Option<String>,
}

impl FieldChange {
    /// Builds a change record for a replaced field value.
    #[must_use]
    pub const fn replaced(
        field: &'static str,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        Self {
            field,
            old_value,
            new_value,
        }
    }
}
