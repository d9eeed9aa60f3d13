//! Task aggregate root and its validated scalar types.

use super::{FieldChange, ParseTaskStatusError, TaskChangeSet, TaskDomainError, TaskId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    Pending,
    /// Work is underway.
    InProgress,
    /// Work has finished.
    Completed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Task priority in the 1–5 band; higher values are more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(i32);

impl Priority {
    /// Lowest (default) priority.
    pub const MIN: i32 = 1;
    /// Highest priority.
    pub const MAX: i32 = 5;

    /// Creates a validated priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPriority`] when the value lies
    /// outside the 1–5 band.
    pub const fn new(value: i32) -> Result<Self, TaskDomainError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(TaskDomainError::InvalidPriority(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] when the trimmed value is
    /// empty.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        Ok(Self(raw))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Conjunctive filters for task listing.
///
/// All provided filters must match (AND); the free-text search alone is an
/// OR across title and description.
#[derive(Debug, Clone, Default)]
pub struct TaskFilters {
    /// Exact match on status.
    pub status: Option<TaskStatus>,
    /// Exact match on priority.
    pub priority: Option<Priority>,
    /// Exact match on the creator.
    pub created_by: Option<UserId>,
    /// Case-insensitive substring match over title and description.
    pub search: Option<String>,
    /// Inclusive lower bound on the due date.
    pub due_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the due date.
    pub due_to: Option<DateTime<Utc>>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    due_date: Option<DateTime<Utc>>,
    priority: Priority,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted creator reference.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new task owned by `created_by`.
    #[must_use]
    pub fn new(
        title: TaskTitle,
        description: Option<String>,
        status: TaskStatus,
        due_date: Option<DateTime<Utc>>,
        priority: Priority,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title,
            description,
            status,
            due_date,
            priority,
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            due_date: data.due_date,
            priority: data.priority,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the creator reference.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
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

    /// Returns `true` when the task has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies the scalar part of a change set and reports the fields whose
    /// values actually changed, for audit recording.
    ///
    /// Relation-set replacement is a persistence concern and is carried by
    /// the change set separately.
    pub fn apply(&mut self, changes: &TaskChangeSet, clock: &impl Clock) -> Vec<FieldChange> {
        let mut changed = Vec::new();

        if let Some(title) = &changes.title
            && title != &self.title
        {
            changed.push(FieldChange::replaced(
                "title",
                Some(self.title.as_str().to_owned()),
                Some(title.as_str().to_owned()),
            ));
            self.title = title.clone();
        }
        if let Some(description) = &changes.description
            && self.description.as_deref() != Some(description.as_str())
        {
            changed.push(FieldChange::replaced(
                "description",
                self.description.clone(),
                Some(description.clone()),
            ));
            self.description = Some(description.clone());
        }
        if let Some(status) = changes.status
            && status != self.status
        {
            changed.push(FieldChange::replaced(
                "status",
                Some(self.status.as_str().to_owned()),
                Some(status.as_str().to_owned()),
            ));
            self.status = status;
        }
        if let Some(due_date) = changes.due_date
            && self.due_date != Some(due_date)
        {
            changed.push(FieldChange::replaced(
                "due_date",
                self.due_date.map(|value| value.to_rfc3339()),
                Some(due_date.to_rfc3339()),
            ));
            self.due_date = Some(due_date);
        }
        if let Some(priority) = changes.priority
            && priority != self.priority
        {
            changed.push(FieldChange::replaced(
                "priority",
                Some(self.priority.to_string()),
                Some(priority.to_string()),
            ));
            self.priority = priority;
        }

        if !changed.is_empty() {
            self.updated_at = clock.utc();
        }
        changed
    }

    /// Soft-deletes the task by stamping the deletion timestamp.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
    }
}
