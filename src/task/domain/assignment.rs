//! Task assignment rows linking tasks to users.

use super::{AssignmentId, ParseAssignmentStatusError, TaskId};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Assignment acceptance status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// The user has been assigned but has not responded.
    #[default]
    Assigned,
    /// The user accepted the assignment.
    Accepted,
    /// The user declined the assignment.
    Declined,
}

impl AssignmentStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }
}

impl TryFrom<&str> for AssignmentStatus {
    type Error = ParseAssignmentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "assigned" => Ok(Self::Assigned),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            _ => Err(ParseAssignmentStatusError(value.to_owned())),
        }
    }
}

/// A task-to-user assignment row.
///
/// Uniqueness is not model-enforced: re-assigning appends a new row, and
/// callers replace the whole set rather than diffing it. Assignment rows are
/// soft-deletable independently of their task, and set replacement during a
/// task update soft-deletes the superseded rows and inserts fresh ones, so
/// removed assignments stay addressable under the widened lookup scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignment {
    id: AssignmentId,
    task_id: TaskId,
    user_id: UserId,
    status: AssignmentStatus,
    assigned_at: DateTime<Utc>,
    accepted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted assignment row.
#[derive(Debug, Clone)]
pub struct PersistedAssignmentData {
    /// Persisted assignment identifier.
    pub id: AssignmentId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted assignee reference.
    pub user_id: UserId,
    /// Persisted acceptance status.
    pub status: AssignmentStatus,
    /// Persisted assignment timestamp.
    pub assigned_at: DateTime<Utc>,
    /// Persisted acceptance timestamp, if any.
    pub accepted_at: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TaskAssignment {
    /// Creates a fresh assignment with status [`AssignmentStatus::Assigned`]
    /// and the current clock time as the assignment timestamp.
    #[must_use]
    pub fn new(task_id: TaskId, user_id: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AssignmentId::new(),
            task_id,
            user_id,
            status: AssignmentStatus::Assigned,
            assigned_at: timestamp,
            accepted_at: None,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        }
    }

    /// Reconstructs an assignment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAssignmentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            user_id: data.user_id,
            status: data.status,
            assigned_at: data.assigned_at,
            accepted_at: data.accepted_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the assignment identifier.
    #[must_use]
    pub const fn id(&self) -> AssignmentId {
        self.id
    }

    /// Returns the task reference.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the assignee reference.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the acceptance status.
    #[must_use]
    pub const fn status(&self) -> AssignmentStatus {
        self.status
    }

    /// Returns the assignment timestamp.
    #[must_use]
    pub const fn assigned_at(&self) -> DateTime<Utc> {
        self.assigned_at
    }

    /// Returns the acceptance timestamp, if any.
    #[must_use]
    pub const fn accepted_at(&self) -> Option<DateTime<Utc>> {
        self.accepted_at
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

    /// Returns `true` when the assignment row has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Soft-deletes the assignment row independently of its task.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        self.mark_deleted_at(clock.utc());
    }

    /// Soft-deletes the assignment row at an externally chosen timestamp,
    /// used when a replacement set supersedes it.
    pub const fn mark_deleted_at(&mut self, timestamp: DateTime<Utc>) {
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
    }
}
