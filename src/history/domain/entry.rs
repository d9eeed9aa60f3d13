//! History entry record.

use super::HistoryEntryId;
use crate::identity::domain::UserId;
use crate::task::domain::{FieldChange, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One append-only audit record: a single field-level change to a task,
/// attributed to the acting user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    user_id: UserId,
    field: String,
    old_value: Option<String>,
    new_value: Option<String>,
    action: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted history entry.
#[derive(Debug, Clone)]
pub struct PersistedHistoryData {
    /// Persisted entry identifier.
    pub id: HistoryEntryId,
    /// Persisted task reference.
    pub task_id: TaskId,
    /// Persisted acting-user reference.
    pub user_id: UserId,
    /// Persisted changed-field name.
    pub field: String,
    /// Persisted value before the change, if any.
    pub old_value: Option<String>,
    /// Persisted value after the change, if any.
    pub new_value: Option<String>,
    /// Persisted action label.
    pub action: String,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Action label recorded for task update changes.
    pub const ACTION_UPDATED: &'static str = "updated";

    /// Creates an entry from a field-level change produced by a task update.
    #[must_use]
    pub fn from_change(
        task_id: TaskId,
        actor_id: UserId,
        change: FieldChange,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id,
            user_id: actor_id,
            field: change.field.to_owned(),
            old_value: change.old_value,
            new_value: change.new_value,
            action: Self::ACTION_UPDATED.to_owned(),
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedHistoryData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            user_id: data.user_id,
            field: data.field,
            old_value: data.old_value,
            new_value: data.new_value,
            action: data.action,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the task reference.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the acting-user reference.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the changed-field name.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the value before the change, if any.
    #[must_use]
    pub fn old_value(&self) -> Option<&str> {
        self.old_value.as_deref()
    }

    /// Returns the value after the change, if any.
    #[must_use]
    pub fn new_value(&self) -> Option<&str> {
        self.new_value.as_deref()
    }

    /// Returns the action label.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
