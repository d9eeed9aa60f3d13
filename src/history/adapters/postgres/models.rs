//! Diesel row model for history persistence.

use crate::history::domain::{HistoryEntry, HistoryEntryId, PersistedHistoryData};
use crate::identity::domain::UserId;
use crate::storage::postgres::schema::task_history;
use crate::task::domain::TaskId;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for the `task_history` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct HistoryRow {
    pub id: uuid::Uuid,
    pub task_id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

impl HistoryRow {
    /// Builds a row from the domain record.
    pub(crate) fn from_domain(entry: &HistoryEntry) -> Self {
        Self {
            id: entry.id().into_inner(),
            task_id: entry.task_id().into_inner(),
            user_id: entry.user_id().into_inner(),
            field: entry.field().to_owned(),
            old_value: entry.old_value().map(str::to_owned),
            new_value: entry.new_value().map(str::to_owned),
            action: entry.action().to_owned(),
            created_at: entry.created_at(),
        }
    }

    /// Reconstructs the domain record.
    pub(crate) fn into_domain(self) -> HistoryEntry {
        HistoryEntry::from_persisted(PersistedHistoryData {
            id: HistoryEntryId::from_uuid(self.id),
            task_id: TaskId::from_uuid(self.task_id),
            user_id: UserId::from_uuid(self.user_id),
            field: self.field,
            old_value: self.old_value,
            new_value: self.new_value,
            action: self.action,
            created_at: self.created_at,
        })
    }
}
