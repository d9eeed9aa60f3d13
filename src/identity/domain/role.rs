//! Role aggregate and the user-to-role assignment record.

use super::{IdentityDomainError, RoleId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Role aggregate root.
///
/// Roles are plain named records; permission evaluation is owned by the
/// external access boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted role.
#[derive(Debug, Clone)]
pub struct PersistedRoleData {
    /// Persisted role identifier.
    pub id: RoleId,
    /// Persisted unique name.
    pub name: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Partial update for a role; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct RolePatch {
    /// Replacement name, re-checked for uniqueness.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement active flag.
    pub is_active: Option<bool>,
}

/// Conjunctive filters for role listing.
#[derive(Debug, Clone, Default)]
pub struct RoleFilters {
    /// Exact match on the active flag.
    pub is_active: Option<bool>,
    /// Case-insensitive substring match over name and description.
    pub search: Option<String>,
}

impl Role {
    /// Creates a new active role.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyName`] when the trimmed name is
    /// empty.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, IdentityDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(IdentityDomainError::EmptyName("role name"));
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: RoleId::new(),
            name,
            description,
            is_active: true,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Reconstructs a role from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRoleData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            is_active: data.is_active,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the role identifier.
    #[must_use]
    pub const fn id(&self) -> RoleId {
        self.id
    }

    /// Returns the unique role name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the active flag.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
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

    /// Returns `true` when the role has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies a partial update.
    pub fn apply(&mut self, patch: &RolePatch, clock: &impl Clock) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.updated_at = clock.utc();
    }

    /// Soft-deletes the role by stamping the deletion timestamp.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
    }
}

/// A user-to-role assignment row.
///
/// Membership is fully replaced, never merged, on an explicit set update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    /// Assigned user.
    pub user_id: UserId,
    /// Assigned role.
    pub role_id: RoleId,
    /// When the assignment was made.
    pub assigned_at: DateTime<Utc>,
}
