//! Category aggregate.

use super::{CategoryId, TaxonomyDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Category aggregate root: a named, colored task label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    description: Option<String>,
    color: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted category.
#[derive(Debug, Clone)]
pub struct PersistedCategoryData {
    /// Persisted category identifier.
    pub id: CategoryId,
    /// Persisted name.
    pub name: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted display color, if any.
    pub color: Option<String>,
    /// Persisted active flag.
    pub is_active: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Partial update for a category; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement display color.
    pub color: Option<String>,
    /// Replacement active flag.
    pub is_active: Option<bool>,
}

impl Category {
    /// Creates a new active category.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyDomainError::EmptyName`] when the trimmed name is
    /// empty.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        color: Option<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaxonomyDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TaxonomyDomainError::EmptyName("category name"));
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: CategoryId::new(),
            name,
            description,
            color,
            is_active: true,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Reconstructs a category from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCategoryData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            color: data.color,
            is_active: data.is_active,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the category identifier.
    #[must_use]
    pub const fn id(&self) -> CategoryId {
        self.id
    }

    /// Returns the category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the display color, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
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

    /// Returns `true` when the category has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies a partial update.
    pub fn apply(&mut self, patch: &CategoryPatch, clock: &impl Clock) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.updated_at = clock.utc();
    }

    /// Soft-deletes the category by stamping the deletion timestamp.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
    }
}
