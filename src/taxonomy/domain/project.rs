//! Project aggregate and its stored status label.

use super::{ParseProjectStatusError, ProjectId, TaxonomyDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project status label.
///
/// A stored label only; there is no transition state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Work is ongoing.
    #[default]
    Active,
    /// Work has finished.
    Completed,
    /// The project has been shelved.
    Archived,
}

impl ProjectStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: Option<String>,
    status: ProjectStatus,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    color: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted status label.
    pub status: ProjectStatus,
    /// Persisted start date, if any.
    pub start_date: Option<DateTime<Utc>>,
    /// Persisted end date, if any.
    pub end_date: Option<DateTime<Utc>>,
    /// Persisted display color, if any.
    pub color: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted soft-deletion timestamp, if any.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Creation payload for a project.
#[derive(Debug, Clone, Default)]
pub struct ProjectDraft {
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Initial status label; defaults to [`ProjectStatus::Active`].
    pub status: Option<ProjectStatus>,
    /// Optional start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Optional end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Optional display color.
    pub color: Option<String>,
}

/// Partial update for a project; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement status label.
    pub status: Option<ProjectStatus>,
    /// Replacement start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Replacement end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Replacement display color.
    pub color: Option<String>,
}

impl Project {
    /// Creates a new project.
    ///
    /// # Errors
    ///
    /// Returns [`TaxonomyDomainError::EmptyName`] when the trimmed name is
    /// empty.
    pub fn new(draft: ProjectDraft, clock: &impl Clock) -> Result<Self, TaxonomyDomainError> {
        if draft.name.trim().is_empty() {
            return Err(TaxonomyDomainError::EmptyName("project name"));
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name: draft.name,
            description: draft.description,
            status: draft.status.unwrap_or_default(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            color: draft.color,
            created_at: timestamp,
            updated_at: timestamp,
            deleted_at: None,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            start_date: data.start_date,
            end_date: data.end_date,
            color: data.color,
            created_at: data.created_at,
            updated_at: data.updated_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the status label.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Returns the end date, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    /// Returns the display color, if any.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
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

    /// Returns `true` when the project has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Applies a partial update.
    pub fn apply(&mut self, patch: &ProjectPatch, clock: &impl Clock) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(start_date) = patch.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = patch.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(color) = &patch.color {
            self.color = Some(color.clone());
        }
        self.updated_at = clock.utc();
    }

    /// Soft-deletes the project by stamping the deletion timestamp.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.deleted_at = Some(timestamp);
        self.updated_at = timestamp;
    }
}
