//! Diesel row models for taxonomy persistence.

use crate::storage::postgres::schema::{categories, projects};
use crate::taxonomy::domain::{
    Category, CategoryId, PersistedCategoryData, PersistedProjectData, Project, ProjectId,
    ProjectStatus,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for the `categories` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = categories)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CategoryRow {
    /// Category identifier.
    pub id: uuid::Uuid,
    /// Category name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional display color.
    pub color: Option<String>,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CategoryRow {
    /// Builds a row from the domain aggregate.
    #[must_use]
    pub fn from_domain(category: &Category) -> Self {
        Self {
            id: category.id().into_inner(),
            name: category.name().to_owned(),
            description: category.description().map(str::to_owned),
            color: category.color().map(str::to_owned),
            is_active: category.is_active(),
            created_at: category.created_at(),
            updated_at: category.updated_at(),
            deleted_at: category.deleted_at(),
        }
    }

    /// Reconstructs the domain aggregate.
    #[must_use]
    pub fn into_domain(self) -> Category {
        Category::from_persisted(PersistedCategoryData {
            id: CategoryId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            color: self.color,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}

/// Row model for the `projects` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = projects)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: uuid::Uuid,
    /// Project name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Status label.
    pub status: String,
    /// Optional start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Optional end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Optional display color.
    pub color: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ProjectRow {
    /// Builds a row from the domain aggregate.
    #[must_use]
    pub fn from_domain(project: &Project) -> Self {
        Self {
            id: project.id().into_inner(),
            name: project.name().to_owned(),
            description: project.description().map(str::to_owned),
            status: project.status().as_str().to_owned(),
            start_date: project.start_date(),
            end_date: project.end_date(),
            color: project.color().map(str::to_owned),
            created_at: project.created_at(),
            updated_at: project.updated_at(),
            deleted_at: project.deleted_at(),
        }
    }

    /// Reconstructs the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns the status parse error when a stored label is unknown; this
    /// indicates row corruption.
    pub fn into_domain(
        self,
    ) -> Result<Project, crate::taxonomy::domain::ParseProjectStatusError> {
        let status = ProjectStatus::try_from(self.status.as_str())?;
        Ok(Project::from_persisted(PersistedProjectData {
            id: ProjectId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            status,
            start_date: self.start_date,
            end_date: self.end_date,
            color: self.color,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }))
    }
}
