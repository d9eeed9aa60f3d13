//! Project management service.

use crate::taxonomy::domain::{
    Project, ProjectDraft, ProjectId, ProjectPatch, TaxonomyDomainError,
};
use crate::taxonomy::ports::{ProjectRepository, ProjectRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaxonomyDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project management service.
#[derive(Clone)]
pub struct ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<R>, clock: Arc<C>) -> Self {
        Self { projects, clock }
    }

    /// Creates a new project.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the trimmed name is empty.
    pub async fn create(&self, draft: ProjectDraft) -> ProjectServiceResult<Project> {
        let project = Project::new(draft, &*self.clock)?;
        self.projects.insert(&project).await?;
        tracing::debug!(project_id = %project.id(), "created project");
        Ok(project)
    }

    /// Lists non-deleted projects, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn find_all(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.find_all().await?)
    }

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] (wrapped) when the
    /// project is absent or soft-deleted.
    pub async fn find_one(&self, id: ProjectId) -> ProjectServiceResult<Project> {
        Ok(self.projects.find_by_id(id).await?)
    }

    /// Applies a partial update. The status is a stored label; any
    /// transition is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] (wrapped) when the
    /// project is absent or soft-deleted.
    pub async fn update(&self, id: ProjectId, patch: &ProjectPatch) -> ProjectServiceResult<Project> {
        let mut project = self.projects.find_by_id(id).await?;
        project.apply(patch, &*self.clock);
        self.projects.update(&project).await?;
        Ok(project)
    }

    /// Soft-deletes a project. Existing task links are left in place and
    /// filtered out of joined reads.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] (wrapped) when the
    /// project is absent or already soft-deleted.
    pub async fn remove(&self, id: ProjectId) -> ProjectServiceResult<()> {
        let mut project = self.projects.find_by_id(id).await?;
        project.mark_deleted(&*self.clock);
        self.projects.update(&project).await?;
        tracing::debug!(project_id = %id, "soft-deleted project");
        Ok(())
    }
}
