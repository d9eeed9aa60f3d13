//! In-memory project repository.

use crate::storage::MemoryDb;
use crate::storage::memory::newest_first;
use crate::taxonomy::domain::{Project, ProjectId};
use crate::taxonomy::ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory implementation of [`ProjectRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryProjectRepository {
    db: Arc<MemoryDb>,
}

impl InMemoryProjectRepository {
    /// Creates a repository over the shared in-memory database.
    #[must_use]
    pub const fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn insert(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self
            .db
            .write()
            .map_err(ProjectRepositoryError::persistence)?;
        state.projects.push(project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self
            .db
            .write()
            .map_err(ProjectRepositoryError::persistence)?;
        let row = state
            .projects
            .iter_mut()
            .find(|row| row.id() == project.id())
            .ok_or(ProjectRepositoryError::NotFound(project.id()))?;
        *row = project.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Project> {
        let state = self.db.read().map_err(ProjectRepositoryError::persistence)?;
        state
            .projects
            .iter()
            .find(|project| project.id() == id && !project.is_deleted())
            .cloned()
            .ok_or(ProjectRepositoryError::NotFound(id))
    }

    async fn find_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.db.read().map_err(ProjectRepositoryError::persistence)?;
        let live = state.projects.iter().filter(|project| !project.is_deleted());
        Ok(newest_first(live.cloned(), Project::created_at))
    }
}
