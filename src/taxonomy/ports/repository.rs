//! Repository ports for category and project persistence.

use crate::taxonomy::domain::{Category, CategoryId, Project, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for category repository operations.
pub type CategoryRepositoryResult<T> = Result<T, CategoryRepositoryError>;

/// Category persistence contract.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Stores a new category.
    async fn insert(&self, category: &Category) -> CategoryRepositoryResult<()>;

    /// Persists changes to an existing category, including soft-deletion
    /// stamps.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::NotFound`] when no row matches.
    async fn update(&self, category: &Category) -> CategoryRepositoryResult<()>;

    /// Finds a non-deleted category by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::NotFound`] when the row is absent
    /// or soft-deleted.
    async fn find_by_id(&self, id: CategoryId) -> CategoryRepositoryResult<Category>;

    /// Lists non-deleted categories, newest-created first.
    async fn find_all(&self) -> CategoryRepositoryResult<Vec<Category>>;
}

/// Errors returned by category repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CategoryRepositoryError {
    /// The category was not found (absent or soft-deleted).
    #[error("category not found: {0}")]
    NotFound(CategoryId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CategoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    async fn insert(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Persists changes to an existing project, including soft-deletion
    /// stamps.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when no row matches.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a non-deleted project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the row is absent
    /// or soft-deleted.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Project>;

    /// Lists non-deleted projects, newest-created first.
    async fn find_all(&self) -> ProjectRepositoryResult<Vec<Project>>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// The project was not found (absent or soft-deleted).
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
