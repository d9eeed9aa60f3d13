//! Category management service.

use crate::taxonomy::domain::{Category, CategoryId, CategoryPatch, TaxonomyDomainError};
use crate::taxonomy::ports::{CategoryRepository, CategoryRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for category operations.
#[derive(Debug, Error)]
pub enum CategoryServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaxonomyDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] CategoryRepositoryError),
}

/// Result type for category service operations.
pub type CategoryServiceResult<T> = Result<T, CategoryServiceError>;

/// Category management service.
#[derive(Clone)]
pub struct CategoryService<R, C>
where
    R: CategoryRepository,
    C: Clock + Send + Sync,
{
    categories: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> CategoryService<R, C>
where
    R: CategoryRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new category service.
    #[must_use]
    pub const fn new(categories: Arc<R>, clock: Arc<C>) -> Self {
        Self { categories, clock }
    }

    /// Creates a new active category.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the trimmed name is empty.
    pub async fn create(
        &self,
        name: impl Into<String> + Send,
        description: Option<String>,
        color: Option<String>,
    ) -> CategoryServiceResult<Category> {
        let category = Category::new(name, description, color, &*self.clock)?;
        self.categories.insert(&category).await?;
        tracing::debug!(category_id = %category.id(), "created category");
        Ok(category)
    }

    /// Lists non-deleted categories, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn find_all(&self) -> CategoryServiceResult<Vec<Category>> {
        Ok(self.categories.find_all().await?)
    }

    /// Finds a category by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::NotFound`] (wrapped) when the
    /// category is absent or soft-deleted.
    pub async fn find_one(&self, id: CategoryId) -> CategoryServiceResult<Category> {
        Ok(self.categories.find_by_id(id).await?)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::NotFound`] (wrapped) when the
    /// category is absent or soft-deleted.
    pub async fn update(
        &self,
        id: CategoryId,
        patch: &CategoryPatch,
    ) -> CategoryServiceResult<Category> {
        let mut category = self.categories.find_by_id(id).await?;
        category.apply(patch, &*self.clock);
        self.categories.update(&category).await?;
        Ok(category)
    }

    /// Soft-deletes a category. Existing task links are left in place and
    /// filtered out of joined reads.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryRepositoryError::NotFound`] (wrapped) when the
    /// category is absent or already soft-deleted.
    pub async fn remove(&self, id: CategoryId) -> CategoryServiceResult<()> {
        let mut category = self.categories.find_by_id(id).await?;
        category.mark_deleted(&*self.clock);
        self.categories.update(&category).await?;
        tracing::debug!(category_id = %id, "soft-deleted category");
        Ok(())
    }
}
