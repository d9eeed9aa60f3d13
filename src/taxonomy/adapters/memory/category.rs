//! In-memory category repository.

use crate::storage::MemoryDb;
use crate::storage::memory::newest_first;
use crate::taxonomy::domain::{Category, CategoryId};
use crate::taxonomy::ports::{
    CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult,
};
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory implementation of [`CategoryRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryCategoryRepository {
    db: Arc<MemoryDb>,
}

impl InMemoryCategoryRepository {
    /// Creates a repository over the shared in-memory database.
    #[must_use]
    pub const fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn insert(&self, category: &Category) -> CategoryRepositoryResult<()> {
        let mut state = self
            .db
            .write()
            .map_err(CategoryRepositoryError::persistence)?;
        state.categories.push(category.clone());
        Ok(())
    }

    async fn update(&self, category: &Category) -> CategoryRepositoryResult<()> {
        let mut state = self
            .db
            .write()
            .map_err(CategoryRepositoryError::persistence)?;
        let row = state
            .categories
            .iter_mut()
            .find(|row| row.id() == category.id())
            .ok_or(CategoryRepositoryError::NotFound(category.id()))?;
        *row = category.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> CategoryRepositoryResult<Category> {
        let state = self
            .db
            .read()
            .map_err(CategoryRepositoryError::persistence)?;
        state
            .categories
            .iter()
            .find(|category| category.id() == id && !category.is_deleted())
            .cloned()
            .ok_or(CategoryRepositoryError::NotFound(id))
    }

    async fn find_all(&self) -> CategoryRepositoryResult<Vec<Category>> {
        let state = self
            .db
            .read()
            .map_err(CategoryRepositoryError::persistence)?;
        let live = state
            .categories
            .iter()
            .filter(|category| !category.is_deleted());
        Ok(newest_first(live.cloned(), Category::created_at))
    }
}
