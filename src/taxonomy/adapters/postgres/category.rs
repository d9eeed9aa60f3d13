//! `PostgreSQL` category repository.

use super::models::CategoryRow;
use crate::storage::PgPool;
use crate::storage::postgres::schema::categories;
use crate::taxonomy::domain::{Category, CategoryId};
use crate::taxonomy::ports::{
    CategoryRepository, CategoryRepositoryError, CategoryRepositoryResult,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed category repository.
#[derive(Debug, Clone)]
pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CategoryRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CategoryRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CategoryRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CategoryRepositoryError::persistence)?
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn insert(&self, category: &Category) -> CategoryRepositoryResult<()> {
        let row = CategoryRow::from_domain(category);
        self.run_blocking(move |connection| {
            diesel::insert_into(categories::table)
                .values(&row)
                .execute(connection)
                .map_err(CategoryRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, category: &Category) -> CategoryRepositoryResult<()> {
        let id = category.id();
        let row = CategoryRow::from_domain(category);
        self.run_blocking(move |connection| {
            let updated = diesel::update(categories::table.find(id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(CategoryRepositoryError::persistence)?;
            if updated == 0 {
                return Err(CategoryRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: CategoryId) -> CategoryRepositoryResult<Category> {
        self.run_blocking(move |connection| {
            let row = categories::table
                .filter(categories::id.eq(id.into_inner()))
                .filter(categories::deleted_at.is_null())
                .select(CategoryRow::as_select())
                .first::<CategoryRow>(connection)
                .optional()
                .map_err(CategoryRepositoryError::persistence)?
                .ok_or(CategoryRepositoryError::NotFound(id))?;
            Ok(row.into_domain())
        })
        .await
    }

    async fn find_all(&self) -> CategoryRepositoryResult<Vec<Category>> {
        self.run_blocking(move |connection| {
            let rows = categories::table
                .filter(categories::deleted_at.is_null())
                .order(categories::created_at.desc())
                .select(CategoryRow::as_select())
                .load::<CategoryRow>(connection)
                .map_err(CategoryRepositoryError::persistence)?;
            Ok(rows.into_iter().map(CategoryRow::into_domain).collect())
        })
        .await
    }
}
