//! `PostgreSQL` project repository.

use super::models::ProjectRow;
use crate::storage::PgPool;
use crate::storage::postgres::schema::projects;
use crate::taxonomy::domain::{Project, ProjectId};
use crate::taxonomy::ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn insert(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let row = ProjectRow::from_domain(project);
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let id = project.id();
        let row = ProjectRow::from_domain(project);
        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.find(id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Project> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .filter(projects::id.eq(id.into_inner()))
                .filter(projects::deleted_at.is_null())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?
                .ok_or(ProjectRepositoryError::NotFound(id))?;
            row.into_domain().map_err(ProjectRepositoryError::persistence)
        })
        .await
    }

    async fn find_all(&self) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let rows = projects::table
                .filter(projects::deleted_at.is_null())
                .order(projects::created_at.desc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            rows.into_iter()
                .map(|row| row.into_domain().map_err(ProjectRepositoryError::persistence))
                .collect()
        })
        .await
    }
}
