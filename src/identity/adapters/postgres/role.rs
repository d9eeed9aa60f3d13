//! `PostgreSQL` role repository.

use super::models::RoleRow;
use crate::identity::domain::{Role, RoleFilters, RoleId};
use crate::identity::ports::{RoleRepository, RoleRepositoryError, RoleRepositoryResult};
use crate::storage::PgPool;
use crate::storage::postgres::schema::roles;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed role repository.
#[derive(Debug, Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> RoleRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> RoleRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(RoleRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(RoleRepositoryError::persistence)?
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn insert(&self, role: &Role) -> RoleRepositoryResult<()> {
        let name = role.name().to_owned();
        let row = RoleRow::from_domain(role);

        self.run_blocking(move |connection| {
            diesel::insert_into(roles::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, &name))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, role: &Role) -> RoleRepositoryResult<()> {
        let id = role.id();
        let name = role.name().to_owned();
        let row = RoleRow::from_domain(role);

        self.run_blocking(move |connection| {
            let updated = diesel::update(roles::table.find(id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, &name))?;
            if updated == 0 {
                return Err(RoleRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: RoleId) -> RoleRepositoryResult<Role> {
        self.run_blocking(move |connection| {
            let row = roles::table
                .filter(roles::id.eq(id.into_inner()))
                .filter(roles::deleted_at.is_null())
                .select(RoleRow::as_select())
                .first::<RoleRow>(connection)
                .optional()
                .map_err(RoleRepositoryError::persistence)?
                .ok_or(RoleRepositoryError::NotFound(id))?;
            Ok(row.into_domain())
        })
        .await
    }

    async fn find_by_name(&self, name: &str) -> RoleRepositoryResult<Option<Role>> {
        let lookup = name.to_owned();
        self.run_blocking(move |connection| {
            let row = roles::table
                .filter(roles::name.eq(lookup))
                .filter(roles::deleted_at.is_null())
                .select(RoleRow::as_select())
                .first::<RoleRow>(connection)
                .optional()
                .map_err(RoleRepositoryError::persistence)?;
            Ok(row.map(RoleRow::into_domain))
        })
        .await
    }

    async fn find_all(&self, filters: &RoleFilters) -> RoleRepositoryResult<Vec<Role>> {
        let filters = filters.clone();
        self.run_blocking(move |connection| {
            let mut query = roles::table
                .into_boxed()
                .filter(roles::deleted_at.is_null());
            if let Some(is_active) = filters.is_active {
                query = query.filter(roles::is_active.eq(is_active));
            }
            if let Some(search) = &filters.search {
                let pattern = format!("%{search}%");
                query = query.filter(
                    roles::name
                        .ilike(pattern.clone())
                        .nullable()
                        .or(roles::description.ilike(pattern)),
                );
            }
            let rows = query
                .order(roles::created_at.desc())
                .select(RoleRow::as_select())
                .load::<RoleRow>(connection)
                .map_err(RoleRepositoryError::persistence)?;
            Ok(rows.into_iter().map(RoleRow::into_domain).collect())
        })
        .await
    }
}

fn map_unique_violation(err: DieselError, name: &str) -> RoleRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            RoleRepositoryError::DuplicateName(name.to_owned())
        }
        _ => RoleRepositoryError::persistence(err),
    }
}
