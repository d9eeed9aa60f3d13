//! `PostgreSQL` user repository.

use super::models::{RoleRow, UserRoleRow, UserRow};
use crate::comment::adapters::postgres::CommentRow;
use crate::identity::domain::{
    EmailAddress, Role, RoleId, User, UserFilters, UserId, UserProfile, UserWithRoles,
};
use crate::identity::ports::{UserRepository, UserRepositoryError, UserRepositoryResult};
use crate::storage::PgPool;
use crate::storage::postgres::schema::{comments, roles, task_assignments, tasks, user_roles, users};
use crate::task::adapters::postgres::{AssignmentRow, TaskRow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn insert(&self, user: &User) -> UserRepositoryResult<()> {
        let email = user.email().clone();
        let row = UserRow::from_domain(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, &email))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let id = user.id();
        let email = user.email().clone();
        let row = UserRow::from_domain(user);

        self.run_blocking(move |connection| {
            let updated = diesel::update(users::table.find(id.into_inner()))
                .set(&row)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, &email))?;
            if updated == 0 {
                return Err(UserRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<UserWithRoles> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .filter(users::deleted_at.is_null())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?
                .ok_or(UserRepositoryError::NotFound(id))?;
            let user = row_to_user(row)?;
            let roles = load_roles(connection, id)?;
            Ok(UserWithRoles { user, roles })
        })
        .await
    }

    async fn find_profile(&self, id: UserId) -> UserRepositoryResult<UserProfile> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .filter(users::deleted_at.is_null())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?
                .ok_or(UserRepositoryError::NotFound(id))?;
            let user = row_to_user(row)?;
            let roles = load_roles(connection, id)?;

            let task_rows = tasks::table
                .filter(tasks::created_by.eq(id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            let created_tasks = task_rows
                .into_iter()
                .map(|task_row| {
                    task_row
                        .into_domain()
                        .map_err(UserRepositoryError::persistence)
                })
                .collect::<UserRepositoryResult<Vec<_>>>()?;

            let assignment_rows = task_assignments::table
                .filter(task_assignments::user_id.eq(id.into_inner()))
                .filter(task_assignments::deleted_at.is_null())
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            let assignments = assignment_rows
                .into_iter()
                .map(|assignment_row| {
                    assignment_row
                        .into_domain()
                        .map_err(UserRepositoryError::persistence)
                })
                .collect::<UserRepositoryResult<Vec<_>>>()?;

            let comment_rows = comments::table
                .filter(comments::author_id.eq(id.into_inner()))
                .filter(comments::deleted_at.is_null())
                .order(comments::created_at.desc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            let profile_comments = comment_rows.into_iter().map(CommentRow::into_domain).collect();

            Ok(UserProfile {
                user,
                roles,
                created_tasks,
                assignments,
                comments: profile_comments,
            })
        })
        .await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> UserRepositoryResult<Option<UserWithRoles>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .filter(users::deleted_at.is_null())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            let Some(row) = row else {
                return Ok(None);
            };
            let user = row_to_user(row)?;
            let roles = load_roles(connection, user.id())?;
            Ok(Some(UserWithRoles { user, roles }))
        })
        .await
    }

    async fn find_all(&self, filters: &UserFilters) -> UserRepositoryResult<Vec<UserWithRoles>> {
        let filters = filters.clone();
        self.run_blocking(move |connection| {
            let mut query = users::table
                .into_boxed()
                .filter(users::deleted_at.is_null());
            if let Some(is_active) = filters.is_active {
                query = query.filter(users::is_active.eq(is_active));
            }
            if let Some(search) = &filters.search {
                let pattern = format!("%{search}%");
                query = query.filter(
                    users::first_name
                        .ilike(pattern.clone())
                        .or(users::last_name.ilike(pattern.clone()))
                        .or(users::email.ilike(pattern)),
                );
            }
            let rows = query
                .order(users::created_at.desc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            attach_roles(connection, rows)
        })
        .await
    }

    async fn set_roles(
        &self,
        user_id: UserId,
        role_ids: &[RoleId],
        assigned_at: DateTime<Utc>,
    ) -> UserRepositoryResult<()> {
        let new_rows: Vec<UserRoleRow> = role_ids
            .iter()
            .map(|role_id| UserRoleRow {
                user_id: user_id.into_inner(),
                role_id: role_id.into_inner(),
                assigned_at,
            })
            .collect();

        self.run_blocking(move |connection| {
            connection.transaction(|connection| {
                let exists = diesel::select(diesel::dsl::exists(
                    users::table
                        .filter(users::id.eq(user_id.into_inner()))
                        .filter(users::deleted_at.is_null()),
                ))
                .get_result::<bool>(connection)
                .map_err(UserRepositoryError::persistence)?;
                if !exists {
                    return Err(UserRepositoryError::NotFound(user_id));
                }
                diesel::delete(
                    user_roles::table.filter(user_roles::user_id.eq(user_id.into_inner())),
                )
                .execute(connection)
                .map_err(UserRepositoryError::persistence)?;
                diesel::insert_into(user_roles::table)
                    .values(&new_rows)
                    .execute(connection)
                    .map_err(UserRepositoryError::persistence)?;
                Ok(())
            })
        })
        .await
    }
}

fn map_unique_violation(err: DieselError, email: &EmailAddress) -> UserRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::DuplicateEmail(email.clone())
        }
        _ => UserRepositoryError::persistence(err),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    row.into_domain().map_err(UserRepositoryError::persistence)
}

/// Loads the non-deleted roles assigned to a single user.
fn load_roles(connection: &mut PgConnection, user_id: UserId) -> UserRepositoryResult<Vec<Role>> {
    let role_ids: Vec<uuid::Uuid> = user_roles::table
        .filter(user_roles::user_id.eq(user_id.into_inner()))
        .select(user_roles::role_id)
        .load(connection)
        .map_err(UserRepositoryError::persistence)?;
    let rows = roles::table
        .filter(roles::id.eq_any(role_ids))
        .filter(roles::deleted_at.is_null())
        .select(RoleRow::as_select())
        .load::<RoleRow>(connection)
        .map_err(UserRepositoryError::persistence)?;
    Ok(rows.into_iter().map(RoleRow::into_domain).collect())
}

/// Attaches roles to a page of users with two batch queries rather than one
/// round trip per user.
fn attach_roles(
    connection: &mut PgConnection,
    rows: Vec<UserRow>,
) -> UserRepositoryResult<Vec<UserWithRoles>> {
    let user_ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();
    let links: Vec<(uuid::Uuid, uuid::Uuid)> = user_roles::table
        .filter(user_roles::user_id.eq_any(&user_ids))
        .select((user_roles::user_id, user_roles::role_id))
        .load(connection)
        .map_err(UserRepositoryError::persistence)?;
    let role_ids: Vec<uuid::Uuid> = links.iter().map(|(_, role_id)| *role_id).collect();
    let role_rows = roles::table
        .filter(roles::id.eq_any(role_ids))
        .filter(roles::deleted_at.is_null())
        .select(RoleRow::as_select())
        .load::<RoleRow>(connection)
        .map_err(UserRepositoryError::persistence)?;
    let roles_by_id: std::collections::HashMap<uuid::Uuid, Role> = role_rows
        .into_iter()
        .map(|row| (row.id, row.into_domain()))
        .collect();

    rows.into_iter()
        .map(|row| {
            let roles = links
                .iter()
                .filter(|(user_id, _)| *user_id == row.id)
                .filter_map(|(_, role_id)| roles_by_id.get(role_id).cloned())
                .collect();
            let user = row_to_user(row)?;
            Ok(UserWithRoles { user, roles })
        })
        .collect()
}
