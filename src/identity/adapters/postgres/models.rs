//! Diesel row models for identity persistence.

use crate::identity::domain::{
    EmailAddress, PasswordHash, PersistedRoleData, PersistedUserData, Role, RoleId, User, UserId,
};
use crate::storage::postgres::schema::{roles, user_roles, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for the `users` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Login email.
    pub email: String,
    /// One-way password hash.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Optional avatar location.
    pub avatar_url: Option<String>,
    /// Active flag.
    pub is_active: bool,
    /// Last-login timestamp.
    pub last_login_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl UserRow {
    /// Builds a row from the domain aggregate.
    #[must_use]
    pub fn from_domain(user: &User) -> Self {
        Self {
            id: user.id().into_inner(),
            email: user.email().as_str().to_owned(),
            password_hash: user.password_hash().as_str().to_owned(),
            first_name: user.first_name().to_owned(),
            last_name: user.last_name().to_owned(),
            avatar_url: user.avatar_url().map(str::to_owned),
            is_active: user.is_active(),
            last_login_at: user.last_login_at(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
            deleted_at: user.deleted_at(),
        }
    }

    /// Reconstructs the domain aggregate.
    ///
    /// # Errors
    ///
    /// Returns the email validation error when a stored address no longer
    /// parses; this indicates row corruption.
    pub fn into_domain(self) -> Result<User, crate::identity::domain::IdentityDomainError> {
        let email = EmailAddress::new(self.email)?;
        Ok(User::from_persisted(PersistedUserData {
            id: UserId::from_uuid(self.id),
            email,
            password_hash: PasswordHash::from_hash(self.password_hash),
            first_name: self.first_name,
            last_name: self.last_name,
            avatar_url: self.avatar_url,
            is_active: self.is_active,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        }))
    }
}

/// Row model for the `roles` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = roles)]
#[diesel(treat_none_as_null = true)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleRow {
    /// Role identifier.
    pub id: uuid::Uuid,
    /// Unique role name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RoleRow {
    /// Builds a row from the domain aggregate.
    #[must_use]
    pub fn from_domain(role: &Role) -> Self {
        Self {
            id: role.id().into_inner(),
            name: role.name().to_owned(),
            description: role.description().map(str::to_owned),
            is_active: role.is_active(),
            created_at: role.created_at(),
            updated_at: role.updated_at(),
            deleted_at: role.deleted_at(),
        }
    }

    /// Reconstructs the domain aggregate.
    #[must_use]
    pub fn into_domain(self) -> Role {
        Role::from_persisted(PersistedRoleData {
            id: RoleId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
            deleted_at: self.deleted_at,
        })
    }
}

/// Row model for the `user_roles` join table.
#[derive(Debug, Clone, Copy, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRoleRow {
    /// Assigned user.
    pub user_id: uuid::Uuid,
    /// Assigned role.
    pub role_id: uuid::Uuid,
    /// Assignment timestamp.
    pub assigned_at: DateTime<Utc>,
}
