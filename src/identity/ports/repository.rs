//! Repository ports for user and role persistence.

use crate::identity::domain::{
    EmailAddress, Role, RoleFilters, RoleId, User, UserFilters, UserId, UserProfile,
    UserWithRoles,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for user repository operations.
pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

/// User persistence contract.
///
/// Default read paths exclude soft-deleted rows; lookups by email return
/// `None` on absence so the login path can distinguish "no such user" from
/// a storage failure.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] when a non-deleted
    /// user already holds the email.
    async fn insert(&self, user: &User) -> UserRepositoryResult<()>;

    /// Persists changes to an existing user, including soft-deletion stamps.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when no row matches the
    /// identifier and [`UserRepositoryError::DuplicateEmail`] when an email
    /// change collides with another user.
    async fn update(&self, user: &User) -> UserRepositoryResult<()>;

    /// Finds a non-deleted user by identifier, with roles attached.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the row is absent or
    /// soft-deleted.
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<UserWithRoles>;

    /// Finds a non-deleted user with the full profile shape: roles, created
    /// tasks, active assignment rows, and authored comments. Associations
    /// exclude soft-deleted rows; tasks and comments order newest-created
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the row is absent or
    /// soft-deleted.
    async fn find_profile(&self, id: UserId) -> UserRepositoryResult<UserProfile>;

    /// Finds a non-deleted user by exact email match, with roles attached.
    ///
    /// Returns `None` when no such user exists.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> UserRepositoryResult<Option<UserWithRoles>>;

    /// Lists non-deleted users matching the filters, newest-created first.
    async fn find_all(&self, filters: &UserFilters) -> UserRepositoryResult<Vec<UserWithRoles>>;

    /// Replaces the user's role assignment set.
    ///
    /// The previous set is removed entirely; an empty slice clears all
    /// assignments.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] when the user is absent.
    async fn set_roles(
        &self,
        user_id: UserId,
        role_ids: &[RoleId],
        assigned_at: DateTime<Utc>,
    ) -> UserRepositoryResult<()>;
}

/// Errors returned by user repository implementations.
#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    /// A non-deleted user already holds the email.
    #[error("user with email '{0}' already exists")]
    DuplicateEmail(EmailAddress),

    /// The user was not found (absent or soft-deleted).
    #[error("user not found: {0}")]
    NotFound(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl UserRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<diesel::result::Error> for UserRepositoryError {
    // Transaction closures need this conversion; NotFound and DuplicateEmail
    // mapping happens at the statement level, so every stray diesel error is
    // a persistence failure.
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}

/// Result type for role repository operations.
pub type RoleRepositoryResult<T> = Result<T, RoleRepositoryError>;

/// Role persistence contract.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Stores a new role.
    ///
    /// # Errors
    ///
    /// Returns [`RoleRepositoryError::DuplicateName`] when a non-deleted
    /// role already holds the name.
    async fn insert(&self, role: &Role) -> RoleRepositoryResult<()>;

    /// Persists changes to an existing role, including soft-deletion stamps.
    ///
    /// # Errors
    ///
    /// Returns [`RoleRepositoryError::NotFound`] when no row matches and
    /// [`RoleRepositoryError::DuplicateName`] on a name collision.
    async fn update(&self, role: &Role) -> RoleRepositoryResult<()>;

    /// Finds a non-deleted role by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RoleRepositoryError::NotFound`] when the row is absent or
    /// soft-deleted.
    async fn find_by_id(&self, id: RoleId) -> RoleRepositoryResult<Role>;

    /// Finds a non-deleted role by exact name match.
    ///
    /// Returns `None` when no such role exists; used for assignment
    /// bootstrapping.
    async fn find_by_name(&self, name: &str) -> RoleRepositoryResult<Option<Role>>;

    /// Lists non-deleted roles matching the filters, newest-created first.
    async fn find_all(&self, filters: &RoleFilters) -> RoleRepositoryResult<Vec<Role>>;
}

/// Errors returned by role repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RoleRepositoryError {
    /// A non-deleted role already holds the name.
    #[error("role with name '{0}' already exists")]
    DuplicateName(String),

    /// The role was not found (absent or soft-deleted).
    #[error("role not found: {0}")]
    NotFound(RoleId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RoleRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
