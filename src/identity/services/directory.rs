//! User directory orchestration service.

use crate::identity::domain::{
    EmailAddress, NewUser, RoleId, User, UserFilters, UserId, UserPatch, UserProfile,
    UserWithRoles,
};
use crate::identity::ports::{
    PasswordHashError, PasswordHasher, UserRepository, UserRepositoryError,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for user directory operations.
#[derive(Debug, Error)]
pub enum UserDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] crate::identity::domain::IdentityDomainError),
    /// Password hashing failed.
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] UserRepositoryError),
}

/// Result type for user directory service operations.
pub type UserDirectoryResult<T> = Result<T, UserDirectoryError>;

/// User directory orchestration service.
///
/// Raw passwords are hashed here, before the aggregate is built, so plain
/// credentials never reach a repository.
#[derive(Clone)]
pub struct UserDirectoryService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    users: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<C>,
}

impl<R, H, C> UserDirectoryService<R, H, C>
where
    R: UserRepository,
    H: PasswordHasher,
    C: Clock + Send + Sync,
{
    /// Creates a new user directory service.
    #[must_use]
    pub const fn new(users: Arc<R>, hasher: Arc<H>, clock: Arc<C>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }

    /// Creates a new user from the draft.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::DuplicateEmail`] (wrapped) when a
    /// non-deleted user already holds the email, and a hashing error when
    /// the password cannot be processed.
    pub async fn create(&self, draft: NewUser) -> UserDirectoryResult<User> {
        let password_hash = self.hasher.hash(&draft.password)?;
        let user = User::new(&draft, password_hash, &*self.clock);
        self.users.insert(&user).await?;
        tracing::debug!(user_id = %user.id(), "created user");
        Ok(user)
    }

    /// Lists users matching the filters, with roles attached, newest-created
    /// first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn find_all(&self, filters: &UserFilters) -> UserDirectoryResult<Vec<UserWithRoles>> {
        Ok(self.users.find_all(filters).await?)
    }

    /// Finds a user by identifier in the full profile shape: roles, created
    /// tasks, active assignment rows, and authored comments.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] (wrapped) when the user is
    /// absent or soft-deleted.
    pub async fn find_one(&self, id: UserId) -> UserDirectoryResult<UserProfile> {
        Ok(self.users.find_profile(id).await?)
    }

    /// Finds a user by exact email match; `Ok(None)` on absence, so the
    /// login path can distinguish "no such user" from a failure.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> UserDirectoryResult<Option<UserWithRoles>> {
        Ok(self.users.find_by_email(email).await?)
    }

    /// Applies a partial update; an email change is re-checked for
    /// uniqueness and a password change is re-hashed.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] (wrapped) when the user is
    /// absent or soft-deleted, and `DuplicateEmail` when an email change
    /// collides.
    pub async fn update(&self, id: UserId, patch: &UserPatch) -> UserDirectoryResult<UserWithRoles> {
        let UserWithRoles { mut user, roles } = self.users.find_by_id(id).await?;
        user.apply(patch, &*self.clock);
        if let Some(password) = &patch.password {
            let password_hash = self.hasher.hash(password)?;
            user.set_password_hash(password_hash, &*self.clock);
        }
        self.users.update(&user).await?;
        tracing::debug!(user_id = %id, "updated user");
        Ok(UserWithRoles { user, roles })
    }

    /// Soft-deletes a user.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] (wrapped) when the user is
    /// absent or already soft-deleted.
    pub async fn remove(&self, id: UserId) -> UserDirectoryResult<()> {
        let UserWithRoles { mut user, .. } = self.users.find_by_id(id).await?;
        user.mark_deleted(&*self.clock);
        self.users.update(&user).await?;
        tracing::debug!(user_id = %id, "soft-deleted user");
        Ok(())
    }

    /// Stamps the last-login timestamp with the current clock time.
    ///
    /// Last-write-wins; concurrent logins need no coordination.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] (wrapped) when the user is
    /// absent or soft-deleted.
    pub async fn update_last_login(&self, id: UserId) -> UserDirectoryResult<()> {
        let UserWithRoles { mut user, .. } = self.users.find_by_id(id).await?;
        user.record_login(&*self.clock);
        self.users.update(&user).await?;
        Ok(())
    }

    /// Replaces the user's role assignment set with fresh `assigned_at`
    /// stamps; an empty slice clears all assignments.
    ///
    /// # Errors
    ///
    /// Returns [`UserRepositoryError::NotFound`] (wrapped) when the user is
    /// absent or soft-deleted.
    pub async fn set_roles(&self, user_id: UserId, role_ids: &[RoleId]) -> UserDirectoryResult<()> {
        self.users
            .set_roles(user_id, role_ids, self.clock.utc())
            .await?;
        tracing::debug!(user_id = %user_id, roles = role_ids.len(), "replaced role set");
        Ok(())
    }
}
