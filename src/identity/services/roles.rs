//! Role management service.

use crate::identity::domain::{IdentityDomainError, Role, RoleFilters, RoleId, RolePatch};
use crate::identity::ports::{RoleRepository, RoleRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for role operations.
#[derive(Debug, Error)]
pub enum RoleServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RoleRepositoryError),
}

/// Result type for role service operations.
pub type RoleServiceResult<T> = Result<T, RoleServiceError>;

/// Role management service.
#[derive(Clone)]
pub struct RoleService<R, C>
where
    R: RoleRepository,
    C: Clock + Send + Sync,
{
    roles: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> RoleService<R, C>
where
    R: RoleRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new role service.
    #[must_use]
    pub const fn new(roles: Arc<R>, clock: Arc<C>) -> Self {
        Self { roles, clock }
    }

    /// Creates a new active role.
    ///
    /// # Errors
    ///
    /// Returns [`RoleRepositoryError::DuplicateName`] (wrapped) when a
    /// non-deleted role already holds the name.
    pub async fn create(
        &self,
        name: impl Into<String> + Send,
        description: Option<String>,
    ) -> RoleServiceResult<Role> {
        let role = Role::new(name, description, &*self.clock)?;
        self.roles.insert(&role).await?;
        tracing::debug!(role_id = %role.id(), "created role");
        Ok(role)
    }

    /// Lists roles matching the filters, newest-created first.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn find_all(&self, filters: &RoleFilters) -> RoleServiceResult<Vec<Role>> {
        Ok(self.roles.find_all(filters).await?)
    }

    /// Finds a role by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RoleRepositoryError::NotFound`] (wrapped) when the role is
    /// absent or soft-deleted.
    pub async fn find_one(&self, id: RoleId) -> RoleServiceResult<Role> {
        Ok(self.roles.find_by_id(id).await?)
    }

    /// Finds a role by exact name; `Ok(None)` on absence, for assignment
    /// bootstrapping.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn find_by_name(&self, name: &str) -> RoleServiceResult<Option<Role>> {
        Ok(self.roles.find_by_name(name).await?)
    }

    /// Applies a partial update; a name change is re-checked for uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`RoleRepositoryError::NotFound`] (wrapped) when the role is
    /// absent or soft-deleted, and `DuplicateName` on a collision.
    pub async fn update(&self, id: RoleId, patch: &RolePatch) -> RoleServiceResult<Role> {
        let mut role = self.roles.find_by_id(id).await?;
        role.apply(patch, &*self.clock);
        self.roles.update(&role).await?;
        Ok(role)
    }

    /// Soft-deletes a role.
    ///
    /// # Errors
    ///
    /// Returns [`RoleRepositoryError::NotFound`] (wrapped) when the role is
    /// absent or already soft-deleted.
    pub async fn remove(&self, id: RoleId) -> RoleServiceResult<()> {
        let mut role = self.roles.find_by_id(id).await?;
        role.mark_deleted(&*self.clock);
        self.roles.update(&role).await?;
        tracing::debug!(role_id = %id, "soft-deleted role");
        Ok(())
    }
}
