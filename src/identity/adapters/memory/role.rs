//! In-memory role repository.

use super::contains_ci;
use crate::identity::domain::{Role, RoleFilters, RoleId};
use crate::identity::ports::{RoleRepository, RoleRepositoryError, RoleRepositoryResult};
use crate::storage::MemoryDb;
use crate::storage::memory::{MemoryState, newest_first};
use async_trait::async_trait;
use std::sync::Arc;

/// In-memory implementation of [`RoleRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryRoleRepository {
    db: Arc<MemoryDb>,
}

impl InMemoryRoleRepository {
    /// Creates a repository over the shared in-memory database.
    #[must_use]
    pub const fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }
}

fn name_taken(state: &MemoryState, name: &str, except: RoleId) -> bool {
    state
        .roles
        .iter()
        .any(|role| role.id() != except && !role.is_deleted() && role.name() == name)
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn insert(&self, role: &Role) -> RoleRepositoryResult<()> {
        let mut state = self.db.write().map_err(RoleRepositoryError::persistence)?;
        if name_taken(&state, role.name(), role.id()) {
            return Err(RoleRepositoryError::DuplicateName(role.name().to_owned()));
        }
        state.roles.push(role.clone());
        Ok(())
    }

    async fn update(&self, role: &Role) -> RoleRepositoryResult<()> {
        let mut state = self.db.write().map_err(RoleRepositoryError::persistence)?;
        if name_taken(&state, role.name(), role.id()) {
            return Err(RoleRepositoryError::DuplicateName(role.name().to_owned()));
        }
        let row = state
            .roles
            .iter_mut()
            .find(|row| row.id() == role.id())
            .ok_or(RoleRepositoryError::NotFound(role.id()))?;
        *row = role.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: RoleId) -> RoleRepositoryResult<Role> {
        let state = self.db.read().map_err(RoleRepositoryError::persistence)?;
        state
            .roles
            .iter()
            .find(|role| role.id() == id && !role.is_deleted())
            .cloned()
            .ok_or(RoleRepositoryError::NotFound(id))
    }

    async fn find_by_name(&self, name: &str) -> RoleRepositoryResult<Option<Role>> {
        let state = self.db.read().map_err(RoleRepositoryError::persistence)?;
        Ok(state
            .roles
            .iter()
            .find(|role| !role.is_deleted() && role.name() == name)
            .cloned())
    }

    async fn find_all(&self, filters: &RoleFilters) -> RoleRepositoryResult<Vec<Role>> {
        let state = self.db.read().map_err(RoleRepositoryError::persistence)?;
        let needle = filters.search.as_deref().map(str::to_lowercase);
        let matching = state.roles.iter().filter(|role| {
            if role.is_deleted() {
                return false;
            }
            if let Some(is_active) = filters.is_active
                && role.is_active() != is_active
            {
                return false;
            }
            if let Some(needle) = &needle {
                return contains_ci(role.name(), needle)
                    || role
                        .description()
                        .is_some_and(|description| contains_ci(description, needle));
            }
            true
        });
        Ok(newest_first(matching.cloned(), Role::created_at))
    }
}
