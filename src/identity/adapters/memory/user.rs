//! In-memory user repository.

use super::contains_ci;
use crate::comment::domain::Comment;
use crate::identity::domain::{
    EmailAddress, Role, RoleId, User, UserFilters, UserId, UserProfile, UserWithRoles,
};
use crate::identity::ports::{UserRepository, UserRepositoryError, UserRepositoryResult};
use crate::task::domain::Task;
use crate::storage::memory::{MemoryState, newest_first};
use crate::storage::MemoryDb;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// In-memory implementation of [`UserRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    db: Arc<MemoryDb>,
}

impl InMemoryUserRepository {
    /// Creates a repository over the shared in-memory database.
    #[must_use]
    pub const fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }
}

/// Collects the non-deleted roles assigned to a user.
fn roles_for(state: &MemoryState, user_id: UserId) -> Vec<Role> {
    let role_ids: Vec<RoleId> = state
        .user_roles
        .iter()
        .filter(|row| row.user_id == user_id)
        .map(|row| row.role_id)
        .collect();
    state
        .roles
        .iter()
        .filter(|role| role_ids.contains(&role.id()) && !role.is_deleted())
        .cloned()
        .collect()
}

fn with_roles(state: &MemoryState, user: User) -> UserWithRoles {
    let roles = roles_for(state, user.id());
    UserWithRoles { user, roles }
}

fn email_taken(state: &MemoryState, email: &EmailAddress, except: UserId) -> bool {
    state
        .users
        .iter()
        .any(|user| user.id() != except && !user.is_deleted() && user.email() == email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.db.write().map_err(UserRepositoryError::persistence)?;
        if email_taken(&state, user.email(), user.id()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let mut state = self.db.write().map_err(UserRepositoryError::persistence)?;
        if email_taken(&state, user.email(), user.id()) {
            return Err(UserRepositoryError::DuplicateEmail(user.email().clone()));
        }
        let row = state
            .users
            .iter_mut()
            .find(|row| row.id() == user.id())
            .ok_or(UserRepositoryError::NotFound(user.id()))?;
        *row = user.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<UserWithRoles> {
        let state = self.db.read().map_err(UserRepositoryError::persistence)?;
        let user = state
            .users
            .iter()
            .find(|user| user.id() == id && !user.is_deleted())
            .cloned()
            .ok_or(UserRepositoryError::NotFound(id))?;
        Ok(with_roles(&state, user))
    }

    async fn find_profile(&self, id: UserId) -> UserRepositoryResult<UserProfile> {
        let state = self.db.read().map_err(UserRepositoryError::persistence)?;
        let user = state
            .users
            .iter()
            .find(|user| user.id() == id && !user.is_deleted())
            .cloned()
            .ok_or(UserRepositoryError::NotFound(id))?;
        let roles = roles_for(&state, id);
        let created_tasks = newest_first(
            state
                .tasks
                .iter()
                .filter(|task| task.created_by() == id && !task.is_deleted())
                .cloned(),
            Task::created_at,
        );
        let assignments = state
            .task_assignments
            .iter()
            .filter(|assignment| assignment.user_id() == id && !assignment.is_deleted())
            .cloned()
            .collect();
        let comments = newest_first(
            state
                .comments
                .iter()
                .filter(|comment| comment.author_id() == id && !comment.is_deleted())
                .cloned(),
            Comment::created_at,
        );
        Ok(UserProfile {
            user,
            roles,
            created_tasks,
            assignments,
            comments,
        })
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> UserRepositoryResult<Option<UserWithRoles>> {
        let state = self.db.read().map_err(UserRepositoryError::persistence)?;
        let user = state
            .users
            .iter()
            .find(|user| !user.is_deleted() && user.email() == email)
            .cloned();
        Ok(user.map(|found| with_roles(&state, found)))
    }

    async fn find_all(&self, filters: &UserFilters) -> UserRepositoryResult<Vec<UserWithRoles>> {
        let state = self.db.read().map_err(UserRepositoryError::persistence)?;
        let needle = filters.search.as_deref().map(str::to_lowercase);
        let matching = state.users.iter().filter(|user| {
            if user.is_deleted() {
                return false;
            }
            if let Some(is_active) = filters.is_active
                && user.is_active() != is_active
            {
                return false;
            }
            if let Some(needle) = &needle {
                return contains_ci(user.first_name(), needle)
                    || contains_ci(user.last_name(), needle)
                    || contains_ci(user.email().as_str(), needle);
            }
            true
        });
        let ordered = newest_first(matching.cloned(), User::created_at);
        Ok(ordered
            .into_iter()
            .map(|user| with_roles(&state, user))
            .collect())
    }

    async fn set_roles(
        &self,
        user_id: UserId,
        role_ids: &[RoleId],
        assigned_at: DateTime<Utc>,
    ) -> UserRepositoryResult<()> {
        let mut state = self.db.write().map_err(UserRepositoryError::persistence)?;
        let exists = state
            .users
            .iter()
            .any(|user| user.id() == user_id && !user.is_deleted());
        if !exists {
            return Err(UserRepositoryError::NotFound(user_id));
        }
        state.user_roles.retain(|row| row.user_id != user_id);
        for role_id in role_ids {
            state.user_roles.push(crate::identity::domain::RoleAssignment {
                user_id,
                role_id: *role_id,
                assigned_at,
            });
        }
        Ok(())
    }
}
