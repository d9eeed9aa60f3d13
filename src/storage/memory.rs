//! Thread-safe in-memory relational store.
//!
//! One `RwLock` guards the whole store, so multi-statement commands (task
//! creation with relation wiring, update with set replacement) are atomic
//! under a single write guard. Tables keep insertion order; newest-first
//! listings reverse-iterate and sort by creation timestamp.

use crate::comment::domain::Comment;
use crate::history::domain::HistoryEntry;
use crate::identity::domain::{Role, RoleAssignment, User};
use crate::task::domain::{Task, TaskAssignment, TaskId};
use crate::taxonomy::domain::{Category, CategoryId, Project, ProjectId};
use std::io;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A task-to-category join row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CategoryLink {
    /// Linked task.
    pub task_id: TaskId,
    /// Linked category.
    pub category_id: CategoryId,
}

/// A task-to-project join row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProjectLink {
    /// Linked task.
    pub task_id: TaskId,
    /// Linked project.
    pub project_id: ProjectId,
}

/// All tables of the in-memory schema, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    pub users: Vec<User>,
    pub roles: Vec<Role>,
    pub user_roles: Vec<RoleAssignment>,
    pub categories: Vec<Category>,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub task_assignments: Vec<TaskAssignment>,
    pub task_categories: Vec<CategoryLink>,
    pub task_projects: Vec<ProjectLink>,
    pub comments: Vec<Comment>,
    pub task_history: Vec<HistoryEntry>,
}

/// Shared in-memory database handle.
///
/// Cloneable repositories hold this behind an `Arc`; every repository built
/// from the same handle sees the same tables.
#[derive(Debug, Default)]
pub struct MemoryDb {
    state: RwLock<MemoryState>,
}

impl MemoryDb {
    /// Creates an empty in-memory database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the read guard, surfacing lock poisoning as an I/O error.
    pub(crate) fn read(&self) -> Result<RwLockReadGuard<'_, MemoryState>, io::Error> {
        self.state.read().map_err(|err| io::Error::other(err.to_string()))
    }

    /// Acquires the write guard, surfacing lock poisoning as an I/O error.
    pub(crate) fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryState>, io::Error> {
        self.state.write().map_err(|err| io::Error::other(err.to_string()))
    }
}

/// Case-insensitive substring match used by search filters.
pub(crate) fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Orders rows newest-created first with a stable tie-break on insertion
/// order (later rows win ties).
pub(crate) fn newest_first<T, F>(rows: impl DoubleEndedIterator<Item = T>, created_at: F) -> Vec<T>
where
    F: Fn(&T) -> chrono::DateTime<chrono::Utc>,
{
    let mut collected: Vec<T> = rows.rev().collect();
    collected.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    collected
}
