//! In-memory task repository.
//!
//! Joined shapes are assembled per row: creator and assignee summaries
//! resolve through unscoped user reads, while category, project, and
//! assignment relations drop soft-deleted rows.

use crate::identity::domain::UserId;
use crate::storage::MemoryDb;
use crate::storage::memory::{CategoryLink, MemoryState, ProjectLink, contains_ci, newest_first};
use crate::task::domain::{
    AssignmentWithUser, Task, TaskAssignment, TaskDetails, TaskFilters, TaskId, TaskWithRelations,
    UserSummary,
};
use crate::task::ports::{
    AssignmentScope, RelationReplacement, TaskRepository, TaskRepositoryError,
    TaskRepositoryResult,
};
use crate::taxonomy::domain::{CategoryId, ProjectId};
use async_trait::async_trait;
use std::io;
use std::sync::Arc;

/// In-memory implementation of [`TaskRepository`].
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    db: Arc<MemoryDb>,
}

impl InMemoryTaskRepository {
    /// Creates a repository over the shared in-memory database.
    #[must_use]
    pub const fn new(db: Arc<MemoryDb>) -> Self {
        Self { db }
    }
}

/// Resolves a user summary without the soft-deletion scope, so rows created
/// by a since-removed user still render.
fn user_summary(state: &MemoryState, user_id: UserId) -> TaskRepositoryResult<UserSummary> {
    state
        .users
        .iter()
        .find(|user| user.id() == user_id)
        .map(UserSummary::from)
        .ok_or_else(|| {
            TaskRepositoryError::persistence(io::Error::other(format!(
                "dangling user reference: {user_id}"
            )))
        })
}

fn assemble(state: &MemoryState, task: Task) -> TaskRepositoryResult<TaskWithRelations> {
    let created_by = user_summary(state, task.created_by())?;

    let category_ids: Vec<CategoryId> = state
        .task_categories
        .iter()
        .filter(|link| link.task_id == task.id())
        .map(|link| link.category_id)
        .collect();
    let categories = state
        .categories
        .iter()
        .filter(|category| category_ids.contains(&category.id()) && !category.is_deleted())
        .cloned()
        .collect();

    let project_ids: Vec<ProjectId> = state
        .task_projects
        .iter()
        .filter(|link| link.task_id == task.id())
        .map(|link| link.project_id)
        .collect();
    let projects = state
        .projects
        .iter()
        .filter(|project| project_ids.contains(&project.id()) && !project.is_deleted())
        .cloned()
        .collect();

    let assignments = state
        .task_assignments
        .iter()
        .filter(|assignment| assignment.task_id() == task.id() && !assignment.is_deleted())
        .map(|assignment| {
            let assignee = user_summary(state, assignment.user_id())?;
            Ok(AssignmentWithUser {
                assignment: assignment.clone(),
                assignee,
            })
        })
        .collect::<TaskRepositoryResult<Vec<_>>>()?;

    Ok(TaskWithRelations {
        task,
        created_by,
        categories,
        assignments,
        projects,
    })
}

fn assemble_all(
    state: &MemoryState,
    tasks: Vec<Task>,
) -> TaskRepositoryResult<Vec<TaskWithRelations>> {
    tasks
        .into_iter()
        .map(|task| assemble(state, task))
        .collect()
}

fn matches(task: &Task, filters: &TaskFilters, needle: Option<&str>) -> bool {
    if task.is_deleted() {
        return false;
    }
    if let Some(status) = filters.status
        && task.status() != status
    {
        return false;
    }
    if let Some(priority) = filters.priority
        && task.priority() != priority
    {
        return false;
    }
    if let Some(created_by) = filters.created_by
        && task.created_by() != created_by
    {
        return false;
    }
    if let Some(due_from) = filters.due_from
        && !task.due_date().is_some_and(|due| due >= due_from)
    {
        return false;
    }
    if let Some(due_to) = filters.due_to
        && !task.due_date().is_some_and(|due| due <= due_to)
    {
        return false;
    }
    if let Some(needle) = needle {
        return contains_ci(task.title().as_str(), needle)
            || task
                .description()
                .is_some_and(|description| contains_ci(description, needle));
    }
    true
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(
        &self,
        task: &Task,
        assignments: &[TaskAssignment],
        category_ids: &[CategoryId],
        project_ids: &[ProjectId],
    ) -> TaskRepositoryResult<()> {
        let mut state = self.db.write().map_err(TaskRepositoryError::persistence)?;
        state.tasks.push(task.clone());
        state.task_assignments.extend(assignments.iter().cloned());
        state
            .task_categories
            .extend(category_ids.iter().map(|category_id| CategoryLink {
                task_id: task.id(),
                category_id: *category_id,
            }));
        state
            .task_projects
            .extend(project_ids.iter().map(|project_id| ProjectLink {
                task_id: task.id(),
                project_id: *project_id,
            }));
        Ok(())
    }

    async fn update(
        &self,
        task: &Task,
        relations: &RelationReplacement,
    ) -> TaskRepositoryResult<()> {
        let mut state = self.db.write().map_err(TaskRepositoryError::persistence)?;
        let row = state
            .tasks
            .iter_mut()
            .find(|row| row.id() == task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *row = task.clone();

        if let Some(replacement) = &relations.assignments {
            // Superseded rows are soft-deleted, not dropped, so the widened
            // per-user lookup scope can still see them.
            for assignment in state
                .task_assignments
                .iter_mut()
                .filter(|assignment| assignment.task_id() == task.id() && !assignment.is_deleted())
            {
                assignment.mark_deleted_at(replacement.removed_at);
            }
            state.task_assignments.extend(replacement.rows.iter().cloned());
        }
        if let Some(category_ids) = &relations.categories {
            state.task_categories.retain(|link| link.task_id != task.id());
            state
                .task_categories
                .extend(category_ids.iter().map(|category_id| CategoryLink {
                    task_id: task.id(),
                    category_id: *category_id,
                }));
        }
        if let Some(project_ids) = &relations.projects {
            state.task_projects.retain(|link| link.task_id != task.id());
            state
                .task_projects
                .extend(project_ids.iter().map(|project_id| ProjectLink {
                    task_id: task.id(),
                    project_id: *project_id,
                }));
        }
        Ok(())
    }

    async fn find_all(
        &self,
        filters: &TaskFilters,
    ) -> TaskRepositoryResult<Vec<TaskWithRelations>> {
        let state = self.db.read().map_err(TaskRepositoryError::persistence)?;
        let needle = filters.search.as_deref().map(str::to_lowercase);
        let matching = state
            .tasks
            .iter()
            .filter(|task| matches(task, filters, needle.as_deref()));
        let ordered = newest_first(matching.cloned(), Task::created_at);
        assemble_all(&state, ordered)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<TaskDetails> {
        let state = self.db.read().map_err(TaskRepositoryError::persistence)?;
        let task = state
            .tasks
            .iter()
            .find(|task| task.id() == id && !task.is_deleted())
            .cloned()
            .ok_or(TaskRepositoryError::NotFound(id))?;
        let summary = assemble(&state, task)?;

        // Insertion order is creation order, so the thread reads oldest-first.
        let mut comments: Vec<_> = state
            .comments
            .iter()
            .filter(|comment| comment.task_id() == id && !comment.is_deleted())
            .cloned()
            .collect();
        comments.sort_by_key(crate::comment::domain::Comment::created_at);

        Ok(TaskDetails { summary, comments })
    }

    async fn find_by_id_unscoped(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.db.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.iter().find(|task| task.id() == id).cloned())
    }

    async fn find_by_creator(
        &self,
        creator_id: UserId,
    ) -> TaskRepositoryResult<Vec<TaskWithRelations>> {
        let state = self.db.read().map_err(TaskRepositoryError::persistence)?;
        let matching = state
            .tasks
            .iter()
            .filter(|task| task.created_by() == creator_id && !task.is_deleted());
        let ordered = newest_first(matching.cloned(), Task::created_at);
        assemble_all(&state, ordered)
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<TaskWithRelations>> {
        let state = self.db.read().map_err(TaskRepositoryError::persistence)?;
        let matching = state
            .tasks
            .iter()
            .filter(|task| ids.contains(&task.id()) && !task.is_deleted());
        let ordered = newest_first(matching.cloned(), Task::created_at);
        assemble_all(&state, ordered)
    }

    async fn assignments_for_user(
        &self,
        user_id: UserId,
        scope: AssignmentScope,
    ) -> TaskRepositoryResult<Vec<TaskAssignment>> {
        let state = self.db.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state
            .task_assignments
            .iter()
            .filter(|assignment| {
                assignment.user_id() == user_id
                    && (scope == AssignmentScope::IncludeRemoved || !assignment.is_deleted())
            })
            .cloned()
            .collect())
    }
}
