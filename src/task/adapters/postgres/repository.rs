//! `PostgreSQL` task repository.
//!
//! Joined shapes are assembled with batched follow-up queries (`eq_any` over
//! the page's task ids) rather than SQL joins, so one listing costs a fixed
//! number of round trips regardless of page size. Creator and assignee
//! summaries resolve through unscoped user reads.

use super::models::{AssignmentRow, TaskCategoryRow, TaskProjectRow, TaskRow};
use crate::comment::adapters::postgres::CommentRow;
use crate::identity::domain::UserId;
use crate::storage::PgPool;
use crate::storage::postgres::schema::{
    categories, comments, projects, task_assignments, task_categories, task_projects, tasks,
    users,
};
use crate::task::domain::{
    AssignmentWithUser, Task, TaskAssignment, TaskDetails, TaskFilters, TaskId, TaskWithRelations,
    UserSummary,
};
use crate::task::ports::{
    AssignmentScope, RelationReplacement, TaskRepository, TaskRepositoryError,
    TaskRepositoryResult,
};
use crate::taxonomy::adapters::postgres::{CategoryRow, ProjectRow};
use crate::taxonomy::domain::{Category, CategoryId, Project, ProjectId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;
use std::io;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(
        &self,
        task: &Task,
        assignments: &[TaskAssignment],
        category_ids: &[CategoryId],
        project_ids: &[ProjectId],
    ) -> TaskRepositoryResult<()> {
        let task_row = TaskRow::from_domain(task);
        let assignment_rows: Vec<AssignmentRow> =
            assignments.iter().map(AssignmentRow::from_domain).collect();
        let category_rows: Vec<TaskCategoryRow> = category_ids
            .iter()
            .map(|category_id| TaskCategoryRow {
                task_id: task.id().into_inner(),
                category_id: category_id.into_inner(),
            })
            .collect();
        let project_rows: Vec<TaskProjectRow> = project_ids
            .iter()
            .map(|project_id| TaskProjectRow {
                task_id: task.id().into_inner(),
                project_id: project_id.into_inner(),
            })
            .collect();

        self.run_blocking(move |connection| {
            connection.transaction(|connection| {
                diesel::insert_into(tasks::table)
                    .values(&task_row)
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
                diesel::insert_into(task_assignments::table)
                    .values(&assignment_rows)
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
                diesel::insert_into(task_categories::table)
                    .values(&category_rows)
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
                diesel::insert_into(task_projects::table)
                    .values(&project_rows)
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
                Ok(())
            })
        })
        .await
    }

    async fn update(
        &self,
        task: &Task,
        relations: &RelationReplacement,
    ) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let task_row = TaskRow::from_domain(task);
        let assignment_replacement: Option<(Vec<AssignmentRow>, DateTime<Utc>)> =
            relations.assignments.as_ref().map(|replacement| {
                (
                    replacement.rows.iter().map(AssignmentRow::from_domain).collect(),
                    replacement.removed_at,
                )
            });
        let category_rows: Option<Vec<TaskCategoryRow>> =
            relations.categories.as_ref().map(|category_ids| {
                category_ids
                    .iter()
                    .map(|category_id| TaskCategoryRow {
                        task_id: task_id.into_inner(),
                        category_id: category_id.into_inner(),
                    })
                    .collect()
            });
        let project_rows: Option<Vec<TaskProjectRow>> =
            relations.projects.as_ref().map(|project_ids| {
                project_ids
                    .iter()
                    .map(|project_id| TaskProjectRow {
                        task_id: task_id.into_inner(),
                        project_id: project_id.into_inner(),
                    })
                    .collect()
            });

        self.run_blocking(move |connection| {
            connection.transaction(|connection| {
                let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                    .set(&task_row)
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
                if updated == 0 {
                    return Err(TaskRepositoryError::NotFound(task_id));
                }

                if let Some((rows, removed_at)) = &assignment_replacement {
                    // Superseded rows are soft-deleted, not dropped, so the
                    // widened per-user lookup scope can still see them.
                    diesel::update(
                        task_assignments::table
                            .filter(task_assignments::task_id.eq(task_id.into_inner()))
                            .filter(task_assignments::deleted_at.is_null()),
                    )
                    .set((
                        task_assignments::deleted_at.eq(Some(*removed_at)),
                        task_assignments::updated_at.eq(*removed_at),
                    ))
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
                    diesel::insert_into(task_assignments::table)
                        .values(rows)
                        .execute(connection)
                        .map_err(TaskRepositoryError::persistence)?;
                }
                if let Some(rows) = &category_rows {
                    diesel::delete(
                        task_categories::table
                            .filter(task_categories::task_id.eq(task_id.into_inner())),
                    )
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
                    diesel::insert_into(task_categories::table)
                        .values(rows)
                        .execute(connection)
                        .map_err(TaskRepositoryError::persistence)?;
                }
                if let Some(rows) = &project_rows {
                    diesel::delete(
                        task_projects::table
                            .filter(task_projects::task_id.eq(task_id.into_inner())),
                    )
                    .execute(connection)
                    .map_err(TaskRepositoryError::persistence)?;
                    diesel::insert_into(task_projects::table)
                        .values(rows)
                        .execute(connection)
                        .map_err(TaskRepositoryError::persistence)?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_all(
        &self,
        filters: &TaskFilters,
    ) -> TaskRepositoryResult<Vec<TaskWithRelations>> {
        let filters = filters.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table.into_boxed().filter(tasks::deleted_at.is_null());
            if let Some(status) = filters.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(priority) = filters.priority {
                query = query.filter(tasks::priority.eq(priority.value()));
            }
            if let Some(created_by) = filters.created_by {
                query = query.filter(tasks::created_by.eq(created_by.into_inner()));
            }
            if let Some(search) = &filters.search {
                let pattern = format!("%{search}%");
                query = query.filter(
                    tasks::title
                        .ilike(pattern.clone())
                        .nullable()
                        .or(tasks::description.ilike(pattern)),
                );
            }
            if let Some(due_from) = filters.due_from {
                query = query.filter(tasks::due_date.ge(due_from));
            }
            if let Some(due_to) = filters.due_to {
                query = query.filter(tasks::due_date.le(due_to));
            }
            let rows = query
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            assemble_page(connection, rows)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<TaskDetails> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            let mut page = assemble_page(connection, vec![row])?;
            let summary = page.pop().ok_or(TaskRepositoryError::NotFound(id))?;

            let comment_rows = comments::table
                .filter(comments::task_id.eq(id.into_inner()))
                .filter(comments::deleted_at.is_null())
                .order(comments::created_at.asc())
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            let comments = comment_rows
                .into_iter()
                .map(CommentRow::into_domain)
                .collect();

            Ok(TaskDetails { summary, comments })
        })
        .await
    }

    async fn find_by_id_unscoped(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(TaskRow::into_domain).transpose()
        })
        .await
    }

    async fn find_by_creator(
        &self,
        creator_id: UserId,
    ) -> TaskRepositoryResult<Vec<TaskWithRelations>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::created_by.eq(creator_id.into_inner()))
                .filter(tasks::deleted_at.is_null())
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            assemble_page(connection, rows)
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[TaskId]) -> TaskRepositoryResult<Vec<TaskWithRelations>> {
        let id_values: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::id.eq_any(id_values))
                .filter(tasks::deleted_at.is_null())
                .order(tasks::created_at.desc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            assemble_page(connection, rows)
        })
        .await
    }

    async fn assignments_for_user(
        &self,
        user_id: UserId,
        scope: AssignmentScope,
    ) -> TaskRepositoryResult<Vec<TaskAssignment>> {
        self.run_blocking(move |connection| {
            let mut query = task_assignments::table
                .into_boxed()
                .filter(task_assignments::user_id.eq(user_id.into_inner()));
            if scope == AssignmentScope::ActiveOnly {
                query = query.filter(task_assignments::deleted_at.is_null());
            }
            let rows = query
                .select(AssignmentRow::as_select())
                .load::<AssignmentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(AssignmentRow::into_domain).collect()
        })
        .await
    }
}

/// Assembles the standard joined shape for a page of task rows with one
/// batched query per related table.
fn assemble_page(
    connection: &mut PgConnection,
    rows: Vec<TaskRow>,
) -> TaskRepositoryResult<Vec<TaskWithRelations>> {
    let task_ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.id).collect();

    let assignment_rows = task_assignments::table
        .filter(task_assignments::task_id.eq_any(&task_ids))
        .filter(task_assignments::deleted_at.is_null())
        .select(AssignmentRow::as_select())
        .load::<AssignmentRow>(connection)
        .map_err(TaskRepositoryError::persistence)?;

    let category_links: Vec<(uuid::Uuid, uuid::Uuid)> = task_categories::table
        .filter(task_categories::task_id.eq_any(&task_ids))
        .select((task_categories::task_id, task_categories::category_id))
        .load(connection)
        .map_err(TaskRepositoryError::persistence)?;
    let category_ids: Vec<uuid::Uuid> = category_links.iter().map(|(_, id)| *id).collect();
    let categories_by_id: HashMap<uuid::Uuid, Category> = categories::table
        .filter(categories::id.eq_any(category_ids))
        .filter(categories::deleted_at.is_null())
        .select(CategoryRow::as_select())
        .load::<CategoryRow>(connection)
        .map_err(TaskRepositoryError::persistence)?
        .into_iter()
        .map(|row| (row.id, row.into_domain()))
        .collect();

    let project_links: Vec<(uuid::Uuid, uuid::Uuid)> = task_projects::table
        .filter(task_projects::task_id.eq_any(&task_ids))
        .select((task_projects::task_id, task_projects::project_id))
        .load(connection)
        .map_err(TaskRepositoryError::persistence)?;
    let project_ids: Vec<uuid::Uuid> = project_links.iter().map(|(_, id)| *id).collect();
    let projects_by_id: HashMap<uuid::Uuid, Project> = projects::table
        .filter(projects::id.eq_any(project_ids))
        .filter(projects::deleted_at.is_null())
        .select(ProjectRow::as_select())
        .load::<ProjectRow>(connection)
        .map_err(TaskRepositoryError::persistence)?
        .into_iter()
        .map(|row| {
            let id = row.id;
            row.into_domain()
                .map(|project| (id, project))
                .map_err(TaskRepositoryError::persistence)
        })
        .collect::<TaskRepositoryResult<_>>()?;

    // Creator and assignee summaries resolve unscoped so removed users still
    // render on their rows.
    let mut user_ids: Vec<uuid::Uuid> = rows.iter().map(|row| row.created_by).collect();
    user_ids.extend(assignment_rows.iter().map(|row| row.user_id));
    let summaries_by_id: HashMap<uuid::Uuid, UserSummary> = users::table
        .filter(users::id.eq_any(user_ids))
        .select((users::id, users::first_name, users::last_name, users::email))
        .load::<(uuid::Uuid, String, String, String)>(connection)
        .map_err(TaskRepositoryError::persistence)?
        .into_iter()
        .map(|(id, first_name, last_name, email)| {
            (
                id,
                UserSummary {
                    id: UserId::from_uuid(id),
                    first_name,
                    last_name,
                    email,
                },
            )
        })
        .collect();

    let summary_for = |user_id: uuid::Uuid| -> TaskRepositoryResult<UserSummary> {
        summaries_by_id.get(&user_id).cloned().ok_or_else(|| {
            TaskRepositoryError::persistence(io::Error::other(format!(
                "dangling user reference: {user_id}"
            )))
        })
    };

    rows.into_iter()
        .map(|row| {
            let task_id = row.id;
            let created_by = summary_for(row.created_by)?;
            let task = row.into_domain()?;

            let categories = category_links
                .iter()
                .filter(|(linked_task, _)| *linked_task == task_id)
                .filter_map(|(_, category_id)| categories_by_id.get(category_id).cloned())
                .collect();
            let projects = project_links
                .iter()
                .filter(|(linked_task, _)| *linked_task == task_id)
                .filter_map(|(_, project_id)| projects_by_id.get(project_id).cloned())
                .collect();
            let assignments = assignment_rows
                .iter()
                .filter(|assignment| assignment.task_id == task_id)
                .map(|assignment| {
                    let assignee = summary_for(assignment.user_id)?;
                    Ok(AssignmentWithUser {
                        assignment: assignment.clone().into_domain()?,
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
        })
        .collect()
}
