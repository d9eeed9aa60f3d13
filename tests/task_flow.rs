//! End-to-end integration tests for the task management flow.
//!
//! These tests drive the services the way an application shell would: users
//! and roles come from the identity module, categories and projects from the
//! taxonomy module, and tasks, comments, and audit history flow through
//! their own services over one shared in-memory database.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::{fixture, rstest};
use taskhub::comment::{adapters::InMemoryCommentRepository, services::CommentService};
use taskhub::history::{
    adapters::InMemoryHistoryRepository,
    services::HistoryService,
};
use taskhub::identity::{
    adapters::{BcryptPasswordHasher, InMemoryRoleRepository, InMemoryUserRepository},
    domain::{EmailAddress, NewUser, UserId},
    services::{RoleService, UserDirectoryService},
};
use taskhub::storage::MemoryDb;
use taskhub::task::{
    adapters::InMemoryTaskRepository,
    domain::{AssignmentStatus, Priority, TaskChangeSet, TaskDraft, TaskStatus, TaskTitle},
    ports::AssignmentScope,
    services::TaskService,
};
use taskhub::taxonomy::{
    adapters::{InMemoryCategoryRepository, InMemoryProjectRepository},
    domain::ProjectDraft,
    services::{CategoryService, ProjectService},
};

struct App {
    directory: UserDirectoryService<InMemoryUserRepository, BcryptPasswordHasher, DefaultClock>,
    roles: RoleService<InMemoryRoleRepository, DefaultClock>,
    categories: CategoryService<InMemoryCategoryRepository, DefaultClock>,
    projects: ProjectService<InMemoryProjectRepository, DefaultClock>,
    tasks: TaskService<InMemoryTaskRepository, InMemoryHistoryRepository, DefaultClock>,
    comments: CommentService<InMemoryCommentRepository, DefaultClock>,
    history: HistoryService<InMemoryHistoryRepository>,
}

#[fixture]
fn app() -> App {
    let db = Arc::new(MemoryDb::new());
    let clock = Arc::new(DefaultClock);
    let history_repo = Arc::new(InMemoryHistoryRepository::new(Arc::clone(&db)));
    App {
        directory: UserDirectoryService::new(
            Arc::new(InMemoryUserRepository::new(Arc::clone(&db))),
            // Low cost keeps the hashing rounds cheap under test.
            Arc::new(BcryptPasswordHasher::new(4)),
            Arc::clone(&clock),
        ),
        roles: RoleService::new(
            Arc::new(InMemoryRoleRepository::new(Arc::clone(&db))),
            Arc::clone(&clock),
        ),
        categories: CategoryService::new(
            Arc::new(InMemoryCategoryRepository::new(Arc::clone(&db))),
            Arc::clone(&clock),
        ),
        projects: ProjectService::new(
            Arc::new(InMemoryProjectRepository::new(Arc::clone(&db))),
            Arc::clone(&clock),
        ),
        tasks: TaskService::new(
            Arc::new(InMemoryTaskRepository::new(Arc::clone(&db))),
            Arc::clone(&history_repo),
            Arc::clone(&clock),
        ),
        comments: CommentService::new(
            Arc::new(InMemoryCommentRepository::new(db)),
            clock,
        ),
        history: HistoryService::new(history_repo),
    }
}

async fn register_user(app: &App, email: &str, first_name: &str, last_name: &str) -> UserId {
    let user = app
        .directory
        .create(NewUser {
            email: EmailAddress::new(email).expect("valid email"),
            password: "hunter2".to_owned(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            avatar_url: None,
        })
        .await
        .expect("user registration should succeed");
    user.id()
}

fn title(raw: &str) -> TaskTitle {
    TaskTitle::new(raw).expect("valid title")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_task_lifecycle_across_modules(app: App) {
    // A small team with one role assigned.
    let manager = register_user(&app, "ada@example.com", "Ada", "Lovelace").await;
    let dev_one = register_user(&app, "grace@example.com", "Grace", "Hopper").await;
    let dev_two = register_user(&app, "edsger@example.com", "Edsger", "Dijkstra").await;

    let admin = app
        .roles
        .create("admin", Some("full access".to_owned()))
        .await
        .expect("role creation should succeed");
    app.directory
        .set_roles(manager, &[admin.id()])
        .await
        .expect("role assignment should succeed");
    let manager_account = app
        .directory
        .find_one(manager)
        .await
        .expect("lookup should succeed");
    assert_eq!(manager_account.roles.len(), 1);
    assert_eq!(manager_account.roles[0].name(), "admin");

    // Taxonomy for the work item.
    let category = app
        .categories
        .create("bugs", None, Some("#cc0000".to_owned()))
        .await
        .expect("category creation should succeed");
    let project = app
        .projects
        .create(ProjectDraft {
            name: "Launch".to_owned(),
            ..ProjectDraft::default()
        })
        .await
        .expect("project creation should succeed");

    // The manager files a task and assigns both developers.
    let draft = TaskDraft::new(title("Fix login crash"))
        .with_description("Users with stale sessions hit a 500.")
        .with_priority(Priority::new(4).expect("valid priority"))
        .with_assignees([dev_one, dev_two])
        .with_categories([category.id()])
        .with_projects([project.id()]);
    let created = app
        .tasks
        .create(draft, manager)
        .await
        .expect("task creation should succeed");
    let task_id = created.summary.task.id();

    assert_eq!(created.summary.created_by.id, manager);
    assert_eq!(created.summary.assignments.len(), 2);
    assert!(
        created
            .summary
            .assignments
            .iter()
            .all(|entry| entry.assignment.status() == AssignmentStatus::Assigned)
    );
    assert_eq!(created.summary.categories[0].id(), category.id());
    assert_eq!(created.summary.projects[0].id(), project.id());

    // Discussion happens on the thread.
    app.comments
        .create(task_id, dev_one, "Reproduced on staging.", false)
        .await
        .expect("comment creation should succeed");
    app.comments
        .create(task_id, manager, "Escalating internally.", true)
        .await
        .expect("comment creation should succeed");

    let details = app
        .tasks
        .find_one(task_id)
        .await
        .expect("task lookup should succeed");
    assert_eq!(details.comments.len(), 2);
    assert_eq!(details.comments[0].content(), "Reproduced on staging.");
    assert!(details.comments[1].is_internal());

    // The manager reassigns the work and bumps the status.
    let changes = TaskChangeSet {
        status: Some(TaskStatus::InProgress),
        assignee_ids: Some(vec![dev_one]),
        ..TaskChangeSet::default()
    };
    let updated = app
        .tasks
        .update(task_id, &changes, manager)
        .await
        .expect("task update should succeed");

    assert_eq!(updated.summary.task.status(), TaskStatus::InProgress);
    assert_eq!(updated.summary.assignments.len(), 1);
    assert_eq!(updated.summary.assignments[0].assignee.id, dev_one);

    // Only the status change hits the audit log; the assignment swap is a
    // relation replacement, not a scalar field change.
    let entries = app
        .history
        .find_by_task(task_id)
        .await
        .expect("history lookup should succeed");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].field(), "status");
    assert_eq!(entries[0].old_value(), Some("pending"));
    assert_eq!(entries[0].new_value(), Some("in_progress"));
    assert_eq!(entries[0].user_id(), manager);
    assert_eq!(entries[0].action(), "updated");

    // Assignment-based views agree with the replacement: the displaced row
    // is soft-deleted, so only the widened scope still surfaces the task.
    let assigned = app
        .tasks
        .find_assigned_to_user(dev_one, AssignmentScope::ActiveOnly)
        .await
        .expect("assignment lookup should succeed");
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].task.id(), task_id);
    let unassigned = app
        .tasks
        .find_assigned_to_user(dev_two, AssignmentScope::ActiveOnly)
        .await
        .expect("assignment lookup should succeed");
    assert!(unassigned.is_empty());
    let formerly_assigned = app
        .tasks
        .find_assigned_to_user(dev_two, AssignmentScope::IncludeRemoved)
        .await
        .expect("assignment lookup should succeed");
    assert_eq!(formerly_assigned.len(), 1);
    assert_eq!(formerly_assigned[0].task.id(), task_id);

    // Closing out: soft-delete hides the task but the audit trail survives.
    app.tasks
        .remove(task_id)
        .await
        .expect("task removal should succeed");
    assert!(app.tasks.find_one(task_id).await.is_err());
    let trail = app
        .history
        .find_by_task(task_id)
        .await
        .expect("history lookup should succeed");
    assert_eq!(trail.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creator_views_and_filters_survive_user_deactivation(app: App) {
    let ada = register_user(&app, "ada@example.com", "Ada", "Lovelace").await;
    let grace = register_user(&app, "grace@example.com", "Grace", "Hopper").await;

    app.tasks
        .create(TaskDraft::new(title("Write migration guide")), ada)
        .await
        .expect("task creation should succeed");
    let urgent = app
        .tasks
        .create(
            TaskDraft::new(title("Rotate leaked credentials"))
                .with_priority(Priority::new(5).expect("valid priority")),
            grace,
        )
        .await
        .expect("task creation should succeed");

    // Removing the creator must not hide their tasks from joined reads.
    app.directory
        .remove(grace)
        .await
        .expect("user removal should succeed");

    let details = app
        .tasks
        .find_one(urgent.summary.task.id())
        .await
        .expect("task lookup should succeed");
    assert_eq!(details.summary.created_by.id, grace);
    assert_eq!(details.summary.created_by.last_name, "Hopper");

    let by_creator = app
        .tasks
        .find_by_user(grace)
        .await
        .expect("creator listing should succeed");
    assert_eq!(by_creator.len(), 1);
    assert_eq!(by_creator[0].task.id(), urgent.summary.task.id());
}
