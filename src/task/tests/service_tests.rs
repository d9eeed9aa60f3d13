//! Service orchestration tests for the task lifecycle.

use crate::history::adapters::InMemoryHistoryRepository;
use crate::history::ports::HistoryRepository;
use crate::identity::adapters::InMemoryUserRepository;
use crate::identity::domain::{EmailAddress, NewUser, PasswordHash, User, UserId};
use crate::identity::ports::UserRepository;
use crate::storage::MemoryDb;
use crate::task::adapters::InMemoryTaskRepository;
use crate::task::domain::{
    AssignmentStatus, Priority, TaskChangeSet, TaskDraft, TaskFilters, TaskStatus, TaskTitle,
};
use crate::task::ports::{AssignmentScope, TaskRepository, TaskRepositoryError};
use crate::task::services::{TaskService, TaskServiceError};
use crate::taxonomy::adapters::{InMemoryCategoryRepository, InMemoryProjectRepository};
use crate::taxonomy::domain::{Category, CategoryId, Project, ProjectDraft, ProjectId};
use crate::taxonomy::ports::{CategoryRepository, ProjectRepository};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestTasks = TaskService<InMemoryTaskRepository, InMemoryHistoryRepository, DefaultClock>;

struct Env {
    service: TestTasks,
    tasks: Arc<InMemoryTaskRepository>,
    history: Arc<InMemoryHistoryRepository>,
    users: Arc<InMemoryUserRepository>,
    categories: Arc<InMemoryCategoryRepository>,
    projects: Arc<InMemoryProjectRepository>,
}

#[fixture]
fn env() -> Env {
    let db = Arc::new(MemoryDb::new());
    let tasks = Arc::new(InMemoryTaskRepository::new(Arc::clone(&db)));
    let history = Arc::new(InMemoryHistoryRepository::new(Arc::clone(&db)));
    let users = Arc::new(InMemoryUserRepository::new(Arc::clone(&db)));
    let categories = Arc::new(InMemoryCategoryRepository::new(Arc::clone(&db)));
    let projects = Arc::new(InMemoryProjectRepository::new(db));
    Env {
        service: TaskService::new(
            Arc::clone(&tasks),
            Arc::clone(&history),
            Arc::new(DefaultClock),
        ),
        tasks,
        history,
        users,
        categories,
        projects,
    }
}

async fn seed_user(env: &Env, email: &str) -> UserId {
    let draft = NewUser {
        email: EmailAddress::new(email).expect("valid email"),
        password: String::new(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        avatar_url: None,
    };
    let user = User::new(
        &draft,
        PasswordHash::from_hash("stored-hash".to_owned()),
        &DefaultClock,
    );
    env.users.insert(&user).await.expect("user seed");
    user.id()
}

async fn seed_category(env: &Env, name: &str) -> CategoryId {
    let category =
        Category::new(name, None, None, &DefaultClock).expect("category seed");
    env.categories.insert(&category).await.expect("category seed");
    category.id()
}

async fn seed_project(env: &Env, name: &str) -> ProjectId {
    let draft = ProjectDraft {
        name: name.to_owned(),
        ..ProjectDraft::default()
    };
    let project = Project::new(draft, &DefaultClock).expect("project seed");
    env.projects.insert(&project).await.expect("project seed");
    project.id()
}

fn title(raw: &str) -> TaskTitle {
    TaskTitle::new(raw).expect("valid title")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_wires_relations_and_returns_the_joined_shape(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;
    let first = seed_user(&env, "first@example.com").await;
    let second = seed_user(&env, "second@example.com").await;
    let category = seed_category(&env, "bugs").await;
    let project = seed_project(&env, "Launch").await;

    let draft = TaskDraft::new(title("Ship the release"))
        .with_description("Cut the tag and publish.")
        .with_assignees([first, second])
        .with_categories([category])
        .with_projects([project]);
    let details = env
        .service
        .create(draft, creator)
        .await
        .expect("creation should succeed");

    assert_eq!(details.summary.task.title().as_str(), "Ship the release");
    assert_eq!(details.summary.created_by.id, creator);
    assert_eq!(details.summary.assignments.len(), 2);
    for assignment in &details.summary.assignments {
        assert_eq!(assignment.assignment.status(), AssignmentStatus::Assigned);
        assert!(assignment.assignment.accepted_at().is_none());
    }
    let assignees: Vec<UserId> = details
        .summary
        .assignments
        .iter()
        .map(|entry| entry.assignee.id)
        .collect();
    assert!(assignees.contains(&first));
    assert!(assignees.contains(&second));
    assert_eq!(details.summary.categories.len(), 1);
    assert_eq!(details.summary.categories[0].id(), category);
    assert_eq!(details.summary.projects.len(), 1);
    assert_eq!(details.summary.projects[0].id(), project);
    assert!(details.comments.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_defaults_status_and_priority(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;

    let details = env
        .service
        .create(TaskDraft::new(title("Triage inbox")), creator)
        .await
        .expect("creation should succeed");

    assert_eq!(details.summary.task.status(), TaskStatus::Pending);
    assert_eq!(details.summary.task.priority().value(), Priority::MIN);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_the_assignment_set_in_full(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;
    let first = seed_user(&env, "first@example.com").await;
    let second = seed_user(&env, "second@example.com").await;
    let third = seed_user(&env, "third@example.com").await;

    let created = env
        .service
        .create(
            TaskDraft::new(title("Ship the release")).with_assignees([first, second]),
            creator,
        )
        .await
        .expect("creation should succeed");

    let changes = TaskChangeSet {
        assignee_ids: Some(vec![third]),
        ..TaskChangeSet::default()
    };
    let updated = env
        .service
        .update(created.summary.task.id(), &changes, creator)
        .await
        .expect("update should succeed");

    assert_eq!(updated.summary.assignments.len(), 1);
    assert_eq!(updated.summary.assignments[0].assignee.id, third);

    // The displaced rows are soft-deleted, not dropped: invisible to the
    // active scope, still addressable under the widened one.
    let active = env
        .tasks
        .assignments_for_user(first, AssignmentScope::ActiveOnly)
        .await
        .expect("lookup should succeed");
    assert!(active.is_empty());
    let removed = env
        .tasks
        .assignments_for_user(first, AssignmentScope::IncludeRemoved)
        .await
        .expect("lookup should succeed");
    assert_eq!(removed.len(), 1);
    assert!(removed[0].is_deleted());
    assert_eq!(removed[0].task_id(), created.summary.task.id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_records_one_history_entry_per_changed_field(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;
    let actor = seed_user(&env, "actor@example.com").await;

    let created = env
        .service
        .create(TaskDraft::new(title("Ship the release")), creator)
        .await
        .expect("creation should succeed");
    let task_id = created.summary.task.id();

    let changes = TaskChangeSet {
        title: Some(title("Ship the hotfix")),
        // Matches the current status, so no entry should be written for it.
        status: Some(TaskStatus::Pending),
        priority: Some(Priority::new(5).expect("valid priority")),
        ..TaskChangeSet::default()
    };
    env.service
        .update(task_id, &changes, actor)
        .await
        .expect("update should succeed");

    let entries = env
        .history
        .find_by_task(task_id)
        .await
        .expect("history lookup should succeed");

    assert_eq!(entries.len(), 2);
    let mut fields: Vec<&str> = entries.iter().map(|entry| entry.field()).collect();
    fields.sort_unstable();
    assert_eq!(fields, vec!["priority", "title"]);
    for entry in &entries {
        assert_eq!(entry.task_id(), task_id);
        assert_eq!(entry.user_id(), actor);
        assert_eq!(entry.action(), "updated");
    }
    let title_entry = entries
        .iter()
        .find(|entry| entry.field() == "title")
        .expect("title entry should exist");
    assert_eq!(title_entry.old_value(), Some("Ship the release"));
    assert_eq!(title_entry.new_value(), Some("Ship the hotfix"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_with_identical_values_records_nothing(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;

    let created = env
        .service
        .create(TaskDraft::new(title("Ship the release")), creator)
        .await
        .expect("creation should succeed");
    let task_id = created.summary.task.id();

    let changes = TaskChangeSet {
        title: Some(title("Ship the release")),
        ..TaskChangeSet::default()
    };
    env.service
        .update(task_id, &changes, creator)
        .await
        .expect("update should succeed");

    let entries = env
        .history
        .find_by_task(task_id)
        .await
        .expect("history lookup should succeed");
    assert!(entries.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_soft_deletes_but_keeps_the_row_for_audit_reads(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;

    let created = env
        .service
        .create(TaskDraft::new(title("Ship the release")), creator)
        .await
        .expect("creation should succeed");
    let task_id = created.summary.task.id();

    env.service
        .remove(task_id)
        .await
        .expect("removal should succeed");

    let result = env.service.find_one(task_id).await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Repository(TaskRepositoryError::NotFound(
            _
        )))
    ));

    let unscoped = env
        .tasks
        .find_by_id_unscoped(task_id)
        .await
        .expect("unscoped lookup should succeed")
        .expect("row should still exist");
    assert!(unscoped.is_deleted());

    let listed = env
        .service
        .find_all(&TaskFilters::default())
        .await
        .expect("listing should succeed");
    assert!(listed.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_composes_filters_conjunctively(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;

    env.service
        .create(
            TaskDraft::new(title("Fix login crash"))
                .with_status(TaskStatus::InProgress)
                .with_priority(Priority::new(5).expect("valid priority")),
            creator,
        )
        .await
        .expect("creation should succeed");
    env.service
        .create(
            TaskDraft::new(title("Fix logout crash")).with_status(TaskStatus::Pending),
            creator,
        )
        .await
        .expect("creation should succeed");
    env.service
        .create(
            TaskDraft::new(title("Write docs")).with_status(TaskStatus::InProgress),
            creator,
        )
        .await
        .expect("creation should succeed");

    let filters = TaskFilters {
        status: Some(TaskStatus::InProgress),
        search: Some("CRASH".to_owned()),
        ..TaskFilters::default()
    };
    let listed = env
        .service
        .find_all(&filters)
        .await
        .expect("listing should succeed");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].task.title().as_str(), "Fix login crash");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_search_matches_descriptions_too(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;

    env.service
        .create(
            TaskDraft::new(title("Weekly chores")).with_description("Rotate the pager schedule"),
            creator,
        )
        .await
        .expect("creation should succeed");
    env.service
        .create(TaskDraft::new(title("Write docs")), creator)
        .await
        .expect("creation should succeed");

    let filters = TaskFilters {
        search: Some("pager".to_owned()),
        ..TaskFilters::default()
    };
    let listed = env
        .service
        .find_all(&filters)
        .await
        .expect("listing should succeed");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].task.title().as_str(), "Weekly chores");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_due_date_bounds_are_inclusive(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;
    let day = |d: u32| {
        Utc.with_ymd_and_hms(2026, 9, d, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    };

    env.service
        .create(
            TaskDraft::new(title("Early")).with_due_date(day(1)),
            creator,
        )
        .await
        .expect("creation should succeed");
    env.service
        .create(
            TaskDraft::new(title("On the boundary")).with_due_date(day(2)),
            creator,
        )
        .await
        .expect("creation should succeed");
    env.service
        .create(TaskDraft::new(title("Late")).with_due_date(day(3)), creator)
        .await
        .expect("creation should succeed");

    let filters = TaskFilters {
        due_from: Some(day(2)),
        due_to: Some(day(2)),
        ..TaskFilters::default()
    };
    let listed = env
        .service
        .find_all(&filters)
        .await
        .expect("listing should succeed");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].task.title().as_str(), "On the boundary");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_by_user_lists_only_that_creators_tasks_newest_first(env: Env) {
    let ada = seed_user(&env, "ada@example.com").await;
    let grace = seed_user(&env, "grace@example.com").await;

    let first = env
        .service
        .create(TaskDraft::new(title("First")), ada)
        .await
        .expect("creation should succeed");
    env.service
        .create(TaskDraft::new(title("Theirs")), grace)
        .await
        .expect("creation should succeed");
    let second = env
        .service
        .create(TaskDraft::new(title("Second")), ada)
        .await
        .expect("creation should succeed");

    let listed = env
        .service
        .find_by_user(ada)
        .await
        .expect("listing should succeed");

    let ids: Vec<_> = listed.iter().map(|entry| entry.task.id()).collect();
    assert_eq!(
        ids,
        vec![second.summary.task.id(), first.summary.task.id()]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_scope_governs_removed_assignment_rows(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;
    let assignee = seed_user(&env, "assignee@example.com").await;

    let kept = env
        .service
        .create(
            TaskDraft::new(title("Active assignment")).with_assignees([assignee]),
            creator,
        )
        .await
        .expect("creation should succeed");
    let cleared = env
        .service
        .create(
            TaskDraft::new(title("Cleared assignment")).with_assignees([assignee]),
            creator,
        )
        .await
        .expect("creation should succeed");

    // Clearing the assignee set soft-deletes the row on the second task.
    let changes = TaskChangeSet {
        assignee_ids: Some(vec![]),
        ..TaskChangeSet::default()
    };
    env.service
        .update(cleared.summary.task.id(), &changes, creator)
        .await
        .expect("update should succeed");

    let active_only = env
        .service
        .find_assigned_to_user(assignee, AssignmentScope::ActiveOnly)
        .await
        .expect("lookup should succeed");
    let active_ids: Vec<_> = active_only.iter().map(|entry| entry.task.id()).collect();
    assert_eq!(active_ids, vec![kept.summary.task.id()]);

    let including_removed = env
        .service
        .find_assigned_to_user(assignee, AssignmentScope::IncludeRemoved)
        .await
        .expect("lookup should succeed");
    let all_ids: Vec<_> = including_removed
        .iter()
        .map(|entry| entry.task.id())
        .collect();
    assert!(all_ids.contains(&kept.summary.task.id()));
    assert!(all_ids.contains(&cleared.summary.task.id()));
    assert_eq!(all_ids.len(), 2);
}

#[rstest]
fn diesel_errors_convert_into_the_persistence_variant() {
    let err = TaskRepositoryError::from(diesel::result::Error::NotFound);
    assert!(matches!(err, TaskRepositoryError::Persistence(_)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn soft_deleted_categories_drop_out_of_joined_reads(env: Env) {
    let creator = seed_user(&env, "creator@example.com").await;
    let category_id = seed_category(&env, "bugs").await;

    let created = env
        .service
        .create(
            TaskDraft::new(title("Fix login crash")).with_categories([category_id]),
            creator,
        )
        .await
        .expect("creation should succeed");
    assert_eq!(created.summary.categories.len(), 1);

    let mut category = env
        .categories
        .find_by_id(category_id)
        .await
        .expect("category lookup should succeed");
    category.mark_deleted(&DefaultClock);
    env.categories
        .update(&category)
        .await
        .expect("category update should succeed");

    let details = env
        .service
        .find_one(created.summary.task.id())
        .await
        .expect("lookup should succeed");
    assert!(details.summary.categories.is_empty());
}
