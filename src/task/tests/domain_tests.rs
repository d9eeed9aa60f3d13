//! Domain model tests for tasks and their validated scalars.

use crate::identity::domain::UserId;
use crate::task::domain::{
    Priority, Task, TaskAssignment, TaskChangeSet, TaskDomainError, TaskStatus, TaskTitle,
};
use chrono::{TimeZone, Utc};
use mockable::DefaultClock;
use rstest::rstest;

fn sample_task() -> Task {
    Task::new(
        TaskTitle::new("Ship the release").expect("valid title"),
        Some("Cut the tag and publish.".to_owned()),
        TaskStatus::Pending,
        None,
        Priority::default(),
        UserId::new(),
        &DefaultClock,
    )
}

#[rstest]
#[case("Ship the release")]
#[case("x")]
fn title_accepts_non_empty_values(#[case] raw: &str) {
    let title = TaskTitle::new(raw).expect("title should be accepted");
    assert_eq!(title.as_str(), raw);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn title_rejects_blank_values(#[case] raw: &str) {
    assert!(matches!(
        TaskTitle::new(raw),
        Err(TaskDomainError::EmptyTitle)
    ));
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(5)]
fn priority_accepts_the_valid_band(#[case] value: i32) {
    let priority = Priority::new(value).expect("priority should be accepted");
    assert_eq!(priority.value(), value);
}

#[rstest]
#[case(0)]
#[case(6)]
#[case(-1)]
fn priority_rejects_values_outside_the_band(#[case] value: i32) {
    assert!(matches!(
        Priority::new(value),
        Err(TaskDomainError::InvalidPriority(v)) if v == value
    ));
}

#[rstest]
fn priority_defaults_to_the_minimum() {
    assert_eq!(Priority::default().value(), Priority::MIN);
}

#[rstest]
#[case("pending", TaskStatus::Pending)]
#[case(" IN_PROGRESS ", TaskStatus::InProgress)]
#[case("Completed", TaskStatus::Completed)]
fn status_parses_stored_labels(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn status_rejects_unknown_labels() {
    assert!(TaskStatus::try_from("blocked").is_err());
}

#[rstest]
fn new_task_stamps_matching_timestamps() {
    let task = sample_task();
    assert_eq!(task.created_at(), task.updated_at());
    assert!(task.deleted_at().is_none());
    assert!(!task.is_deleted());
}

#[rstest]
fn apply_reports_only_fields_that_actually_changed() {
    let mut task = sample_task();
    let changes = TaskChangeSet {
        title: Some(TaskTitle::new("Ship the hotfix").expect("valid title")),
        // Same status as the current one: no change should be reported.
        status: Some(TaskStatus::Pending),
        priority: Some(Priority::new(4).expect("valid priority")),
        ..TaskChangeSet::default()
    };

    let changed = task.apply(&changes, &DefaultClock);

    let fields: Vec<&str> = changed.iter().map(|change| change.field).collect();
    assert_eq!(fields, vec!["title", "priority"]);
    assert_eq!(task.title().as_str(), "Ship the hotfix");
    assert_eq!(task.priority().value(), 4);
    assert_eq!(task.status(), TaskStatus::Pending);
}

#[rstest]
fn apply_renders_due_dates_as_rfc3339() {
    let mut task = sample_task();
    let due = Utc
        .with_ymd_and_hms(2026, 9, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");

    let changed = task.apply(
        &TaskChangeSet {
            due_date: Some(due),
            ..TaskChangeSet::default()
        },
        &DefaultClock,
    );

    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].field, "due_date");
    assert_eq!(changed[0].old_value, None);
    assert_eq!(changed[0].new_value.as_deref(), Some(due.to_rfc3339().as_str()));
}

#[rstest]
fn apply_with_identical_values_leaves_updated_at_alone() {
    let mut task = sample_task();
    let before = task.updated_at();

    let changes = TaskChangeSet {
        title: Some(task.title().clone()),
        status: Some(task.status()),
        priority: Some(task.priority()),
        ..TaskChangeSet::default()
    };
    let changed = task.apply(&changes, &DefaultClock);

    assert!(changed.is_empty());
    assert_eq!(task.updated_at(), before);
}

#[rstest]
fn apply_records_old_and_new_values() {
    let mut task = sample_task();

    let changed = task.apply(
        &TaskChangeSet {
            status: Some(TaskStatus::InProgress),
            ..TaskChangeSet::default()
        },
        &DefaultClock,
    );

    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].old_value.as_deref(), Some("pending"));
    assert_eq!(changed[0].new_value.as_deref(), Some("in_progress"));
}

#[rstest]
fn mark_deleted_stamps_both_timestamps() {
    let mut task = sample_task();
    task.mark_deleted(&DefaultClock);

    assert!(task.is_deleted());
    assert_eq!(task.deleted_at(), Some(task.updated_at()));
}

#[rstest]
fn assignment_mark_deleted_at_uses_the_supplied_timestamp() {
    let task = sample_task();
    let mut assignment = TaskAssignment::new(task.id(), UserId::new(), &DefaultClock);
    let stamp = Utc
        .with_ymd_and_hms(2026, 9, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");

    assignment.mark_deleted_at(stamp);

    assert!(assignment.is_deleted());
    assert_eq!(assignment.deleted_at(), Some(stamp));
    assert_eq!(assignment.updated_at(), stamp);
}
