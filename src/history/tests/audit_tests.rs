//! Service tests for the append-only audit log.

use crate::history::adapters::InMemoryHistoryRepository;
use crate::history::domain::{HistoryEntry, HistoryEntryId};
use crate::history::ports::HistoryRepositoryError;
use crate::history::services::{HistoryService, HistoryServiceError};
use crate::identity::domain::UserId;
use crate::storage::MemoryDb;
use crate::task::domain::{FieldChange, TaskId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestHistory = HistoryService<InMemoryHistoryRepository>;

#[fixture]
fn service() -> TestHistory {
    let db = Arc::new(MemoryDb::new());
    HistoryService::new(Arc::new(InMemoryHistoryRepository::new(db)))
}

fn entry(task_id: TaskId, actor_id: UserId, field: &'static str) -> HistoryEntry {
    let change = FieldChange::replaced(
        field,
        Some("before".to_owned()),
        Some("after".to_owned()),
    );
    HistoryEntry::from_change(task_id, actor_id, change, &DefaultClock)
}

#[rstest]
fn from_change_carries_the_field_diff_and_action() {
    let task_id = TaskId::new();
    let actor_id = UserId::new();
    let change = FieldChange::replaced("status", Some("pending".to_owned()), Some("completed".to_owned()));

    let recorded = HistoryEntry::from_change(task_id, actor_id, change, &DefaultClock);

    assert_eq!(recorded.task_id(), task_id);
    assert_eq!(recorded.user_id(), actor_id);
    assert_eq!(recorded.field(), "status");
    assert_eq!(recorded.old_value(), Some("pending"));
    assert_eq!(recorded.new_value(), Some("completed"));
    assert_eq!(recorded.action(), HistoryEntry::ACTION_UPDATED);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn record_then_read_per_task_newest_first(service: TestHistory) {
    let task_id = TaskId::new();
    let actor_id = UserId::new();

    let first = entry(task_id, actor_id, "title");
    let second = entry(task_id, actor_id, "status");
    let elsewhere = entry(TaskId::new(), actor_id, "priority");
    for item in [&first, &second, &elsewhere] {
        service.record(item).await.expect("record should succeed");
    }

    let listed = service
        .find_by_task(task_id)
        .await
        .expect("listing should succeed");

    let ids: Vec<_> = listed.iter().map(HistoryEntry::id).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_spans_tasks_newest_first(service: TestHistory) {
    let actor_id = UserId::new();
    let first = entry(TaskId::new(), actor_id, "title");
    let second = entry(TaskId::new(), actor_id, "status");
    service.record(&first).await.expect("record should succeed");
    service
        .record(&second)
        .await
        .expect("record should succeed");

    let listed = service.find_all().await.expect("listing should succeed");

    let ids: Vec<_> = listed.iter().map(HistoryEntry::id).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_one_reports_missing_entries(service: TestHistory) {
    let result = service.find_one(HistoryEntryId::new()).await;

    assert!(matches!(
        result,
        Err(HistoryServiceError::Repository(
            HistoryRepositoryError::NotFound(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_one_returns_a_recorded_entry(service: TestHistory) {
    let recorded = entry(TaskId::new(), UserId::new(), "due_date");
    service
        .record(&recorded)
        .await
        .expect("record should succeed");

    let fetched = service
        .find_one(recorded.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(fetched, recorded);
}
