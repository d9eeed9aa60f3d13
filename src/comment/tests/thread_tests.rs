//! Service orchestration tests for comment threads.

use crate::comment::adapters::InMemoryCommentRepository;
use crate::comment::domain::{CommentDomainError, CommentPatch};
use crate::comment::ports::CommentRepositoryError;
use crate::comment::services::{CommentService, CommentServiceError};
use crate::identity::domain::UserId;
use crate::storage::MemoryDb;
use crate::task::domain::TaskId;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestComments = CommentService<InMemoryCommentRepository, DefaultClock>;

#[fixture]
fn service() -> TestComments {
    let db = Arc::new(MemoryDb::new());
    CommentService::new(
        Arc::new(InMemoryCommentRepository::new(db)),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_content(service: TestComments) {
    let result = service
        .create(TaskId::new(), UserId::new(), "   \n", false)
        .await;

    assert!(matches!(
        result,
        Err(CommentServiceError::Domain(
            CommentDomainError::EmptyContent
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn thread_reads_oldest_first(service: TestComments) {
    let task_id = TaskId::new();
    let author = UserId::new();

    let first = service
        .create(task_id, author, "First response", false)
        .await
        .expect("creation should succeed");
    let second = service
        .create(task_id, author, "Second response", false)
        .await
        .expect("creation should succeed");
    // A different task's comment never leaks into the thread.
    service
        .create(TaskId::new(), author, "Elsewhere", false)
        .await
        .expect("creation should succeed");

    let thread = service
        .find_by_task(task_id)
        .await
        .expect("thread read should succeed");

    let ids: Vec<_> = thread.iter().map(|comment| comment.id()).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_reads_newest_first(service: TestComments) {
    let author = UserId::new();
    let first = service
        .create(TaskId::new(), author, "First", false)
        .await
        .expect("creation should succeed");
    let second = service
        .create(TaskId::new(), author, "Second", true)
        .await
        .expect("creation should succeed");

    let listed = service.find_all().await.expect("listing should succeed");

    let ids: Vec<_> = listed.iter().map(|comment| comment.id()).collect();
    assert_eq!(ids, vec![second.id(), first.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_patches_content_and_visibility(service: TestComments) {
    let comment = service
        .create(TaskId::new(), UserId::new(), "Draft note", false)
        .await
        .expect("creation should succeed");

    let patch = CommentPatch {
        content: Some("Final note".to_owned()),
        is_internal: Some(true),
    };
    let updated = service
        .update(comment.id(), &patch)
        .await
        .expect("update should succeed");

    assert_eq!(updated.content(), "Final note");
    assert!(updated.is_internal());
    assert_eq!(updated.author_id(), comment.author_id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_hides_the_comment_from_reads(service: TestComments) {
    let task_id = TaskId::new();
    let comment = service
        .create(task_id, UserId::new(), "Obsolete", false)
        .await
        .expect("creation should succeed");

    service
        .remove(comment.id())
        .await
        .expect("removal should succeed");

    let thread = service
        .find_by_task(task_id)
        .await
        .expect("thread read should succeed");
    assert!(thread.is_empty());

    let result = service.find_one(comment.id()).await;
    assert!(matches!(
        result,
        Err(CommentServiceError::Repository(
            CommentRepositoryError::NotFound(_)
        ))
    ));
}
