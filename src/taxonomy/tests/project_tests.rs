//! Service orchestration tests for project management.

use crate::storage::MemoryDb;
use crate::taxonomy::adapters::InMemoryProjectRepository;
use crate::taxonomy::domain::{ProjectDraft, ProjectPatch, ProjectStatus};
use crate::taxonomy::ports::ProjectRepositoryError;
use crate::taxonomy::services::{ProjectService, ProjectServiceError};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestProjects = ProjectService<InMemoryProjectRepository, DefaultClock>;

#[fixture]
fn service() -> TestProjects {
    let db = Arc::new(MemoryDb::new());
    ProjectService::new(
        Arc::new(InMemoryProjectRepository::new(db)),
        Arc::new(DefaultClock),
    )
}

fn draft(name: &str) -> ProjectDraft {
    ProjectDraft {
        name: name.to_owned(),
        ..ProjectDraft::default()
    }
}

#[rstest]
fn status_parses_stored_labels() {
    assert_eq!(
        ProjectStatus::try_from("active"),
        Ok(ProjectStatus::Active)
    );
    assert_eq!(
        ProjectStatus::try_from(" ARCHIVED "),
        Ok(ProjectStatus::Archived)
    );
    assert!(ProjectStatus::try_from("cancelled").is_err());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_defaults_to_active_status(service: TestProjects) {
    let project = service
        .create(draft("Launch"))
        .await
        .expect("creation should succeed");
    assert_eq!(project.status(), ProjectStatus::Active);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_allows_any_status_transition(service: TestProjects) {
    let project = service
        .create(draft("Launch"))
        .await
        .expect("creation should succeed");

    // The status is a stored label, not a state machine.
    let completed = service
        .update(
            project.id(),
            &ProjectPatch {
                status: Some(ProjectStatus::Completed),
                ..ProjectPatch::default()
            },
        )
        .await
        .expect("update should succeed");
    assert_eq!(completed.status(), ProjectStatus::Completed);

    let reopened = service
        .update(
            project.id(),
            &ProjectPatch {
                status: Some(ProjectStatus::Active),
                ..ProjectPatch::default()
            },
        )
        .await
        .expect("update should succeed");
    assert_eq!(reopened.status(), ProjectStatus::Active);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_hides_from_listing_and_lookup(service: TestProjects) {
    let launch = service
        .create(draft("Launch"))
        .await
        .expect("creation should succeed");
    let migration = service
        .create(draft("Migration"))
        .await
        .expect("creation should succeed");

    service
        .remove(launch.id())
        .await
        .expect("removal should succeed");

    let listed = service.find_all().await.expect("listing should succeed");
    let ids: Vec<_> = listed.iter().map(|project| project.id()).collect();
    assert_eq!(ids, vec![migration.id()]);

    let result = service.find_one(launch.id()).await;
    assert!(matches!(
        result,
        Err(ProjectServiceError::Repository(
            ProjectRepositoryError::NotFound(_)
        ))
    ));
}
