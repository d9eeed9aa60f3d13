//! Service orchestration tests for role management.

use crate::identity::adapters::InMemoryRoleRepository;
use crate::identity::domain::{RoleFilters, RolePatch};
use crate::identity::ports::RoleRepositoryError;
use crate::identity::services::{RoleService, RoleServiceError};
use crate::storage::MemoryDb;
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestRoles = RoleService<InMemoryRoleRepository, DefaultClock>;

#[fixture]
fn service() -> TestRoles {
    let db = Arc::new(MemoryDb::new());
    RoleService::new(
        Arc::new(InMemoryRoleRepository::new(db)),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_duplicate_name(service: TestRoles) {
    service
        .create("admin", None)
        .await
        .expect("first creation should succeed");

    let result = service.create("admin", Some("again".to_owned())).await;

    assert!(matches!(
        result,
        Err(RoleServiceError::Repository(
            RoleRepositoryError::DuplicateName(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_by_name_returns_none_when_missing(service: TestRoles) {
    let fetched = service
        .find_by_name("ghost")
        .await
        .expect("lookup should succeed");
    assert!(fetched.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_searches_name_and_description(service: TestRoles) {
    service
        .create("admin", Some("full control".to_owned()))
        .await
        .expect("creation should succeed");
    service
        .create("viewer", Some("read-only access".to_owned()))
        .await
        .expect("creation should succeed");

    let filters = RoleFilters {
        is_active: None,
        search: Some("READ-ONLY".to_owned()),
    };
    let listed = service
        .find_all(&filters)
        .await
        .expect("listing should succeed");

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name(), "viewer");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_patches_fields_and_keeps_uniqueness(service: TestRoles) {
    let role = service
        .create("editor", None)
        .await
        .expect("creation should succeed");
    service
        .create("admin", None)
        .await
        .expect("creation should succeed");

    let patch = RolePatch {
        name: Some("admin".to_owned()),
        ..RolePatch::default()
    };
    let result = service.update(role.id(), &patch).await;

    assert!(matches!(
        result,
        Err(RoleServiceError::Repository(
            RoleRepositoryError::DuplicateName(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_soft_deletes_and_frees_the_name(service: TestRoles) {
    let role = service
        .create("admin", None)
        .await
        .expect("creation should succeed");

    service
        .remove(role.id())
        .await
        .expect("removal should succeed");

    let result = service.find_one(role.id()).await;
    assert!(matches!(
        result,
        Err(RoleServiceError::Repository(RoleRepositoryError::NotFound(
            _
        )))
    ));

    service
        .create("admin", None)
        .await
        .expect("name should be reusable after removal");
}
