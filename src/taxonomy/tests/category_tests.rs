//! Service orchestration tests for category management.

use crate::storage::MemoryDb;
use crate::taxonomy::adapters::InMemoryCategoryRepository;
use crate::taxonomy::domain::{CategoryPatch, TaxonomyDomainError};
use crate::taxonomy::ports::CategoryRepositoryError;
use crate::taxonomy::services::{CategoryService, CategoryServiceError};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestCategories = CategoryService<InMemoryCategoryRepository, DefaultClock>;

#[fixture]
fn service() -> TestCategories {
    let db = Arc::new(MemoryDb::new());
    CategoryService::new(
        Arc::new(InMemoryCategoryRepository::new(db)),
        Arc::new(DefaultClock),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_empty_name(service: TestCategories) {
    let result = service.create("   ", None, None).await;
    assert!(matches!(
        result,
        Err(CategoryServiceError::Domain(
            TaxonomyDomainError::EmptyName(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_all_lists_newest_first_and_hides_removed(service: TestCategories) {
    let bugs = service
        .create("bugs", None, Some("#cc0000".to_owned()))
        .await
        .expect("creation should succeed");
    let docs = service
        .create("docs", None, None)
        .await
        .expect("creation should succeed");
    service
        .remove(bugs.id())
        .await
        .expect("removal should succeed");

    let listed = service.find_all().await.expect("listing should succeed");

    let ids: Vec<_> = listed.iter().map(|category| category.id()).collect();
    assert_eq!(ids, vec![docs.id()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_patches_provided_fields(service: TestCategories) {
    let category = service
        .create("bugs", None, None)
        .await
        .expect("creation should succeed");

    let patch = CategoryPatch {
        description: Some("defects and regressions".to_owned()),
        is_active: Some(false),
        ..CategoryPatch::default()
    };
    let updated = service
        .update(category.id(), &patch)
        .await
        .expect("update should succeed");

    assert_eq!(updated.name(), "bugs");
    assert_eq!(updated.description(), Some("defects and regressions"));
    assert!(!updated.is_active());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_then_find_one_is_not_found(service: TestCategories) {
    let category = service
        .create("bugs", None, None)
        .await
        .expect("creation should succeed");

    service
        .remove(category.id())
        .await
        .expect("removal should succeed");

    let result = service.find_one(category.id()).await;
    assert!(matches!(
        result,
        Err(CategoryServiceError::Repository(
            CategoryRepositoryError::NotFound(_)
        ))
    ));
}
