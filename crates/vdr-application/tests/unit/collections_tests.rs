//! Tests for the Collection Manager

use std::sync::Arc;

use vdr_application::ports::services::CollectionServiceInterface;
use vdr_application::use_cases::CollectionManager;
use vdr_domain::error::Error;
use vdr_domain::value_objects::{CollectionPolicy, MultiVectorComparator};
use vdr_providers::vector_store::InMemoryVectorStoreProvider;

use crate::support::TIMEOUT;

fn manager() -> CollectionManager {
    CollectionManager::new(
        Arc::new(InMemoryVectorStoreProvider::new()),
        CollectionPolicy::default(),
        TIMEOUT,
    )
}

#[tokio::test]
async fn test_create_twice_fails_with_collection_exists() {
    let manager = manager();
    let spec = manager.create("books", 128, 100).await.unwrap();
    assert_eq!(spec.vector_size, 128);
    assert_eq!(spec.indexing_threshold, 100);
    assert_eq!(spec.policy.multivector, Some(MultiVectorComparator::MaxSim));

    let err = manager.create("books", 128, 100).await.unwrap_err();
    assert!(matches!(err, Error::CollectionExists { ref name } if name == "books"));
}

#[tokio::test]
async fn test_delete_missing_fails_with_collection_not_found() {
    let manager = manager();
    let err = manager.delete("ghost").await.unwrap_err();
    assert!(matches!(err, Error::CollectionNotFound { ref name } if name == "ghost"));
}

#[tokio::test]
async fn test_list_reports_created_collections() {
    let manager = manager();
    manager.create("b", 64, 10).await.unwrap();
    manager.create("a", 128, 20).await.unwrap();
    manager.delete("b").await.unwrap();
    manager.create("c", 32, 30).await.unwrap();

    let listed = manager.list().await.unwrap();
    let summary: Vec<(&str, Option<usize>, Option<u64>)> = listed
        .iter()
        .map(|c| (c.name.as_str(), c.vector_size, c.points_count))
        .collect();
    assert_eq!(summary, vec![("a", Some(128), Some(0)), ("c", Some(32), Some(0))]);
}

#[tokio::test]
async fn test_invalid_specs_are_rejected() {
    let manager = manager();
    assert!(matches!(
        manager.create("", 128, 100).await,
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        manager.create("books", 0, 100).await,
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        manager.create("a/b", 128, 100).await,
        Err(Error::InvalidArgument { .. })
    ));
}

#[tokio::test]
async fn test_policy_is_applied_to_new_collections() {
    let policy = CollectionPolicy {
        multivector: None,
        quantization: None,
        ..CollectionPolicy::default()
    };
    let manager = CollectionManager::new(
        Arc::new(InMemoryVectorStoreProvider::new()),
        policy,
        TIMEOUT,
    );
    let spec = manager.create("plain", 16, 0).await.unwrap();
    assert_eq!(spec.policy, policy);
}
