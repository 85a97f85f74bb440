//! Tests for the Batch Indexer

use std::sync::Arc;

use vdr_domain::error::Error;
use vdr_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vdr_domain::value_objects::{IndexingProgress, PageImage};

use crate::support::{
    FlakyStore, create_keyed_collection, indexer, keyed_generator, page_image,
};

fn pages(count: u32) -> Vec<PageImage> {
    (1..=count).map(page_image).collect()
}

#[tokio::test]
async fn test_partitions_into_fixed_batches_with_contiguous_ids() {
    let store = Arc::new(FlakyStore::reliable());
    create_keyed_collection(store.as_ref(), "pages").await;
    let indexer = indexer(keyed_generator().await, store.clone());

    let report = indexer.index(&pages(25), "pages", 10, 0).await.unwrap();

    assert_eq!(store.attempt_sizes(), vec![10, 10, 5]);
    let ids: Vec<u64> = store.attempts.lock().unwrap().concat();
    assert_eq!(ids, (0..25).collect::<Vec<u64>>());
    assert_eq!(report.batches_total, 3);
    assert_eq!(report.batches_completed, 3);
    assert_eq!(report.points_indexed, 25);
    assert_eq!(report.next_id, 25);
    assert!(!report.has_skipped());
    assert_eq!(store.count_points("pages").await.unwrap(), 25);
}

#[tokio::test]
async fn test_starting_id_offsets_the_range() {
    let store = Arc::new(FlakyStore::reliable());
    create_keyed_collection(store.as_ref(), "pages").await;
    let indexer = indexer(keyed_generator().await, store.clone());

    let first = indexer.index(&pages(3), "pages", 2, 0).await.unwrap();
    let second = indexer
        .index(&pages(2), "pages", 2, first.next_id)
        .await
        .unwrap();

    assert_eq!(second.starting_id, 3);
    assert_eq!(second.next_id, 5);
    assert_eq!(store.count_points("pages").await.unwrap(), 5);
}

#[tokio::test]
async fn test_upsert_failing_twice_then_succeeding_keeps_every_point() {
    let store = Arc::new(FlakyStore::failing_first(2));
    create_keyed_collection(store.as_ref(), "pages").await;
    let indexer = indexer(keyed_generator().await, store.clone());

    let report = indexer.index(&pages(4), "pages", 10, 0).await.unwrap();

    assert_eq!(store.attempt_sizes(), vec![4, 4, 4]);
    assert_eq!(report.batches_completed, 1);
    assert!(!report.has_skipped());
    assert_eq!(store.count_points("pages").await.unwrap(), 4);
}

#[tokio::test]
async fn test_batch_exhausting_retries_is_skipped_and_indexing_continues() {
    let store = Arc::new(FlakyStore::failing_batch_at(2));
    create_keyed_collection(store.as_ref(), "pages").await;
    let indexer = indexer(keyed_generator().await, store.clone());

    let report = indexer.index(&pages(5), "pages", 2, 0).await.unwrap();

    assert_eq!(report.batches_total, 3);
    assert_eq!(report.batches_completed, 2);
    assert_eq!(report.skipped_batches.len(), 1);
    let skipped = &report.skipped_batches[0];
    assert_eq!((skipped.batch, skipped.first_id, skipped.last_id), (1, 2, 3));
    assert!(skipped.reason.contains("payload too large"));

    // Three attempts for the failing batch, ids keep advancing past it
    assert_eq!(store.inner.attempt_sizes(), vec![2, 2, 2, 2, 1]);
    assert_eq!(report.next_id, 5);
    assert_eq!(report.points_indexed, 3);
    assert_eq!(store.count_points("pages").await.unwrap(), 3);
}

#[tokio::test]
async fn test_progress_is_published() {
    let store = Arc::new(FlakyStore::reliable());
    create_keyed_collection(store.as_ref(), "pages").await;
    let indexer = indexer(keyed_generator().await, store);
    let receiver = indexer.subscribe();

    indexer.index(&pages(5), "pages", 2, 0).await.unwrap();

    let progress = *receiver.borrow();
    assert_eq!(progress, IndexingProgress { completed: 3, total: 3 });
    assert!(indexer.progress().is_done());
}

#[tokio::test]
async fn test_zero_batch_size_is_invalid() {
    let store: Arc<dyn VectorStoreProvider> = Arc::new(FlakyStore::reliable());
    let indexer = indexer(keyed_generator().await, store);
    let err = indexer.index(&pages(1), "pages", 0, 0).await.unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { .. }));
}

#[tokio::test]
async fn test_empty_input_indexes_nothing() {
    let store = Arc::new(FlakyStore::reliable());
    let indexer = indexer(keyed_generator().await, store.clone());
    let report = indexer.index(&[], "pages", 10, 7).await.unwrap();
    assert_eq!(report.batches_total, 0);
    assert_eq!(report.next_id, 7);
    assert!(store.attempt_sizes().is_empty());
}
