//! Tests for the Search Service

use std::sync::Arc;

use vdr_application::use_cases::{EmbeddingGenerator, SearchService};
use vdr_domain::error::Error;
use vdr_domain::ports::providers::VectorStoreProvider;
use vdr_domain::value_objects::{CollectionSpec, EmbeddingVector, IndexedPoint, PointPayload};
use vdr_providers::embedding::NullEmbeddingProvider;
use vdr_providers::vector_store::InMemoryVectorStoreProvider;

use crate::support::{
    SlowStore, TIMEOUT, create_keyed_collection, indexer, keyed_generator, page_image,
    search_service,
};

#[tokio::test]
async fn test_query_matching_a_page_returns_it_first() {
    let store = Arc::new(InMemoryVectorStoreProvider::new());
    create_keyed_collection(store.as_ref(), "pages").await;
    let generator = keyed_generator().await;
    let pages: Vec<_> = (1..=4).map(page_image).collect();
    indexer(generator.clone(), store.clone())
        .index(&pages, "pages", 2, 0)
        .await
        .unwrap();

    let hits = search_service(generator, store)
        .search("page 3", "pages", 3)
        .await
        .unwrap();

    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].payload.page_number, Some(3));
    assert_eq!(hits[0].id, 2);
    assert!((hits[0].score - 1.0).abs() < 1e-5);
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
}

#[tokio::test]
async fn test_exact_vector_round_trip_scores_one() {
    let store = Arc::new(InMemoryVectorStoreProvider::new());
    store
        .create_collection(&CollectionSpec::new("pages", 128, 100))
        .await
        .unwrap();
    let generator = Arc::new(EmbeddingGenerator::new(
        Arc::new(NullEmbeddingProvider::new()),
        TIMEOUT,
    ));
    generator.load().await.unwrap();

    let pages: Vec<_> = (1..=6).map(page_image).collect();
    let vectors = generator.embed_images(&pages).await.unwrap();
    indexer(generator.clone(), store.clone())
        .index(&pages, "pages", 4, 0)
        .await
        .unwrap();

    let service = SearchService::new(generator, store, TIMEOUT);
    let hits = service
        .search_by_vector(&vectors[4], "pages", 1)
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 4);
    assert!((hits[0].score - 1.0).abs() < 1e-4, "score {}", hits[0].score);
}

#[tokio::test]
async fn test_empty_collection_signals_no_match() {
    let store = Arc::new(InMemoryVectorStoreProvider::new());
    create_keyed_collection(store.as_ref(), "empty").await;
    let service = search_service(keyed_generator().await, store);

    let err = service.search("page 1", "empty", 3).await.unwrap_err();
    assert!(err.is_no_match());
    assert!(matches!(err, Error::NoMatch { ref collection } if collection == "empty"));
}

#[tokio::test]
async fn test_missing_collection_is_not_a_no_match() {
    let store = Arc::new(InMemoryVectorStoreProvider::new());
    let service = search_service(keyed_generator().await, store);

    let err = service.search("page 1", "missing", 3).await.unwrap_err();
    assert!(matches!(err, Error::CollectionNotFound { .. }));
}

#[tokio::test]
async fn test_top_k_limits_results() {
    let store = Arc::new(InMemoryVectorStoreProvider::new());
    create_keyed_collection(store.as_ref(), "pages").await;
    let points: Vec<IndexedPoint> = (0..5u64)
        .map(|id| IndexedPoint {
            id,
            vector: EmbeddingVector::Multi(vec![vec![1.0; 32]]),
            payload: PointPayload::new(format!("p{id}.png")),
        })
        .collect();
    store.upsert_points("pages", &points).await.unwrap();

    let service = search_service(keyed_generator().await, store);
    let hits = service.search("page 1", "pages", 2).await.unwrap();
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn test_invalid_queries_are_rejected() {
    let store = Arc::new(InMemoryVectorStoreProvider::new());
    let service = search_service(keyed_generator().await, store);

    assert!(matches!(
        service.search("   ", "pages", 3).await,
        Err(Error::InvalidArgument { .. })
    ));
    assert!(matches!(
        service.search("page 1", "pages", 0).await,
        Err(Error::InvalidArgument { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn test_stalled_store_surfaces_as_timeout() {
    let store = Arc::new(SlowStore {
        inner: InMemoryVectorStoreProvider::new(),
        delay: TIMEOUT * 2,
    });
    create_keyed_collection(store.as_ref(), "pages").await;
    let generator = keyed_generator().await;
    indexer(generator.clone(), store.clone())
        .index(&[page_image(1)], "pages", 1, 0)
        .await
        .unwrap();

    let err = search_service(generator, store)
        .search("page 1", "pages", 3)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Timeout { ref operation, .. } if operation == "query_points"
    ));
}
