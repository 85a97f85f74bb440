//! Tests for the Retrieval Service

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use vdr_application::ports::services::RetrievalServiceInterface;
use vdr_application::use_cases::{MetadataLookup, ModelState, RetrievalService};
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::VisionAnswerProvider;
use vdr_domain::value_objects::PageImage;
use vdr_providers::metadata::InMemoryMetadataStore;
use vdr_providers::vector_store::InMemoryVectorStoreProvider;

use crate::support::{
    TIMEOUT, create_keyed_collection, indexer, keyed_generator, page_bitmap, search_service,
};

struct EchoVision;

#[async_trait]
impl VisionAnswerProvider for EchoVision {
    async fn answer(&self, image: &[u8], query: &str) -> Result<String> {
        Ok(format!("{query} ({} bytes)", image.len()))
    }

    fn provider_name(&self) -> &str {
        "echo"
    }
}

struct Fixture {
    _dir: TempDir,
    service: RetrievalService,
    page_paths: Vec<String>,
    metadata: InMemoryMetadataStore,
}

async fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(InMemoryVectorStoreProvider::new());
    create_keyed_collection(store.as_ref(), "books").await;
    let generator = keyed_generator().await;

    let pages: Vec<PageImage> = (1..=3)
        .map(|n| {
            PageImage::new(
                "artifact",
                n,
                page_bitmap(n),
                dir.path().join(format!("book_page_{n}.png")),
            )
        })
        .collect();
    for page in &pages {
        page.save().unwrap();
    }
    indexer(generator.clone(), store.clone())
        .index(&pages, "books", 2, 0)
        .await
        .unwrap();

    let metadata = InMemoryMetadataStore::new();
    let search = Arc::new(search_service(generator.clone(), store));
    let lookup = Arc::new(MetadataLookup::new(Arc::new(metadata.clone()), TIMEOUT));
    Fixture {
        service: RetrievalService::new(generator, search, lookup, "books"),
        page_paths: pages.iter().map(PageImage::path_string).collect(),
        metadata,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_hits_are_enriched_with_metadata_when_present() {
    let fixture = fixture().await;
    fixture.metadata.insert(
        fixture.page_paths[1].clone(),
        json!({"text_book_name": "Algebra", "page_number": 2, "volume": "1"}),
    );

    let retrieval = fixture.service.retrieve("page 2", 3, false).await.unwrap();

    assert_eq!(retrieval.pages.len(), 3);
    let top = &retrieval.pages[0];
    assert_eq!(top.hit.payload.image, fixture.page_paths[1]);
    let metadata = top.metadata.as_ref().unwrap().page_metadata().unwrap();
    assert_eq!(metadata.text_book_name.as_deref(), Some("Algebra"));
    assert!(retrieval.pages[1].metadata.is_none());
    assert!(retrieval.answer.is_none());
    assert!(retrieval.answer_error.is_none());
}

#[tokio::test]
async fn test_answer_is_generated_from_the_top_page() {
    let fixture = fixture().await;
    let service = fixture.service.with_vision(Arc::new(EchoVision), TIMEOUT);
    assert!(service.answers_enabled());

    let retrieval = service.retrieve("page 3", 1, true).await.unwrap();
    let answer = retrieval.answer.unwrap();
    assert!(answer.starts_with("page 3 ("));
}

#[tokio::test]
async fn test_answer_without_vision_reports_error_but_returns_hits() {
    let fixture = fixture().await;
    let retrieval = fixture.service.retrieve("page 1", 2, true).await.unwrap();
    assert_eq!(retrieval.pages.len(), 2);
    assert!(retrieval.answer.is_none());
    assert!(retrieval.answer_error.is_some());
}

#[tokio::test]
async fn test_empty_collection_propagates_no_match() {
    let store = Arc::new(InMemoryVectorStoreProvider::new());
    create_keyed_collection(store.as_ref(), "books").await;
    let generator = keyed_generator().await;
    let search = Arc::new(search_service(generator.clone(), store));
    let lookup = Arc::new(MetadataLookup::new(
        Arc::new(InMemoryMetadataStore::new()),
        TIMEOUT,
    ));
    let service = RetrievalService::new(generator, search, lookup, "books");

    assert_eq!(service.model_state(), ModelState::Ready);
    let err = service.retrieve("page 1", 3, false).await.unwrap_err();
    assert!(matches!(err, Error::NoMatch { .. }));
}

#[tokio::test]
async fn test_metadata_lookup_maps_missing_records_to_none() {
    let store = InMemoryMetadataStore::new().with_record("k", json!({"volume": "2"}));
    let lookup = MetadataLookup::new(Arc::new(store), TIMEOUT);

    assert!(lookup.find("k").await.unwrap().is_some());
    assert!(lookup.find("missing").await.unwrap().is_none());
    assert!(matches!(
        lookup.lookup("missing").await,
        Err(Error::NotFound { .. })
    ));
}
