//! Tests for metadata stores

use serde_json::json;
use vdr_domain::error::Error;
use vdr_domain::ports::providers::MetadataStore;
use vdr_providers::metadata::InMemoryMetadataStore;

#[tokio::test]
async fn test_in_memory_lookup_returns_inserted_document() {
    let store = InMemoryMetadataStore::new().with_record(
        "images/algebra_page_4.png",
        json!({"text_book_name": "Algebra", "page_number": 4}),
    );

    let record = store.lookup("images/algebra_page_4.png").await.unwrap();
    assert_eq!(record.key, "images/algebra_page_4.png");
    let page = record.page_metadata().unwrap();
    assert_eq!(page.text_book_name.as_deref(), Some("Algebra"));
    assert_eq!(page.page_number, Some(4));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_in_memory_miss_is_not_found() {
    let store = InMemoryMetadataStore::new();
    assert!(store.is_empty());
    assert!(matches!(
        store.lookup("missing").await,
        Err(Error::NotFound { .. })
    ));
    store.health_check().await.unwrap();
}

#[cfg(feature = "metadata-redis")]
#[test]
fn test_redis_keys_are_namespaced() {
    let store =
        vdr_providers::metadata::RedisMetadataStore::new("redis://127.0.0.1:6379", "vdr").unwrap();
    assert_eq!(store.namespaced_key("a.png"), "vdr:a.png");
}
