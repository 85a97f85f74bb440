//! Tests for provider registries
//!
//! `vdr-providers` is linked through the support module, so its linkme
//! entries are present and resolve to real providers.

use vdr_application::ports::registry::*;

#[test]
fn test_list_embedding_providers_includes_builtins() {
    let names: Vec<&str> = list_embedding_providers()
        .into_iter()
        .map(|(name, _)| name)
        .collect();
    assert!(names.contains(&"null"), "Available: {names:?}");
    assert!(names.contains(&"colpali"), "Available: {names:?}");
}

#[test]
fn test_resolve_null_embedding_provider_honours_dimensions() {
    let config = EmbeddingProviderConfig::new("null").with_dimensions(64);
    let provider = resolve_embedding_provider(&config).expect("null provider registered");
    assert_eq!(provider.provider_name(), "null");
    assert_eq!(provider.dimensions(), 64);
}

#[test]
fn test_resolve_unknown_embedding_provider_lists_available() {
    let config = EmbeddingProviderConfig::new("does-not-exist");
    let err = match resolve_embedding_provider(&config) {
        Ok(_) => panic!("unknown provider must not resolve"),
        Err(e) => e,
    };
    assert!(err.contains("does-not-exist"));
    assert!(err.contains("null"));
}

#[test]
fn test_resolve_memory_vector_store() {
    let provider = resolve_vector_store_provider(&VectorStoreProviderConfig::new("memory"))
        .expect("memory store registered");
    assert_eq!(provider.provider_name(), "memory");
}

#[test]
fn test_resolve_qdrant_vector_store_without_network() {
    let config = VectorStoreProviderConfig::new("qdrant")
        .with_url("http://127.0.0.1:6333")
        .with_api_key("test-key");
    let provider = resolve_vector_store_provider(&config).expect("qdrant store registered");
    assert_eq!(provider.provider_name(), "qdrant");
}

#[test]
fn test_resolve_memory_metadata_store() {
    let store = resolve_metadata_store(&MetadataStoreConfig::new("memory"))
        .expect("memory metadata store registered");
    assert_eq!(store.provider_name(), "memory");
    assert!(
        list_metadata_stores()
            .iter()
            .any(|(name, _)| *name == "memory")
    );
}
