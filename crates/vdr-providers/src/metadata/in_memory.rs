//! In-memory metadata store
//!
//! Keyed JSON documents held in a concurrent map. Used in development and
//! tests; records are inserted through [`InMemoryMetadataStore::insert`].

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::MetadataStore;
use vdr_domain::value_objects::MetadataRecord;

/// In-memory metadata store
#[derive(Clone, Default)]
pub struct InMemoryMetadataStore {
    records: Arc<DashMap<String, Value>>,
}

impl InMemoryMetadataStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the document under `key`
    pub fn insert(&self, key: impl Into<String>, document: Value) {
        self.records.insert(key.into(), document);
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_record(self, key: impl Into<String>, document: Value) -> Self {
        self.insert(key, document);
        self
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn lookup(&self, key: &str) -> Result<MetadataRecord> {
        self.records
            .get(key)
            .map(|doc| MetadataRecord::new(key, doc.value().clone()))
            .ok_or_else(|| Error::not_found(format!("metadata record '{key}'")))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use vdr_application::ports::registry::{METADATA_STORES, MetadataStoreConfig, MetadataStoreEntry};

fn memory_factory(
    _config: &MetadataStoreConfig,
) -> std::result::Result<Arc<dyn MetadataStore>, String> {
    Ok(Arc::new(InMemoryMetadataStore::new()))
}

#[linkme::distributed_slice(METADATA_STORES)]
static MEMORY_METADATA_STORE: MetadataStoreEntry = MetadataStoreEntry {
    name: "memory",
    description: "In-memory metadata records (development and testing)",
    factory: memory_factory,
};
