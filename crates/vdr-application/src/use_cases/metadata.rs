//! Metadata lookups

use std::sync::Arc;
use std::time::Duration;

use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::MetadataStore;
use vdr_domain::value_objects::MetadataRecord;

use super::resilience::with_timeout;

/// Read-through access to the metadata store
pub struct MetadataLookup {
    store: Arc<dyn MetadataStore>,
    timeout: Duration,
}

impl MetadataLookup {
    /// Create a lookup bounded by `timeout`
    pub fn new(store: Arc<dyn MetadataStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Record under `key`, or `NotFound`
    pub async fn lookup(&self, key: &str) -> Result<MetadataRecord> {
        with_timeout("metadata_lookup", self.timeout, self.store.lookup(key)).await
    }

    /// Record under `key`, with `NotFound` mapped to `None`
    pub async fn find(&self, key: &str) -> Result<Option<MetadataRecord>> {
        match self.lookup(key).await {
            Ok(record) => Ok(Some(record)),
            Err(Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Backing provider name
    pub fn provider_name(&self) -> &str {
        self.store.provider_name()
    }
}
