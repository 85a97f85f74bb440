//! Metadata store port

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::MetadataRecord;

/// Read-only keyed store holding book/page metadata and binary content
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Fetch the record stored under `key`
    ///
    /// Fails with `NotFound` when no record exists.
    async fn lookup(&self, key: &str) -> Result<MetadataRecord>;

    /// Provider identifier (e.g. "redis", "memory")
    fn provider_name(&self) -> &str;

    /// Health check for the provider
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
