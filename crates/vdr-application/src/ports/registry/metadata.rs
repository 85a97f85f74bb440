//! Metadata Store Registry

use std::collections::HashMap;
use std::sync::Arc;

use vdr_domain::ports::providers::MetadataStore;

/// Configuration for metadata store creation
#[derive(Debug, Clone, Default)]
pub struct MetadataStoreConfig {
    /// Provider name (e.g., "redis", "memory")
    pub provider: String,
    /// Connection URL
    pub url: Option<String>,
    /// Key namespace prepended to every lookup
    pub namespace: Option<String>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl MetadataStoreConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the key namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Registry entry for metadata stores
pub struct MetadataStoreEntry {
    /// Unique provider name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&MetadataStoreConfig) -> Result<Arc<dyn MetadataStore>, String>,
}

#[linkme::distributed_slice]
pub static METADATA_STORES: [MetadataStoreEntry] = [..];

/// Resolve metadata store by name from registry
pub fn resolve_metadata_store(
    config: &MetadataStoreConfig,
) -> Result<Arc<dyn MetadataStore>, String> {
    METADATA_STORES
        .iter()
        .find(|entry| entry.name == config.provider)
        .map(|entry| (entry.factory)(config))
        .unwrap_or_else(|| {
            let available: Vec<&str> = METADATA_STORES.iter().map(|e| e.name).collect();
            Err(format!(
                "Unknown metadata store '{}'. Available providers: {:?}",
                config.provider, available
            ))
        })
}

/// List all registered metadata stores
pub fn list_metadata_stores() -> Vec<(&'static str, &'static str)> {
    METADATA_STORES
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
