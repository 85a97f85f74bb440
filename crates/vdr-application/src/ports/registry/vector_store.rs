//! Vector Store Provider Registry
//!
//! Auto-registration system for vector store providers.

use std::collections::HashMap;
use std::sync::Arc;

use vdr_domain::ports::providers::VectorStoreProvider;

/// Configuration for vector store provider creation
#[derive(Debug, Clone, Default)]
pub struct VectorStoreProviderConfig {
    /// Provider name (e.g., "qdrant", "memory")
    pub provider: String,
    /// Connection URL
    pub url: Option<String>,
    /// API key sent to the store
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl VectorStoreProviderConfig {
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

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    /// Add extra configuration
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Registry entry for vector store providers
pub struct VectorStoreProviderEntry {
    /// Unique provider name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create provider instance
    pub factory: fn(&VectorStoreProviderConfig) -> Result<Arc<dyn VectorStoreProvider>, String>,
}

#[linkme::distributed_slice]
pub static VECTOR_STORE_PROVIDERS: [VectorStoreProviderEntry] = [..];

/// Resolve vector store provider by name from registry
pub fn resolve_vector_store_provider(
    config: &VectorStoreProviderConfig,
) -> Result<Arc<dyn VectorStoreProvider>, String> {
    let provider_name = &config.provider;

    for entry in VECTOR_STORE_PROVIDERS {
        if entry.name == provider_name {
            return (entry.factory)(config);
        }
    }

    let available: Vec<&str> = VECTOR_STORE_PROVIDERS.iter().map(|e| e.name).collect();

    Err(format!(
        "Unknown vector store provider '{}'. Available providers: {:?}",
        provider_name, available
    ))
}

/// List all registered vector store providers
pub fn list_vector_store_providers() -> Vec<(&'static str, &'static str)> {
    VECTOR_STORE_PROVIDERS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
