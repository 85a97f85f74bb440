//! Provider selection types
//!
//! Each section names a provider registered in the `vdr-application`
//! registries and carries the settings handed to its factory.

use serde::{Deserialize, Serialize};
use vdr_application::ports::registry::{
    EmbeddingProviderConfig, MetadataStoreConfig, VectorStoreProviderConfig,
};
use vdr_providers::constants::{
    COLPALI_DEFAULT_BASE_URL, COLPALI_DEFAULT_MODEL, EMBEDDING_DIMENSION_COLPALI,
    METADATA_DEFAULT_NAMESPACE, QDRANT_DEFAULT_URL, REDIS_DEFAULT_URL,
    VISION_DEFAULT_MAX_NEW_TOKENS,
};

use crate::constants::{
    DEFAULT_EMBEDDING_PROVIDER, DEFAULT_METADATA_PROVIDER, DEFAULT_VECTOR_STORE_PROVIDER,
    DEFAULT_VISION_BASE_URL,
};

/// Embedding model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Registry name (`colpali`, `null`)
    pub provider: String,
    /// Model identifier
    pub model: String,
    /// Model server URL
    pub base_url: Option<String>,
    /// Bearer credential for the model server
    pub api_key: Option<String>,
    /// Sub-vector dimensionality
    pub dimensions: usize,
    /// Keep per-patch vectors instead of mean pooling
    pub multi_vector: bool,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_EMBEDDING_PROVIDER.to_string(),
            model: COLPALI_DEFAULT_MODEL.to_string(),
            base_url: Some(COLPALI_DEFAULT_BASE_URL.to_string()),
            api_key: None,
            dimensions: EMBEDDING_DIMENSION_COLPALI,
            multi_vector: true,
        }
    }
}

impl EmbeddingSettings {
    /// Registry configuration with the model deadline applied
    pub fn registry_config(&self, timeout_secs: u64) -> EmbeddingProviderConfig {
        let mut config = EmbeddingProviderConfig::new(&self.provider)
            .with_model(&self.model)
            .with_dimensions(self.dimensions)
            .with_multi_vector(self.multi_vector)
            .with_timeout_secs(timeout_secs);
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url);
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        config
    }
}

/// Vector store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreSettings {
    /// Registry name (`qdrant`, `memory`)
    pub provider: String,
    /// Store endpoint
    pub url: Option<String>,
    /// Store credential
    pub api_key: Option<String>,
}

impl Default for VectorStoreSettings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_VECTOR_STORE_PROVIDER.to_string(),
            url: Some(QDRANT_DEFAULT_URL.to_string()),
            api_key: None,
        }
    }
}

impl VectorStoreSettings {
    /// Registry configuration with the store deadline applied
    pub fn registry_config(&self, timeout_secs: u64) -> VectorStoreProviderConfig {
        let mut config =
            VectorStoreProviderConfig::new(&self.provider).with_timeout_secs(timeout_secs);
        if let Some(url) = &self.url {
            config = config.with_url(url);
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        config
    }
}

/// Metadata store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataSettings {
    /// Registry name (`redis`, `memory`)
    pub provider: String,
    /// Store endpoint
    pub url: Option<String>,
    /// Key prefix
    pub namespace: String,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            provider: DEFAULT_METADATA_PROVIDER.to_string(),
            url: Some(REDIS_DEFAULT_URL.to_string()),
            namespace: METADATA_DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl MetadataSettings {
    /// Registry configuration
    pub fn registry_config(&self) -> MetadataStoreConfig {
        let config = MetadataStoreConfig::new(&self.provider).with_namespace(&self.namespace);
        match &self.url {
            Some(url) => config.with_url(url),
            None => config,
        }
    }
}

/// Vision-language answer host settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionSettings {
    /// Offer answer generation
    pub enabled: bool,
    /// Host URL
    pub base_url: String,
    /// Generation length limit
    pub max_new_tokens: u32,
}

impl Default for VisionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: DEFAULT_VISION_BASE_URL.to_string(),
            max_new_tokens: VISION_DEFAULT_MAX_NEW_TOKENS,
        }
    }
}

/// Provider configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Embedding provider configuration
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    /// Vector store provider configuration
    #[serde(default)]
    pub vector_store: VectorStoreSettings,
    /// Metadata store configuration
    #[serde(default)]
    pub metadata: MetadataSettings,
    /// Answer generation
    #[serde(default)]
    pub vision: VisionSettings,
}
