//! Main application configuration

use serde::{Deserialize, Serialize};

use super::{
    CollectionDefaultsConfig, LoggingConfig, PipelineConfig, ProvidersConfig, ResilienceConfig,
    ServerConfig,
};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Ingestion and indexing pipeline
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Provider selection
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Store-side policy for new collections
    #[serde(default)]
    pub collection_defaults: CollectionDefaultsConfig,
    /// Retries and deadlines
    #[serde(default)]
    pub resilience: ResilienceConfig,
}
