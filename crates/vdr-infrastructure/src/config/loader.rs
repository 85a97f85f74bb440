//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use vdr_application::ports::registry::{
    list_embedding_providers, list_metadata_stores, list_vector_store_providers,
};
use vdr_domain::error::{Error, Result};

use crate::config::AppConfig;
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::log_config_loaded;

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, else the first default location found)
    /// 3. Environment variables with prefix (e.g., `VDR_SERVER__PORT`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match &self.config_path {
            Some(config_path) if config_path.exists() => {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            }
            Some(config_path) => {
                return Err(Error::configuration(format!(
                    "Configuration file not found: {}",
                    config_path.display()
                )));
            }
            None => {
                if let Some(default_path) = Self::find_default_config_path() {
                    figment = figment.merge(Toml::file(&default_path));
                    log_config_loaded(&default_path, true);
                }
            }
        }

        // Double underscore separates nested keys (VDR_PROVIDERS__VECTOR_STORE__API_KEY)
        figment = figment.merge(
            Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR),
        );

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing file among the default configuration locations
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let mut candidates = vec![
            current_dir.join(DEFAULT_CONFIG_FILENAME),
            current_dir
                .join(DEFAULT_CONFIG_DIR)
                .join(DEFAULT_CONFIG_FILENAME),
        ];
        candidates.extend(
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
        );
        candidates.extend(dirs::home_dir().map(|d| {
            d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                .join(DEFAULT_CONFIG_FILENAME)
        }));

        candidates.into_iter().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(message: impl Into<String>) -> Error {
    Error::configuration(message)
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_server_config(config)?;
    validate_pipeline_config(config)?;
    validate_provider_config(config)?;
    validate_collection_defaults(config)?;
    validate_resilience_config(config)?;
    Ok(())
}

fn validate_server_config(config: &AppConfig) -> Result<()> {
    if config.server.port == 0 {
        return Err(invalid("Server port cannot be 0"));
    }
    if config.server.max_upload_mb == 0 {
        return Err(invalid("Upload limit cannot be 0"));
    }
    Ok(())
}

fn validate_pipeline_config(config: &AppConfig) -> Result<()> {
    let pipeline = &config.pipeline;
    vdr_domain::value_objects::validate_collection_name(&pipeline.collection)
        .map_err(|e| invalid(format!("pipeline.collection: {e}")))?;
    if pipeline.batch_size == 0 {
        return Err(invalid("Batch size must be at least 1"));
    }
    if pipeline.top_k == 0 {
        return Err(invalid("top_k must be at least 1"));
    }
    if pipeline.render_dpi.is_nan() || pipeline.render_dpi <= 0.0 {
        return Err(invalid("Render DPI must be positive"));
    }
    Ok(())
}

fn check_provider(
    section: &str,
    name: &str,
    url: Option<&str>,
    available: &[(&'static str, &'static str)],
) -> Result<()> {
    if !available.iter().any(|(known, _)| *known == name) {
        let names: Vec<&str> = available.iter().map(|(n, _)| *n).collect();
        return Err(invalid(format!(
            "Unknown {section} provider '{name}'. Available: {names:?}"
        )));
    }
    let missing_url = url.is_none_or(|u| u.trim().is_empty());
    if REMOTE_PROVIDERS.contains(&name) && missing_url {
        return Err(invalid(format!(
            "{section} provider '{name}' requires a URL"
        )));
    }
    Ok(())
}

fn validate_provider_config(config: &AppConfig) -> Result<()> {
    let providers = &config.providers;
    check_provider(
        "embedding",
        &providers.embedding.provider,
        providers.embedding.base_url.as_deref(),
        &list_embedding_providers(),
    )?;
    if providers.embedding.dimensions == 0 {
        return Err(invalid("Embedding dimensions cannot be 0"));
    }
    check_provider(
        "vector store",
        &providers.vector_store.provider,
        providers.vector_store.url.as_deref(),
        &list_vector_store_providers(),
    )?;
    check_provider(
        "metadata",
        &providers.metadata.provider,
        providers.metadata.url.as_deref(),
        &list_metadata_stores(),
    )?;
    if providers.vision.enabled && providers.vision.base_url.trim().is_empty() {
        return Err(invalid("Vision answers are enabled but no base_url is set"));
    }
    Ok(())
}

fn validate_collection_defaults(config: &AppConfig) -> Result<()> {
    let quantization = &config.collection_defaults.quantization;
    let quantile = quantization.quantile;
    if quantization.enabled && (quantile.is_nan() || quantile <= 0.5 || quantile > 1.0) {
        return Err(invalid(format!(
            "Quantization quantile {quantile} must be in (0.5, 1.0]"
        )));
    }
    Ok(())
}

fn validate_resilience_config(config: &AppConfig) -> Result<()> {
    let resilience = &config.resilience;
    if resilience.upsert_max_attempts == 0 {
        return Err(invalid("Upsert attempts must be at least 1"));
    }
    if resilience.store_timeout_secs == 0 || resilience.model_timeout_secs == 0 {
        return Err(invalid("Timeouts cannot be 0"));
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Offline providers: null embeddings, in-memory stores
    pub fn offline(mut self) -> Self {
        let providers = &mut self.config.providers;
        providers.embedding.provider = "null".to_string();
        providers.embedding.base_url = None;
        providers.vector_store.provider = "memory".to_string();
        providers.vector_store.url = None;
        providers.metadata.provider = "memory".to_string();
        providers.metadata.url = None;
        self
    }

    /// Set the server configuration
    pub fn with_server(mut self, server: crate::config::ServerConfig) -> Self {
        self.config.server = server;
        self
    }

    /// Set the logging configuration
    pub fn with_logging(mut self, logging: crate::config::LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set the pipeline configuration
    pub fn with_pipeline(mut self, pipeline: crate::config::PipelineConfig) -> Self {
        self.config.pipeline = pipeline;
        self
    }

    /// Set the embedding provider configuration
    pub fn with_embedding(mut self, embedding: crate::config::EmbeddingSettings) -> Self {
        self.config.providers.embedding = embedding;
        self
    }

    /// Set the vector store configuration
    pub fn with_vector_store(mut self, vector_store: crate::config::VectorStoreSettings) -> Self {
        self.config.providers.vector_store = vector_store;
        self
    }

    /// Set the vision configuration
    pub fn with_vision(mut self, vision: crate::config::VisionSettings) -> Self {
        self.config.providers.vision = vision;
        self
    }

    /// Set the resilience configuration
    pub fn with_resilience(mut self, resilience: crate::config::ResilienceConfig) -> Self {
        self.config.resilience = resilience;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
