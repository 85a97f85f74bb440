//! Composition root
//!
//! Resolves providers from configuration through the linkme registries,
//! loads the embedding model and checks store connectivity before any
//! service is handed out.
//!
//! ```text
//! AppConfig → registries → providers → EmbeddingGenerator (loaded)
//!                                    → use cases → AppContext
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?).await?;
//! let hits = context.retrieval().retrieve("fractions", 3, false).await?;
//! ```

use std::sync::Arc;

use reqwest::Client;
use tracing::{info, warn};
use vdr_application::ports::registry::{
    resolve_embedding_provider, resolve_metadata_store, resolve_vector_store_provider,
};
use vdr_application::ports::services::{
    CollectionServiceInterface, DocumentEmbedServiceInterface, RetrievalServiceInterface,
};
use vdr_application::use_cases::{
    BatchIndexer, CollectionManager, DocumentEmbedService, DocumentIngestor, EmbeddingGenerator,
    MetadataLookup, RetrievalService, SearchService,
};
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::{
    MetadataStore, PdfRasterizer, VectorStoreAdmin, VectorStoreProvider, VisionAnswerProvider,
};
use vdr_providers::HttpVisionProvider;

use crate::config::AppConfig;
use crate::error_ext::ErrorContext;
use crate::logging::log_health_check;

/// Application context holding every wired service
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ========================================================================
    // Providers
    // ========================================================================
    generator: Arc<EmbeddingGenerator>,
    vector_store: Arc<dyn VectorStoreProvider>,
    metadata_store: Arc<dyn MetadataStore>,
    rasterizer_name: &'static str,

    // ========================================================================
    // Use cases
    // ========================================================================
    indexer: Arc<BatchIndexer>,
    document_embed: Arc<dyn DocumentEmbedServiceInterface>,
    retrieval: Arc<dyn RetrievalServiceInterface>,
    collections: Arc<dyn CollectionServiceInterface>,
}

impl AppContext {
    /// Loaded embedding model
    pub fn generator(&self) -> Arc<EmbeddingGenerator> {
        self.generator.clone()
    }

    /// Vector store provider
    pub fn vector_store(&self) -> Arc<dyn VectorStoreProvider> {
        self.vector_store.clone()
    }

    /// Metadata store provider
    pub fn metadata_store(&self) -> Arc<dyn MetadataStore> {
        self.metadata_store.clone()
    }

    /// Name of the PDF rasterizer in use
    pub fn rasterizer_name(&self) -> &'static str {
        self.rasterizer_name
    }

    /// Batch indexer (progress subscription)
    pub fn indexer(&self) -> Arc<BatchIndexer> {
        self.indexer.clone()
    }

    /// Upload pipeline
    pub fn document_embed(&self) -> Arc<dyn DocumentEmbedServiceInterface> {
        self.document_embed.clone()
    }

    /// Query pipeline
    pub fn retrieval(&self) -> Arc<dyn RetrievalServiceInterface> {
        self.retrieval.clone()
    }

    /// Collection administration
    pub fn collections(&self) -> Arc<dyn CollectionServiceInterface> {
        self.collections.clone()
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("embedding", &self.generator.provider_name())
            .field("model", &self.generator.model_name())
            .field("vector_store", &self.vector_store.provider_name())
            .field("metadata", &self.metadata_store.provider_name())
            .field("rasterizer", &self.rasterizer_name)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "pdfium")]
fn build_rasterizer() -> (Arc<dyn PdfRasterizer>, &'static str) {
    match vdr_providers::PdfiumRasterizer::new() {
        Ok(rasterizer) => (Arc::new(rasterizer), "pdfium"),
        Err(e) => {
            warn!(error = %e, "PDF uploads will be rejected");
            (
                Arc::new(vdr_providers::UnavailableRasterizer::new(e.to_string())),
                "unavailable",
            )
        }
    }
}

#[cfg(not(feature = "pdfium"))]
fn build_rasterizer() -> (Arc<dyn PdfRasterizer>, &'static str) {
    warn!("Built without pdfium; PDF uploads will be rejected");
    (
        Arc::new(vdr_providers::UnavailableRasterizer::new(
            "built without the pdfium feature",
        )),
        "unavailable",
    )
}

fn build_vision(config: &AppConfig) -> Result<Option<Arc<dyn VisionAnswerProvider>>> {
    let vision = &config.providers.vision;
    if !vision.enabled {
        return Ok(None);
    }
    let timeout = config.resilience.model_timeout();
    let http_client = Client::builder()
        .timeout(timeout)
        .build()
        .config_context("Failed to create vision HTTP client")?;
    info!(base_url = %vision.base_url, "Answer generation enabled");
    Ok(Some(Arc::new(
        HttpVisionProvider::new(&vision.base_url, timeout, http_client)
            .with_max_new_tokens(vision.max_new_tokens),
    )))
}

/// Build the application context
///
/// Fails when a provider cannot be resolved, the model does not load or a
/// store is unreachable. Providers are registered by linking
/// `vdr-providers`; no explicit registration call is needed.
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    info!("Initializing application context");
    let config = Arc::new(config);
    let resilience = &config.resilience;
    let providers = &config.providers;

    let embedding = resolve_embedding_provider(
        &providers
            .embedding
            .registry_config(resilience.model_timeout_secs),
    )
    .map_err(|e| Error::configuration(format!("Embedding: {e}")))?;
    let vector_store = resolve_vector_store_provider(
        &providers
            .vector_store
            .registry_config(resilience.store_timeout_secs),
    )
    .map_err(|e| Error::configuration(format!("VectorStore: {e}")))?;
    let metadata_store = resolve_metadata_store(&providers.metadata.registry_config())
        .map_err(|e| Error::configuration(format!("Metadata: {e}")))?;

    info!(
        "Resolved providers: embedding={}, vector_store={}, metadata={}",
        embedding.provider_name(),
        vector_store.provider_name(),
        metadata_store.provider_name()
    );

    let generator = Arc::new(EmbeddingGenerator::new(
        embedding,
        resilience.model_timeout(),
    ));
    generator.load().await?;

    let store_health = vector_store.health_check().await;
    log_health_check(
        vector_store.provider_name(),
        store_health.is_ok(),
        store_health.as_ref().err().map(ToString::to_string).as_deref(),
    );
    store_health?;

    let metadata_health = metadata_store.health_check().await;
    log_health_check(
        metadata_store.provider_name(),
        metadata_health.is_ok(),
        metadata_health.as_ref().err().map(ToString::to_string).as_deref(),
    );
    metadata_health?;

    let pipeline = &config.pipeline;
    tokio::fs::create_dir_all(&pipeline.image_dir)
        .await
        .io_context(format!(
            "Failed to create image directory {}",
            pipeline.image_dir.display()
        ))?;

    let (rasterizer, rasterizer_name) = build_rasterizer();
    let ingestor = Arc::new(
        DocumentIngestor::new(rasterizer, pipeline.image_dir.clone())
            .with_dpi(pipeline.render_dpi),
    );
    let indexer = Arc::new(BatchIndexer::new(
        generator.clone(),
        vector_store.clone(),
        resilience.retry_policy(),
        resilience.store_timeout(),
    ));
    let document_embed = Arc::new(DocumentEmbedService::new(
        ingestor,
        indexer.clone(),
        vector_store.clone(),
        pipeline.collection.clone(),
        pipeline.batch_size,
        resilience.store_timeout(),
    ));

    let search = Arc::new(SearchService::new(
        generator.clone(),
        vector_store.clone(),
        resilience.store_timeout(),
    ));
    let lookup = Arc::new(MetadataLookup::new(
        metadata_store.clone(),
        resilience.store_timeout(),
    ));
    let mut retrieval =
        RetrievalService::new(generator.clone(), search, lookup, pipeline.collection.clone());
    if let Some(vision) = build_vision(&config)? {
        retrieval = retrieval.with_vision(vision, resilience.model_timeout());
    }

    let collections = Arc::new(CollectionManager::new(
        vector_store.clone(),
        config.collection_defaults.to_policy(),
        resilience.store_timeout(),
    ));

    info!(
        collection = %pipeline.collection,
        rasterizer = rasterizer_name,
        "Application context ready"
    );

    Ok(AppContext {
        config,
        generator,
        vector_store,
        metadata_store,
        rasterizer_name,
        indexer,
        document_embed,
        retrieval: Arc::new(retrieval),
        collections,
    })
}
