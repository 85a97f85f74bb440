//! ColPali Embedding Provider
//!
//! Talks to an out-of-process model server hosting a ColPali checkpoint.
//! Queries and page images are embedded as multi-vectors (one 128-d vector
//! per token or image patch).

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::Client;
use serde_json::json;
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::EmbeddingProvider;
use vdr_domain::value_objects::{EmbeddingVector, PageImage};

use crate::constants::{
    COLPALI_DEFAULT_BASE_URL, COLPALI_DEFAULT_MODEL, COLPALI_IMAGE_ROUTE, COLPALI_TEXT_ROUTE,
    CONTENT_TYPE_JSON, DEFAULT_HTTP_TIMEOUT_SECS, EMBEDDING_DIMENSION_COLPALI,
};
use crate::utils::{HttpResponseUtils, ProviderErrorKind};

const PROVIDER: &str = "ColPali";

/// ColPali embedding provider
///
/// Receives its HTTP client via constructor injection.
///
/// ## Example
///
/// ```ignore
/// let provider = ColPaliEmbeddingProvider::new(
///     "http://localhost:8001".to_string(),
///     "vidore/colpali-v1.2".to_string(),
///     128,
///     Duration::from_secs(120),
///     Client::new(),
/// );
/// ```
pub struct ColPaliEmbeddingProvider {
    base_url: String,
    model: String,
    dimensions: usize,
    multi_vector: bool,
    api_key: Option<String>,
    timeout: Duration,
    http_client: Client,
}

impl ColPaliEmbeddingProvider {
    /// Create a new ColPali provider
    pub fn new(
        base_url: String,
        model: String,
        dimensions: usize,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            dimensions,
            multi_vector: true,
            api_key: None,
            timeout,
            http_client,
        }
    }

    /// Return mean-pooled single vectors instead of multi-vectors
    pub fn with_multi_vector(mut self, multi_vector: bool) -> Self {
        self.multi_vector = multi_vector;
        self
    }

    /// Send a bearer token with every request
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    async fn post(&self, route: &str, body: serde_json::Value) -> Result<serde_json::Value> {
        let mut request = self
            .http_client
            .post(format!("{}/{}", self.base_url, route))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            HttpResponseUtils::request_error(e, route, self.timeout, ProviderErrorKind::Embedding)
        })?;

        HttpResponseUtils::check_and_parse(response, PROVIDER, ProviderErrorKind::Embedding).await
    }

    fn shape(&self, rows: Vec<Vec<f32>>) -> EmbeddingVector {
        if self.multi_vector {
            EmbeddingVector::Multi(rows)
        } else {
            EmbeddingVector::Single(mean_pool(&rows))
        }
    }
}

/// Parse `[[f32]]`, also accepting a batch of one (`[[[f32]]]`)
fn parse_multi_vector(value: serde_json::Value) -> Result<Vec<Vec<f32>>> {
    if let Ok(rows) = serde_json::from_value::<Vec<Vec<f32>>>(value.clone()) {
        return Ok(rows);
    }
    serde_json::from_value::<Vec<Vec<Vec<f32>>>>(value)
        .ok()
        .and_then(|batch| batch.into_iter().next())
        .ok_or_else(|| {
            Error::embedding_inference(format!("{PROVIDER} returned a malformed query embedding"))
        })
}

/// Average the rows of a multi-vector
fn mean_pool(rows: &[Vec<f32>]) -> Vec<f32> {
    let Some(width) = rows.first().map(Vec::len) else {
        return Vec::new();
    };
    let mut pooled = vec![0.0f32; width];
    for row in rows {
        for (acc, value) in pooled.iter_mut().zip(row) {
            *acc += value;
        }
    }
    let count = rows.len() as f32;
    pooled.iter_mut().for_each(|v| *v /= count);
    pooled
}

#[async_trait]
impl EmbeddingProvider for ColPaliEmbeddingProvider {
    async fn embed_images(&self, images: &[PageImage]) -> Result<Vec<EmbeddingVector>> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let encoded = images
            .iter()
            .map(|page| page.to_png_bytes().map(|png| STANDARD.encode(png)))
            .collect::<Result<Vec<_>>>()?;

        let response = self
            .post(COLPALI_IMAGE_ROUTE, json!({ "images_base64": encoded }))
            .await?;
        let batch: Vec<Vec<Vec<f32>>> = serde_json::from_value(response).map_err(|e| {
            Error::embedding_inference(format!("{PROVIDER} returned malformed image embeddings: {e}"))
        })?;

        if batch.len() != images.len() {
            return Err(Error::embedding_inference(format!(
                "{PROVIDER} returned {} embeddings for {} images",
                batch.len(),
                images.len()
            )));
        }
        Ok(batch.into_iter().map(|rows| self.shape(rows)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<EmbeddingVector> {
        let response = self
            .post(COLPALI_TEXT_ROUTE, json!({ "user_query": text }))
            .await?;
        Ok(self.shape(parse_multi_vector(response)?))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "colpali"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use std::sync::Arc;

use vdr_application::ports::registry::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry,
};

/// Factory function for creating ColPali provider instances.
fn colpali_factory(
    config: &EmbeddingProviderConfig,
) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| COLPALI_DEFAULT_BASE_URL.to_string());
    let model = config
        .model
        .clone()
        .unwrap_or_else(|| COLPALI_DEFAULT_MODEL.to_string());
    let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS));
    let http_client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {e}"))?;

    Ok(Arc::new(
        ColPaliEmbeddingProvider::new(
            base_url,
            model,
            config.dimensions.unwrap_or(EMBEDDING_DIMENSION_COLPALI),
            timeout,
            http_client,
        )
        .with_multi_vector(config.multi_vector)
        .with_api_key(config.api_key.clone()),
    ))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static COLPALI_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "colpali",
    description: "ColPali model server (late-interaction multi-vector page embeddings)",
    factory: colpali_factory,
};
