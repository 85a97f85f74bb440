//! Embedding Generator
//!
//! Owns the single embedding model instance of the process and enforces its
//! one-shot lifecycle: `Unloaded → Loading → Ready`, or `Failed` for good.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde::Serialize;
use tracing::{error, info};
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::EmbeddingProvider;
use vdr_domain::value_objects::{EmbeddingVector, PageImage};

use super::resilience::with_timeout;

/// Lifecycle of the embedding model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum ModelState {
    /// Not loaded yet
    Unloaded,
    /// Load in progress
    Loading,
    /// Ready for inference
    Ready,
    /// Load failed; terminal until restart
    Failed(String),
}

impl ModelState {
    /// Short state name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unloaded => "unloaded",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::Failed(_) => "failed",
        }
    }
}

impl fmt::Display for ModelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Embedding Generator wrapping one [`EmbeddingProvider`]
///
/// Constructed once by the composition root and shared by the indexer and
/// the search service.
pub struct EmbeddingGenerator {
    provider: Arc<dyn EmbeddingProvider>,
    state: RwLock<ModelState>,
    timeout: Duration,
}

impl EmbeddingGenerator {
    /// Wrap a provider; inference calls are bounded by `timeout`
    pub fn new(provider: Arc<dyn EmbeddingProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            state: RwLock::new(ModelState::Unloaded),
            timeout,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ModelState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, state: ModelState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Load the model
    ///
    /// Only the first call does any work. A failed load leaves the generator
    /// in `Failed` and every later call returns `ModelLoad`.
    pub async fn load(&self) -> Result<()> {
        {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            match &*state {
                ModelState::Ready => return Ok(()),
                ModelState::Failed(reason) => return Err(Error::model_load(reason.clone())),
                ModelState::Loading => {
                    return Err(Error::model_load("model load already in progress"));
                }
                ModelState::Unloaded => *state = ModelState::Loading,
            }
        }

        info!(
            provider = self.provider.provider_name(),
            model = self.provider.model_name(),
            dimensions = self.provider.dimensions(),
            "Loading embedding model"
        );

        match with_timeout("model_load", self.timeout, self.provider.load()).await {
            Ok(()) => {
                self.set_state(ModelState::Ready);
                info!(model = self.provider.model_name(), "Embedding model ready");
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                error!(model = self.provider.model_name(), error = %reason, "Embedding model failed to load");
                self.set_state(ModelState::Failed(reason.clone()));
                Err(Error::model_load(reason))
            }
        }
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.state() {
            ModelState::Ready => Ok(()),
            ModelState::Failed(reason) => Err(Error::model_load(reason)),
            other => Err(Error::model_load(format!("model is {other}"))),
        }
    }

    /// Embed page images, one vector per page in input order
    pub async fn embed_images(&self, images: &[PageImage]) -> Result<Vec<EmbeddingVector>> {
        self.ensure_ready()?;
        if images.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = with_timeout(
            "embed_images",
            self.timeout,
            self.provider.embed_images(images),
        )
        .await?;
        if vectors.len() != images.len() {
            return Err(Error::embedding_inference(format!(
                "Model returned {} embeddings for {} images",
                vectors.len(),
                images.len()
            )));
        }
        for vector in &vectors {
            vector.ensure_dimensions(self.dimensions())?;
        }
        Ok(vectors)
    }

    /// Embed a text query
    pub async fn embed_query(&self, text: &str) -> Result<EmbeddingVector> {
        self.ensure_ready()?;
        let vector =
            with_timeout("embed_query", self.timeout, self.provider.embed_query(text)).await?;
        vector.ensure_dimensions(self.dimensions())?;
        Ok(vector)
    }

    /// Dimensionality of each (sub-)vector
    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    /// Model identifier
    pub fn model_name(&self) -> &str {
        self.provider.model_name()
    }

    /// Provider identifier
    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }
}
