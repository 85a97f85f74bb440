//! Null embedding provider for testing and development
//!
//! Provides deterministic, hash-based embeddings. Identical pixels or
//! identical text always produce identical vectors. No model server needed.

use async_trait::async_trait;
use vdr_domain::error::Result;
use vdr_domain::ports::providers::EmbeddingProvider;
use vdr_domain::value_objects::{EmbeddingVector, PageImage};

use crate::constants::{EMBEDDING_DIMENSION_NULL, NULL_MULTI_VECTOR_ROWS};

/// Null embedding provider for testing
///
/// # Example
///
/// ```ignore
/// use vdr_providers::embedding::NullEmbeddingProvider;
///
/// let provider = NullEmbeddingProvider::new();
/// assert_eq!(provider.dimensions(), 128);
/// assert_eq!(provider.provider_name(), "null");
/// ```
#[derive(Debug, Clone)]
pub struct NullEmbeddingProvider {
    dimensions: usize,
    rows: Option<usize>,
}

impl NullEmbeddingProvider {
    /// Multi-vector provider with the default dimension
    pub fn new() -> Self {
        Self {
            dimensions: EMBEDDING_DIMENSION_NULL,
            rows: Some(NULL_MULTI_VECTOR_ROWS),
        }
    }

    /// Override the dimension
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions.max(1);
        self
    }

    /// Produce single pooled vectors instead of multi-vectors
    pub fn single_vector(mut self) -> Self {
        self.rows = None;
        self
    }

    fn embed_seed(&self, seed: u64) -> EmbeddingVector {
        match self.rows {
            Some(rows) => EmbeddingVector::Multi(
                (0..rows as u64)
                    .map(|row| unit_vector(seed ^ row.wrapping_mul(0x9E37_79B9_7F4A_7C15), self.dimensions))
                    .collect(),
            ),
            None => EmbeddingVector::Single(unit_vector(seed, self.dimensions)),
        }
    }
}

impl Default for NullEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// FNV-1a over a byte slice
fn fnv1a(bytes: &[u8], mut hash: u64) -> u64 {
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;

fn image_seed(page: &PageImage) -> u64 {
    let header = [page.image.width().to_le_bytes(), page.image.height().to_le_bytes()].concat();
    fnv1a(page.image.as_bytes(), fnv1a(&header, FNV_OFFSET))
}

fn text_seed(text: &str) -> u64 {
    fnv1a(text.trim().as_bytes(), FNV_OFFSET)
}

/// L2-normalized pseudo-random vector derived from `seed` (xorshift64*)
fn unit_vector(seed: u64, dimensions: usize) -> Vec<f32> {
    let mut state = seed.max(1);
    let mut vector: Vec<f32> = (0..dimensions)
        .map(|_| {
            state ^= state >> 12;
            state ^= state << 25;
            state ^= state >> 27;
            let value = state.wrapping_mul(0x2545_F491_4F6C_DD1D) >> 40;
            (value as f32 / (1u64 << 24) as f32) * 2.0 - 1.0
        })
        .collect();
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
    vector
}

#[async_trait]
impl EmbeddingProvider for NullEmbeddingProvider {
    async fn embed_images(&self, images: &[PageImage]) -> Result<Vec<EmbeddingVector>> {
        Ok(images
            .iter()
            .map(|page| self.embed_seed(image_seed(page)))
            .collect())
    }

    async fn embed_query(&self, text: &str) -> Result<EmbeddingVector> {
        Ok(self.embed_seed(text_seed(text)))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        "null"
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use std::sync::Arc;

use vdr_application::ports::registry::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry,
};

fn null_factory(
    config: &EmbeddingProviderConfig,
) -> std::result::Result<Arc<dyn EmbeddingProvider>, String> {
    let mut provider =
        NullEmbeddingProvider::new().with_dimensions(config.dimensions.unwrap_or(EMBEDDING_DIMENSION_NULL));
    if !config.multi_vector {
        provider = provider.single_vector();
    }
    Ok(Arc::new(provider))
}

#[linkme::distributed_slice(EMBEDDING_PROVIDERS)]
static NULL_PROVIDER: EmbeddingProviderEntry = EmbeddingProviderEntry {
    name: "null",
    description: "Null provider for testing (deterministic hash-based embeddings)",
    factory: null_factory,
};
