//! Embedding provider port

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{EmbeddingVector, PageImage};

/// Query embedded once when a model is loaded
pub const READINESS_QUERY: &str = "readiness check";

/// Multimodal encoder producing page and query embeddings
///
/// Implementations wrap one model instance. Image and query embeddings must
/// live in the same space and have [`dimensions`](Self::dimensions)
/// components per (sub-)vector.
///
/// # Example
///
/// ```ignore
/// let vectors = provider.embed_images(&pages).await?;
/// let query = provider.embed_query("network segmentation diagram").await?;
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of page images, one vector per image, in input order
    async fn embed_images(&self, images: &[PageImage]) -> Result<Vec<EmbeddingVector>>;

    /// Embed a text query
    async fn embed_query(&self, text: &str) -> Result<EmbeddingVector>;

    /// Dimensionality of each (sub-)vector
    fn dimensions(&self) -> usize;

    /// Model identifier
    fn model_name(&self) -> &str;

    /// Provider identifier (e.g. "colpali", "null")
    fn provider_name(&self) -> &str;

    /// Make the model ready for inference
    ///
    /// The default embeds a short query and checks its dimensionality.
    async fn load(&self) -> Result<()> {
        let sample = self.embed_query(READINESS_QUERY).await?;
        sample.ensure_dimensions(self.dimensions())
    }
}
