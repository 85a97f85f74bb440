//! Search Service
//!
//! Embeds a text query and asks the vector store for the closest pages.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::VectorStoreProvider;
use vdr_domain::value_objects::{EmbeddingVector, SearchHit};

use super::model::EmbeddingGenerator;
use super::resilience::with_timeout;

/// Search service implementation
pub struct SearchService {
    generator: Arc<EmbeddingGenerator>,
    store: Arc<dyn VectorStoreProvider>,
    store_timeout: Duration,
}

impl SearchService {
    /// Create a search service
    pub fn new(
        generator: Arc<EmbeddingGenerator>,
        store: Arc<dyn VectorStoreProvider>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            store,
            store_timeout,
        }
    }

    /// Return up to `top_k` hits for `query`, highest similarity first
    ///
    /// An empty result is reported as `NoMatch`, distinct from store errors.
    pub async fn search(
        &self,
        query: &str,
        collection: &str,
        top_k: usize,
    ) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(Error::invalid_argument("query must not be empty"));
        }
        let vector = self.generator.embed_query(query).await?;
        self.search_by_vector(&vector, collection, top_k).await
    }

    /// Same as [`search`](Self::search) with a precomputed query embedding
    pub async fn search_by_vector(
        &self,
        vector: &EmbeddingVector,
        collection: &str,
        top_k: usize,
    ) -> Result<Vec<SearchHit>> {
        if top_k == 0 {
            return Err(Error::invalid_argument("top_k must be at least 1"));
        }
        let mut hits = with_timeout(
            "query_points",
            self.store_timeout,
            self.store.query_points(collection, vector, top_k),
        )
        .await?;

        if hits.is_empty() {
            return Err(Error::no_match(collection));
        }

        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(top_k);
        debug!(collection, hits = hits.len(), top_score = hits[0].score, "Search completed");
        Ok(hits)
    }
}
