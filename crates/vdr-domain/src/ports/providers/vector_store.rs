//! Vector store provider ports

use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{
    CollectionInfo, CollectionSpec, EmbeddingVector, IndexedPoint, SearchHit,
};

/// Vector Store Administrative Operations
///
/// Collection bookkeeping, separate from the data path.
#[async_trait]
pub trait VectorStoreAdmin: Send + Sync {
    /// Check if a collection exists
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// List every collection with whatever statistics the store reports
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>>;

    /// Number of points stored in a collection
    ///
    /// Fails with `CollectionNotFound` when the collection does not exist.
    async fn count_points(&self, collection: &str) -> Result<u64>;

    /// One past the highest point id stored in a collection, 0 when empty
    ///
    /// Ids are not dense: skipped batches and deleted points leave gaps, so
    /// the point count is not a safe next id.
    async fn next_free_id(&self, collection: &str) -> Result<u64>;

    /// Get the name/identifier of this vector store provider
    fn provider_name(&self) -> &str;

    /// Health check for the provider (default lists collections)
    async fn health_check(&self) -> Result<()> {
        self.list_collections().await?;
        Ok(())
    }
}

/// Vector storage used by the indexing and search paths
///
/// # Example
///
/// ```ignore
/// provider.create_collection(&CollectionSpec::new("pages", 128, 100)).await?;
/// provider.upsert_points("pages", &points).await?;
/// let hits = provider.query_points("pages", &query, 3).await?;
/// ```
#[async_trait]
pub trait VectorStoreProvider: VectorStoreAdmin + Send + Sync {
    /// Create a collection
    ///
    /// Fails with `CollectionExists` when the name is taken.
    async fn create_collection(&self, spec: &CollectionSpec) -> Result<()>;

    /// Delete a collection
    ///
    /// Fails with `CollectionNotFound` when the name is unknown.
    async fn delete_collection(&self, name: &str) -> Result<()>;

    /// Insert or replace points by id
    ///
    /// Writes may be acknowledged before they are applied.
    async fn upsert_points(&self, collection: &str, points: &[IndexedPoint]) -> Result<()>;

    /// Return up to `limit` hits, highest similarity first
    async fn query_points(
        &self,
        collection: &str,
        query: &EmbeddingVector,
        limit: usize,
    ) -> Result<Vec<SearchHit>>;
}
