//! Application Service Port Interfaces
//!
//! Contracts the HTTP layer talks to. Implementations live in
//! [`crate::use_cases`].

use std::path::Path;

use async_trait::async_trait;
use vdr_domain::error::Result;
use vdr_domain::value_objects::{CollectionInfo, CollectionSpec, Retrieval};

use crate::use_cases::document_embed::DocumentEmbedReport;
use crate::use_cases::model::ModelState;

// ============================================================================
// Document Embed Service Interface
// ============================================================================

/// Upload pipeline: ingest an artifact, persist its pages and index them
#[async_trait]
pub trait DocumentEmbedServiceInterface: Send + Sync {
    /// Embed the artifact stored at `path` under its original file `name`
    async fn embed_file(&self, path: &Path, name: &str) -> Result<DocumentEmbedReport>;

    /// Embed in-memory artifact bytes
    async fn embed_bytes(&self, name: &str, bytes: Vec<u8>) -> Result<DocumentEmbedReport>;
}

// ============================================================================
// Retrieval Service Interface
// ============================================================================

/// Query path: search, enrich with metadata, optionally answer
#[async_trait]
pub trait RetrievalServiceInterface: Send + Sync {
    /// Retrieve the `top_k` best pages for `query`
    ///
    /// Fails with `NoMatch` when the collection returns no hits.
    async fn retrieve(&self, query: &str, top_k: usize, generate_answer: bool)
    -> Result<Retrieval>;

    /// Whether answer generation is available
    fn answers_enabled(&self) -> bool;

    /// Current embedding model state
    fn model_state(&self) -> ModelState;
}

// ============================================================================
// Collection Service Interface
// ============================================================================

/// Collection administration
#[async_trait]
pub trait CollectionServiceInterface: Send + Sync {
    /// Create a collection with the configured policy
    async fn create(
        &self,
        name: &str,
        vector_size: usize,
        indexing_threshold: u64,
    ) -> Result<CollectionSpec>;

    /// Delete a collection
    async fn delete(&self, name: &str) -> Result<()>;

    /// List collections
    async fn list(&self) -> Result<Vec<CollectionInfo>>;
}
