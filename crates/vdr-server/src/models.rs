//! Request and response bodies of the HTTP API

use serde::{Deserialize, Serialize};
use vdr_application::use_cases::{DocumentEmbedReport, ModelState};
use vdr_domain::constants::DEFAULT_INDEXING_THRESHOLD;
use vdr_domain::value_objects::{CollectionInfo, Retrieval, RetrievedPage, SkippedBatch};

use crate::constants::EMBED_SUCCESS_MESSAGE;

// ============================================================================
// Document embed
// ============================================================================

/// Response of `POST /document_embed`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedResponse {
    /// Fixed success message
    pub status: String,
    /// Content-derived id of the upload, part of every page file name
    pub artifact_id: String,
    /// Pages produced by ingestion
    pub pages: usize,
    /// Batches run
    pub batches_total: usize,
    /// Batches submitted to the store
    pub batches_completed: usize,
    /// Batches skipped after exhausting retries
    pub skipped_batches: Vec<SkippedBatch>,
    /// Next free point id of the collection
    pub next_id: u64,
}

impl From<DocumentEmbedReport> for EmbedResponse {
    fn from(report: DocumentEmbedReport) -> Self {
        Self {
            status: EMBED_SUCCESS_MESSAGE.to_string(),
            artifact_id: report.artifact_id,
            pages: report.pages,
            batches_total: report.indexing.batches_total,
            batches_completed: report.indexing.batches_completed,
            skipped_batches: report.indexing.skipped_batches,
            next_id: report.indexing.next_id,
        }
    }
}

// ============================================================================
// Document retrieval
// ============================================================================

/// Body of `POST /document_retrieval`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalRequest {
    /// Natural-language query
    pub user_query: String,
    /// Hits to return; the configured default when absent
    #[serde(default)]
    pub top_k: Option<usize>,
    /// Ask the vision model to answer from the top page
    #[serde(default)]
    pub generate_answer: bool,
}

/// One ranked page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedPageResponse {
    /// Point id
    pub id: u64,
    /// Stored page image path
    pub image_path: String,
    /// Similarity score
    pub score: f32,
    /// Page number within the source artifact
    pub page_number: Option<u32>,
    /// Book identifier
    pub book_id: Option<String>,
    /// Metadata document found for the page image
    pub metadata: Option<serde_json::Value>,
}

impl From<RetrievedPage> for RetrievedPageResponse {
    fn from(page: RetrievedPage) -> Self {
        let RetrievedPage { hit, metadata } = page;
        Self {
            id: hit.id,
            image_path: hit.payload.image,
            score: hit.score,
            page_number: hit.payload.page_number,
            book_id: hit.payload.book_id,
            metadata: metadata.map(|record| record.document),
        }
    }
}

/// Response of `POST /document_retrieval`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalResponse {
    /// Image paths, best first
    pub retrieved_image_paths: Vec<String>,
    /// Scores aligned with `retrieved_image_paths`
    pub scores: Vec<f32>,
    /// Full hits
    pub results: Vec<RetrievedPageResponse>,
    /// Generated answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Why the answer could not be generated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_error: Option<String>,
}

impl From<Retrieval> for RetrievalResponse {
    fn from(retrieval: Retrieval) -> Self {
        let results: Vec<RetrievedPageResponse> =
            retrieval.pages.into_iter().map(Into::into).collect();
        Self {
            retrieved_image_paths: results.iter().map(|r| r.image_path.clone()).collect(),
            scores: results.iter().map(|r| r.score).collect(),
            results,
            answer: retrieval.answer,
            answer_error: retrieval.answer_error,
        }
    }
}

// ============================================================================
// Collections
// ============================================================================

fn default_indexing_threshold() -> u64 {
    DEFAULT_INDEXING_THRESHOLD
}

/// Body of `POST /create_qdrant_collection`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCollectionRequest {
    /// Collection name
    pub collection_name: String,
    /// Dimensionality of every sub-vector
    pub vector_size: usize,
    /// Points before the store builds an approximate index
    #[serde(default = "default_indexing_threshold")]
    pub indexing_threshold: u64,
}

/// Body of `POST /delete_qdrant_collection`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCollectionRequest {
    /// Collection name
    pub collection_name: String,
}

/// Acknowledgement of a collection change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionStatusResponse {
    /// Human readable outcome
    pub status: String,
    /// Affected collection
    pub collection_name: String,
}

/// One listed collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionResponse {
    /// Collection name
    pub name: String,
    /// Stored points, when known
    pub points_count: Option<u64>,
    /// Declared vector size, when known
    pub vector_size: Option<usize>,
}

impl From<CollectionInfo> for CollectionResponse {
    fn from(info: CollectionInfo) -> Self {
        Self {
            name: info.name,
            points_count: info.points_count,
            vector_size: info.vector_size,
        }
    }
}

/// Response of `POST /get_qdrant_collections`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionListResponse {
    /// Collections sorted by name
    pub collections: Vec<CollectionResponse>,
}

// ============================================================================
// Health
// ============================================================================

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `ok` when the model is ready, `degraded` otherwise
    pub status: &'static str,
    /// Embedding model lifecycle
    pub model: ModelState,
    /// Model identifier
    pub model_name: String,
    /// Embedding provider name
    pub embedding_provider: String,
    /// Vector store provider name
    pub vector_store: String,
    /// Metadata store provider name
    pub metadata_store: String,
    /// PDF rasterizer name
    pub rasterizer: &'static str,
    /// Collection used by uploads and queries
    pub collection: String,
    /// Whether `generate_answer` is honoured
    pub answers_enabled: bool,
}
