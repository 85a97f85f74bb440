//! Use Cases
//!
//! | Use case | Type |
//! |----------|------|
//! | Ingestion | [`DocumentIngestor`] |
//! | Embedding | [`EmbeddingGenerator`] |
//! | Indexing | [`BatchIndexer`] |
//! | Search | [`SearchService`] |
//! | Retrieval | [`RetrievalService`] |
//! | Collections | [`CollectionManager`] |
//! | Upload pipeline | [`DocumentEmbedService`] |

pub mod collections;
pub mod document_embed;
pub mod indexing;
pub mod ingestion;
pub mod metadata;
pub mod model;
pub mod resilience;
pub mod retrieval;
pub mod search;

pub use collections::CollectionManager;
pub use document_embed::{DocumentEmbedReport, DocumentEmbedService};
pub use indexing::BatchIndexer;
pub use ingestion::{DocumentIngestor, PageCursor, PageIter, PageSequence};
pub use metadata::MetadataLookup;
pub use model::{EmbeddingGenerator, ModelState};
pub use resilience::{Backoff, RetryPolicy, retry_any, retry_transient, with_timeout};
pub use retrieval::RetrievalService;
pub use search::SearchService;
