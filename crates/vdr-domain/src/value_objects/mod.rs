//! Domain Value Objects
//!
//! Immutable value objects that represent concepts in the domain
//! without identity.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Artifact`] | Uploaded PDF, ZIP or image |
//! | [`PageImage`] | One rasterized page |
//! | [`EmbeddingVector`] | Single or multi-vector embedding |
//! | [`IndexedPoint`] | Vector plus typed payload submitted to the store |
//! | [`SearchHit`] | Ranked query result |
//! | [`CollectionSpec`] | Collection creation parameters |
//! | [`MetadataRecord`] | Auxiliary keyed record |
//! | [`IndexingReport`] | Outcome of a batch indexing call |

/// Uploaded artifacts
pub mod artifact;
/// Collection configuration
pub mod collection;
/// Embedding vectors
pub mod embedding;
/// Indexing progress and reports
pub mod indexing;
/// Metadata records
pub mod metadata;
/// Page images
pub mod page;
/// Vector store points
pub mod point;
/// Search results
pub mod search;

pub use artifact::{Artifact, ArtifactKind, is_image_file_name};
pub use collection::{
    CollectionInfo, CollectionPolicy, CollectionSpec, Distance, MultiVectorComparator,
    ScalarQuantization, validate_collection_name,
};
pub use embedding::EmbeddingVector;
pub use indexing::{IndexingProgress, IndexingReport, SkippedBatch};
pub use metadata::{MetadataRecord, PageMetadata};
pub use page::PageImage;
pub use point::{IndexedPoint, PointPayload};
pub use search::{Retrieval, RetrievedPage, SearchHit};
