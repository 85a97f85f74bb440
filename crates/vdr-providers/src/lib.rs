//! # Visual Document Retrieval - Provider Implementations
//!
//! Adapters for the ports defined in `vdr-domain`. Embedding, vector store
//! and metadata providers register themselves into the linkme registries of
//! `vdr-application` and are selected by name from configuration.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Embedding | `EmbeddingProvider` | ColPali, Null |
//! | Vector Store | `VectorStoreProvider` | Qdrant, InMemory |
//! | Metadata | `MetadataStore` | Redis, InMemory |
//! | Rasterizer | `PdfRasterizer` | Pdfium, Unavailable |
//! | Vision | `VisionAnswerProvider` | Http |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! vdr-providers = { version = "0.1", default-features = false, features = ["metadata-redis"] }
//! ```

// Re-export vdr-domain types commonly used with providers
pub use vdr_domain::error::{Error, Result};
pub use vdr_domain::ports::providers::{
    EmbeddingProvider, MetadataStore, PdfRasterizer, VectorStoreProvider, VisionAnswerProvider,
};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Embedding provider implementations
pub mod embedding;

/// Vector store provider implementations
pub mod vector_store;

/// Metadata store implementations
pub mod metadata;

/// PDF rasterizers
pub mod rasterizer;

/// Vision answer providers
pub mod vision;

pub use embedding::{ColPaliEmbeddingProvider, NullEmbeddingProvider};
pub use metadata::InMemoryMetadataStore;
#[cfg(feature = "metadata-redis")]
pub use metadata::RedisMetadataStore;
#[cfg(feature = "rasterizer-pdfium")]
pub use rasterizer::PdfiumRasterizer;
pub use rasterizer::UnavailableRasterizer;
pub use vector_store::{InMemoryVectorStoreProvider, QdrantVectorStoreProvider};
pub use vision::HttpVisionProvider;
