//! Provider ports
//!
//! Interfaces implemented by the adapters in `vdr-providers`.

pub mod embedding;
pub mod metadata;
pub mod rasterizer;
pub mod vector_store;
pub mod vision;

pub use embedding::{EmbeddingProvider, READINESS_QUERY};
pub use metadata::MetadataStore;
pub use rasterizer::PdfRasterizer;
pub use vector_store::{VectorStoreAdmin, VectorStoreProvider};
pub use vision::VisionAnswerProvider;
