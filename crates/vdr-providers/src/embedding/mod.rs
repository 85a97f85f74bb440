//! Embedding provider implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`ColPaliEmbeddingProvider`] | Remote ColPali model server |
//! | [`NullEmbeddingProvider`] | Deterministic offline embeddings |

pub mod colpali;
pub mod null;

pub use colpali::ColPaliEmbeddingProvider;
pub use null::NullEmbeddingProvider;
