//! Vector store provider implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`QdrantVectorStoreProvider`] | Qdrant REST API |
//! | [`InMemoryVectorStoreProvider`] | Exhaustive scan in process memory |

pub mod in_memory;
pub mod qdrant;

pub use in_memory::InMemoryVectorStoreProvider;
pub use qdrant::QdrantVectorStoreProvider;
