//! Provider Registry System
//!
//! Defines the auto-registration infrastructure for plugin providers.
//! Uses the `linkme` crate for compile-time registration of providers
//! that can be discovered and instantiated at runtime.
//!
//! ```text
//! 1. Provider defines:  #[linkme::distributed_slice(PROVIDERS)]
//!                       static ENTRY: ProviderEntry = ...
//! 2. Registry declares: #[linkme::distributed_slice]
//!                       pub static PROVIDERS: [Entry] = [..]
//! 3. Resolver queries:  PROVIDERS.iter()
//! 4. Config selects:    "provider = qdrant" → QdrantVectorStoreProvider
//! ```

pub mod embedding;
pub mod metadata;
pub mod vector_store;

pub use embedding::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry, list_embedding_providers,
    resolve_embedding_provider,
};
pub use metadata::{
    METADATA_STORES, MetadataStoreConfig, MetadataStoreEntry, list_metadata_stores,
    resolve_metadata_store,
};
pub use vector_store::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
    list_vector_store_providers, resolve_vector_store_provider,
};
