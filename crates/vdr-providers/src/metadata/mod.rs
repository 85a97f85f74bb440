//! Metadata store implementations
//!
//! | Provider | Description |
//! |----------|-------------|
//! | [`RedisMetadataStore`] | Redis keyed JSON documents |
//! | [`InMemoryMetadataStore`] | Process-local map |

pub mod in_memory;
#[cfg(feature = "metadata-redis")]
pub mod redis;

pub use in_memory::InMemoryMetadataStore;
#[cfg(feature = "metadata-redis")]
pub use self::redis::RedisMetadataStore;
