//! Redis metadata store
//!
//! Read-only lookups of JSON documents stored under `{namespace}:{key}`.
//! Values that are not JSON are returned as `{"content": <base64>}` so binary
//! attachments survive the trip.
//!
//! ## Example
//!
//! ```ignore
//! use vdr_providers::metadata::RedisMetadataStore;
//!
//! let store = RedisMetadataStore::new("redis://localhost:6379", "books")?;
//! let record = store.lookup("images/algebra_page_3.png").await?;
//! ```

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use serde_json::{Value, json};
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::MetadataStore;
use vdr_domain::value_objects::MetadataRecord;

/// Redis metadata store
#[derive(Clone)]
pub struct RedisMetadataStore {
    client: Client,
    namespace: String,
}

impl RedisMetadataStore {
    /// Create a store for `connection_string` with the given key namespace
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `namespace` - Key prefix; empty for none
    pub fn new(connection_string: &str, namespace: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::store_transport_with_source("Failed to create Redis client", e)
        })?;
        Ok(Self {
            client,
            namespace: namespace.to_string(),
        })
    }

    /// Full Redis key for a lookup key
    pub fn namespaced_key(&self, key: &str) -> String {
        if self.namespace.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.namespace, key)
        }
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::store_transport_with_source("Failed to get Redis connection", e))
    }
}

/// Parse a stored value as JSON, wrapping anything else as base64 content
fn decode_document(raw: &[u8]) -> Value {
    match serde_json::from_slice::<Value>(raw) {
        Ok(document) => document,
        Err(_) => json!({ "content": STANDARD.encode(raw) }),
    }
}

#[async_trait]
impl MetadataStore for RedisMetadataStore {
    async fn lookup(&self, key: &str) -> Result<MetadataRecord> {
        let mut conn = self.get_connection().await?;
        let full_key = self.namespaced_key(key);

        match conn.get::<_, Option<Vec<u8>>>(&full_key).await {
            Ok(Some(raw)) => Ok(MetadataRecord::new(key, decode_document(&raw))),
            Ok(None) => Err(Error::not_found(format!("metadata record '{full_key}'"))),
            Err(e) => Err(Error::store_transport_with_source("Redis GET failed", e)),
        }
    }

    fn provider_name(&self) -> &str {
        "redis"
    }

    async fn health_check(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;
        redis::cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| Error::store_transport_with_source("Redis PING failed", e))
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use std::sync::Arc;

use vdr_application::ports::registry::{METADATA_STORES, MetadataStoreConfig, MetadataStoreEntry};

use crate::constants::{METADATA_DEFAULT_NAMESPACE, REDIS_DEFAULT_URL};

fn redis_factory(
    config: &MetadataStoreConfig,
) -> std::result::Result<Arc<dyn MetadataStore>, String> {
    let url = config.url.as_deref().unwrap_or(REDIS_DEFAULT_URL);
    let namespace = config
        .namespace
        .as_deref()
        .unwrap_or(METADATA_DEFAULT_NAMESPACE);
    RedisMetadataStore::new(url, namespace)
        .map(|s| Arc::new(s) as Arc<dyn MetadataStore>)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(METADATA_STORES)]
static REDIS_METADATA_STORE: MetadataStoreEntry = MetadataStoreEntry {
    name: "redis",
    description: "Redis keyed JSON documents",
    factory: redis_factory,
};
