//! Collection Manager

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::VectorStoreProvider;
use vdr_domain::value_objects::{
    CollectionInfo, CollectionPolicy, CollectionSpec, validate_collection_name,
};

use super::resilience::with_timeout;
use crate::ports::services::CollectionServiceInterface;

/// Creates, deletes and lists vector collections
///
/// Vector size and indexing threshold are fixed at creation; changing them
/// means deleting and recreating the collection.
pub struct CollectionManager {
    store: Arc<dyn VectorStoreProvider>,
    policy: CollectionPolicy,
    timeout: Duration,
}

impl CollectionManager {
    /// Manager applying `policy` to every created collection
    pub fn new(
        store: Arc<dyn VectorStoreProvider>,
        policy: CollectionPolicy,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            policy,
            timeout,
        }
    }

    /// Policy applied on creation
    pub fn policy(&self) -> &CollectionPolicy {
        &self.policy
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        with_timeout(
            "collection_exists",
            self.timeout,
            self.store.collection_exists(name),
        )
        .await
    }
}

#[async_trait]
impl CollectionServiceInterface for CollectionManager {
    async fn create(
        &self,
        name: &str,
        vector_size: usize,
        indexing_threshold: u64,
    ) -> Result<CollectionSpec> {
        let spec =
            CollectionSpec::new(name, vector_size, indexing_threshold).with_policy(self.policy);
        spec.validate()?;

        if self.exists(name).await? {
            return Err(Error::collection_exists(name));
        }
        with_timeout(
            "create_collection",
            self.timeout,
            self.store.create_collection(&spec),
        )
        .await?;

        info!(
            collection = name,
            vector_size, indexing_threshold, "Collection created"
        );
        Ok(spec)
    }

    async fn delete(&self, name: &str) -> Result<()> {
        validate_collection_name(name)?;
        if !self.exists(name).await? {
            return Err(Error::collection_not_found(name));
        }
        with_timeout(
            "delete_collection",
            self.timeout,
            self.store.delete_collection(name),
        )
        .await?;
        info!(collection = name, "Collection deleted");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CollectionInfo>> {
        with_timeout(
            "list_collections",
            self.timeout,
            self.store.list_collections(),
        )
        .await
    }
}
