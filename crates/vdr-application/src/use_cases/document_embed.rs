//! Document Embed pipeline
//!
//! Upload path of the service: classify the artifact, then rasterize,
//! persist and index its pages batch by batch into the configured collection.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::VectorStoreProvider;
use vdr_domain::value_objects::{Artifact, ArtifactKind, IndexingReport, PageImage};

use super::indexing::BatchIndexer;
use super::ingestion::{DocumentIngestor, PageCursor, PageSequence};
use super::resilience::with_timeout;
use crate::ports::services::DocumentEmbedServiceInterface;

/// Outcome of embedding one artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEmbedReport {
    /// Content-derived artifact id
    pub artifact_id: String,
    /// Original file name
    pub artifact_name: String,
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Pages produced by ingestion
    pub pages: usize,
    /// Indexing outcome
    pub indexing: IndexingReport,
}

/// Ingest-then-index pipeline for one collection
///
/// Keeps a next-id ledger per collection, seeded from the store's highest
/// id on first use. Calls are serialized so id ranges never overlap.
/// Pages are rasterized, saved and indexed one batch at a time, so at most
/// one batch of bitmaps is held in memory.
pub struct DocumentEmbedService {
    ingestor: Arc<DocumentIngestor>,
    indexer: Arc<BatchIndexer>,
    store: Arc<dyn VectorStoreProvider>,
    collection: String,
    batch_size: usize,
    store_timeout: Duration,
    ledger: Mutex<HashMap<String, u64>>,
}

impl DocumentEmbedService {
    /// Create the pipeline
    pub fn new(
        ingestor: Arc<DocumentIngestor>,
        indexer: Arc<BatchIndexer>,
        store: Arc<dyn VectorStoreProvider>,
        collection: impl Into<String>,
        batch_size: usize,
        store_timeout: Duration,
    ) -> Self {
        Self {
            ingestor,
            indexer,
            store,
            collection: collection.into(),
            batch_size,
            store_timeout,
            ledger: Mutex::new(HashMap::new()),
        }
    }

    /// Collection pages are indexed into
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Batch indexer used by the pipeline
    pub fn indexer(&self) -> &Arc<BatchIndexer> {
        &self.indexer
    }

    /// Open the artifact's page sequence on a blocking thread
    async fn prepare(&self, artifact: Artifact) -> Result<PageCursor> {
        let ingestor = Arc::clone(&self.ingestor);
        tokio::task::spawn_blocking(move || {
            ingestor
                .ingest(artifact)
                .map(PageSequence::into_cursor)
        })
        .await
        .map_err(|e| Error::internal(format!("Ingestion task failed: {e}")))?
    }

    /// Rasterize and store the next batch of pages on a blocking thread
    async fn next_chunk(&self, mut cursor: PageCursor) -> Result<(PageCursor, Vec<PageImage>)> {
        let batch_size = self.batch_size;
        tokio::task::spawn_blocking(move || {
            let chunk = cursor.next_chunk(batch_size)?;
            for page in &chunk {
                page.save()?;
            }
            Ok::<_, Error>((cursor, chunk))
        })
        .await
        .map_err(|e| Error::internal(format!("Ingestion task failed: {e}")))?
    }

    async fn ensure_collection(&self, collection: &str) -> Result<()> {
        let exists = with_timeout(
            "collection_exists",
            self.store_timeout,
            self.store.collection_exists(collection),
        )
        .await?;
        if exists {
            Ok(())
        } else {
            Err(Error::collection_not_found(collection))
        }
    }

    async fn seed_id(&self, collection: &str) -> Result<u64> {
        with_timeout(
            "next_free_id",
            self.store_timeout,
            self.store.next_free_id(collection),
        )
        .await
    }
}

#[async_trait]
impl DocumentEmbedServiceInterface for DocumentEmbedService {
    async fn embed_file(&self, path: &Path, name: &str) -> Result<DocumentEmbedReport> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            Error::io_with_source(format!("Failed to read upload {}", path.display()), e)
        })?;
        self.embed_bytes(name, bytes).await
    }

    async fn embed_bytes(&self, name: &str, bytes: Vec<u8>) -> Result<DocumentEmbedReport> {
        if self.batch_size == 0 {
            return Err(Error::invalid_argument("batch_size must be at least 1"));
        }
        let artifact = Artifact::new(name, bytes)?;
        let artifact_id = artifact.id().to_string();
        let kind = artifact.kind();
        let collection = self.collection.as_str();

        // Nothing is rasterized or written for a missing collection.
        self.ensure_collection(collection).await?;
        let mut cursor = self.prepare(artifact).await?;

        let mut ledger = self.ledger.lock().await;
        let starting_id = match ledger.get(collection) {
            Some(next) => *next,
            None => self.seed_id(collection).await?,
        };

        let planned = cursor.remaining().div_ceil(self.batch_size);
        let mut indexing = self.indexer.begin(starting_id, planned);
        let mut pages = 0;
        let outcome = loop {
            let chunk = match self.next_chunk(cursor).await {
                Ok((next, chunk)) => {
                    cursor = next;
                    chunk
                }
                Err(e) => break Err(e),
            };
            if chunk.is_empty() {
                break Ok(());
            }
            pages += chunk.len();
            if let Err(e) = self
                .indexer
                .index_batch(&mut indexing, &chunk, collection, Some(name))
                .await
            {
                break Err(e);
            }
        };
        // Ids handed out are consumed even when the run stopped early.
        ledger.insert(collection.to_string(), indexing.next_id);
        drop(ledger);
        outcome?;

        if pages == 0 {
            return Err(Error::ingestion(format!("{name} contains no decodable pages")));
        }
        indexing.batches_total = indexing.batches_completed + indexing.skipped_batches.len();
        info!(artifact = name, kind = %kind, pages, "Artifact ingested");

        if indexing.batches_completed == 0 {
            let reason = indexing
                .skipped_batches
                .last()
                .map(|b| b.reason.clone())
                .unwrap_or_default();
            return Err(Error::store_transport(format!(
                "every batch of {name} failed to upsert: {reason}"
            )));
        }
        if indexing.has_skipped() {
            warn!(
                artifact = name,
                skipped = indexing.skipped_batches.len(),
                "Artifact partially indexed"
            );
        }

        Ok(DocumentEmbedReport {
            artifact_id,
            artifact_name: name.to_string(),
            kind,
            pages,
            indexing,
        })
    }
}
