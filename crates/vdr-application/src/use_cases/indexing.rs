//! Batch Indexer
//!
//! Partitions page images into fixed-size batches, embeds each batch and
//! upserts it with a bounded retry policy. A batch that exhausts its
//! attempts is skipped and indexing moves on.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info};
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::VectorStoreProvider;
use vdr_domain::value_objects::{
    IndexedPoint, IndexingProgress, IndexingReport, PageImage, PointPayload, SkippedBatch,
};

use super::model::EmbeddingGenerator;
use super::resilience::{RetryPolicy, with_timeout};

/// Batch Indexer
///
/// Ids are assigned sequentially from `starting_id` within one call and the
/// next free id is returned in the report. Two calls targeting the same
/// collection must not share an id range; callers allocate ranges.
pub struct BatchIndexer {
    generator: Arc<EmbeddingGenerator>,
    store: Arc<dyn VectorStoreProvider>,
    retry: RetryPolicy,
    store_timeout: Duration,
    progress: watch::Sender<IndexingProgress>,
}

impl BatchIndexer {
    /// Create an indexer
    pub fn new(
        generator: Arc<EmbeddingGenerator>,
        store: Arc<dyn VectorStoreProvider>,
        retry: RetryPolicy,
        store_timeout: Duration,
    ) -> Self {
        let (progress, _) = watch::channel(IndexingProgress::default());
        Self {
            generator,
            store,
            retry,
            store_timeout,
            progress,
        }
    }

    /// Observe batch progress of the running (or last) call
    pub fn subscribe(&self) -> watch::Receiver<IndexingProgress> {
        self.progress.subscribe()
    }

    /// Latest progress snapshot
    pub fn progress(&self) -> IndexingProgress {
        *self.progress.borrow()
    }

    /// Index page images with payloads derived from the pages alone
    pub async fn index(
        &self,
        images: &[PageImage],
        collection: &str,
        batch_size: usize,
        starting_id: u64,
    ) -> Result<IndexingReport> {
        self.index_documents(images, collection, batch_size, starting_id, None)
            .await
    }

    /// Index page images, tagging every payload with the source artifact name
    ///
    /// Embedding failures abort the call; upsert failures only skip the batch.
    pub async fn index_documents(
        &self,
        images: &[PageImage],
        collection: &str,
        batch_size: usize,
        starting_id: u64,
        source: Option<&str>,
    ) -> Result<IndexingReport> {
        if batch_size == 0 {
            return Err(Error::invalid_argument("batch_size must be at least 1"));
        }

        let mut report = self.begin(starting_id, images.len().div_ceil(batch_size));
        for chunk in images.chunks(batch_size) {
            self.index_batch(&mut report, chunk, collection, source)
                .await?;
        }
        Ok(report)
    }

    /// Start a run of `total` batches whose first id is `starting_id`
    ///
    /// Feed the batches one by one to [`BatchIndexer::index_batch`]; used
    /// when pages are produced incrementally.
    pub fn begin(&self, starting_id: u64, total: usize) -> IndexingReport {
        self.progress
            .send_replace(IndexingProgress { completed: 0, total });
        IndexingReport {
            batches_total: total,
            starting_id,
            next_id: starting_id,
            ..Default::default()
        }
    }

    /// Embed and upsert one batch, recording the outcome in `report`
    ///
    /// The batch takes ids from `report.next_id` on. An embedding failure is
    /// returned; an upsert that exhausts its retries is recorded as skipped.
    pub async fn index_batch(
        &self,
        report: &mut IndexingReport,
        chunk: &[PageImage],
        collection: &str,
        source: Option<&str>,
    ) -> Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        let batch = report.batches_completed + report.skipped_batches.len();
        let vectors = self.generator.embed_images(chunk).await?;

        let first_id = report.next_id;
        let points: Vec<IndexedPoint> = chunk
            .iter()
            .zip(vectors)
            .zip(first_id..)
            .map(|((page, vector), id)| {
                let payload = PointPayload::for_page(page);
                IndexedPoint {
                    id,
                    vector,
                    payload: match source {
                        Some(source) => payload.with_source(source),
                        None => payload,
                    },
                }
            })
            .collect();
        let count = points.len() as u64;
        report.next_id = first_id + count;

        let batch_points = points.as_slice();
        let upsert = self
            .retry
            .run("upsert_points", |_| {
                with_timeout(
                    "upsert_points",
                    self.store_timeout,
                    self.store.upsert_points(collection, batch_points),
                )
            })
            .await;

        match upsert {
            Ok(()) => {
                report.batches_completed += 1;
                report.points_indexed += points.len();
            }
            Err(e) => {
                error!(
                    collection,
                    batch,
                    first_id,
                    last_id = report.next_id - 1,
                    error = %e,
                    "Skipping batch after exhausting upsert attempts"
                );
                report.skipped_batches.push(SkippedBatch {
                    batch,
                    first_id,
                    last_id: report.next_id - 1,
                    reason: e.to_string(),
                });
            }
        }

        let progress = IndexingProgress {
            completed: batch + 1,
            total: report.batches_total.max(batch + 1),
        };
        self.progress.send_replace(progress);
        info!(
            collection,
            completed = progress.completed,
            total = progress.total,
            "Indexing progress"
        );
        Ok(())
    }
}
