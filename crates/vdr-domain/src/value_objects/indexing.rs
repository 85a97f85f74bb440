//! Indexing progress and reports

use serde::{Deserialize, Serialize};

/// Batches completed out of the batches planned for one `index` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingProgress {
    /// Batches handled so far (upserted or skipped)
    pub completed: usize,
    /// Total number of batches
    pub total: usize,
}

impl IndexingProgress {
    /// Whether every batch has been handled
    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }
}

/// A batch whose upsert exhausted its retries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedBatch {
    /// 0-based batch position
    pub batch: usize,
    /// First id of the batch
    pub first_id: u64,
    /// Last id of the batch (inclusive)
    pub last_id: u64,
    /// Last error message
    pub reason: String,
}

/// Result of one `index` call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingReport {
    /// Total number of batches
    pub batches_total: usize,
    /// Batches successfully submitted
    pub batches_completed: usize,
    /// Batches skipped after exhausting retries
    pub skipped_batches: Vec<SkippedBatch>,
    /// Points successfully submitted
    pub points_indexed: usize,
    /// First id of this call
    pub starting_id: u64,
    /// Next free id; pass it as `starting_id` of the following call
    pub next_id: u64,
}

impl IndexingReport {
    /// Whether at least one batch was skipped
    pub fn has_skipped(&self) -> bool {
        !self.skipped_batches.is_empty()
    }
}
