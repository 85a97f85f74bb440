//! Pipeline configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use vdr_domain::constants::{DEFAULT_TOP_K, INDEXING_BATCH_SIZE, RENDER_DPI};

use crate::constants::{DEFAULT_COLLECTION, DEFAULT_IMAGE_DIR};

/// Ingestion, indexing and retrieval settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Collection uploads are indexed into and queries run against
    pub collection: String,
    /// Points per upsert batch
    pub batch_size: usize,
    /// Hits returned when a request does not say otherwise
    pub top_k: usize,
    /// Directory rasterized pages are written to
    pub image_dir: PathBuf,
    /// PDF rendering resolution
    pub render_dpi: f32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            batch_size: INDEXING_BATCH_SIZE,
            top_k: DEFAULT_TOP_K,
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            render_dpi: RENDER_DPI,
        }
    }
}
