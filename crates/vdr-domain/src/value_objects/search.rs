//! Search result value objects

use serde::{Deserialize, Serialize};

use super::metadata::MetadataRecord;
use super::point::PointPayload;

/// Ranked result of a similarity query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Point id
    pub id: u64,
    /// Similarity score (higher is better)
    pub score: f32,
    /// Stored payload
    pub payload: PointPayload,
}

/// A search hit joined with its auxiliary metadata record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedPage {
    /// The ranked hit
    pub hit: SearchHit,
    /// Metadata found for the hit's image path, if any
    pub metadata: Option<MetadataRecord>,
}

/// Outcome of a retrieval request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retrieval {
    /// Pages, highest similarity first
    pub pages: Vec<RetrievedPage>,
    /// Generated answer for the top page
    pub answer: Option<String>,
    /// Why answer generation failed, when it was requested
    pub answer_error: Option<String>,
}
