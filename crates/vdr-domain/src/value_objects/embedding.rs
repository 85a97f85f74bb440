//! Embedding vectors

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Dense representation of a page image or a query
///
/// Either one pooled vector or an ordered sequence of vectors (one per patch
/// or token) of identical dimensionality.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingVector {
    /// Single pooled vector
    Single(Vec<f32>),
    /// Multi-vector (late interaction)
    Multi(Vec<Vec<f32>>),
}

impl EmbeddingVector {
    /// Dimensionality of each sub-vector (0 when empty)
    pub fn dimensions(&self) -> usize {
        match self {
            Self::Single(v) => v.len(),
            Self::Multi(rows) => rows.first().map_or(0, Vec::len),
        }
    }

    /// Whether this is a multi-vector
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Multi(_))
    }

    /// Number of sub-vectors (1 for a single vector)
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Multi(rows) => rows.len(),
        }
    }

    /// Whether there is no component at all
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(v) => v.is_empty(),
            Self::Multi(rows) => rows.iter().all(Vec::is_empty),
        }
    }

    /// Borrow the sub-vectors
    pub fn rows(&self) -> Vec<&[f32]> {
        match self {
            Self::Single(v) => vec![v.as_slice()],
            Self::Multi(rows) => rows.iter().map(Vec::as_slice).collect(),
        }
    }

    /// Check that every sub-vector has exactly `dimensions` components
    pub fn ensure_dimensions(&self, dimensions: usize) -> Result<()> {
        if self.is_empty() {
            return Err(Error::embedding_inference("Embedding is empty"));
        }
        match self.rows().iter().find(|row| row.len() != dimensions) {
            Some(row) => Err(Error::embedding_inference(format!(
                "Embedding dimensionality {} does not match expected {}",
                row.len(),
                dimensions
            ))),
            None => Ok(()),
        }
    }
}

impl From<Vec<f32>> for EmbeddingVector {
    fn from(vector: Vec<f32>) -> Self {
        Self::Single(vector)
    }
}

impl From<Vec<Vec<f32>>> for EmbeddingVector {
    fn from(rows: Vec<Vec<f32>>) -> Self {
        Self::Multi(rows)
    }
}
