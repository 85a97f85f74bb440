//! Vector collection configuration and descriptors

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_QUANTIZATION_QUANTILE;
use crate::error::{Error, Result};

/// Distance metric of a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// Cosine similarity
    #[default]
    Cosine,
    /// Dot product
    Dot,
    /// Euclidean distance
    Euclid,
}

/// How multi-vectors are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiVectorComparator {
    /// Sum over query sub-vectors of the best matching document sub-vector
    #[default]
    MaxSim,
}

/// Int8 scalar quantization settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarQuantization {
    /// Quantile used to clip outliers before quantizing
    pub quantile: f32,
    /// Keep quantized vectors in RAM
    pub always_ram: bool,
}

impl Default for ScalarQuantization {
    fn default() -> Self {
        Self {
            quantile: DEFAULT_QUANTIZATION_QUANTILE,
            always_ram: true,
        }
    }
}

/// Store-side policy applied to every new collection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollectionPolicy {
    /// Distance metric
    pub distance: Distance,
    /// Multi-vector comparator; `None` stores single vectors
    pub multivector: Option<MultiVectorComparator>,
    /// Scalar quantization; `None` disables it
    pub quantization: Option<ScalarQuantization>,
    /// Keep payloads on disk
    pub on_disk_payload: bool,
}

impl Default for CollectionPolicy {
    fn default() -> Self {
        Self {
            distance: Distance::Cosine,
            multivector: Some(MultiVectorComparator::MaxSim),
            quantization: Some(ScalarQuantization::default()),
            on_disk_payload: true,
        }
    }
}

/// Full description of a collection to create
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSpec {
    /// Collection name
    pub name: String,
    /// Dimensionality of every (sub-)vector
    pub vector_size: usize,
    /// Point count before the store builds an approximate index
    pub indexing_threshold: u64,
    /// Store policy
    pub policy: CollectionPolicy,
}

impl CollectionSpec {
    /// Spec with the default policy
    pub fn new(name: impl Into<String>, vector_size: usize, indexing_threshold: u64) -> Self {
        Self {
            name: name.into(),
            vector_size,
            indexing_threshold,
            policy: CollectionPolicy::default(),
        }
    }

    /// Replace the policy
    pub fn with_policy(mut self, policy: CollectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reject empty names, zero sizes and out-of-range quantiles
    pub fn validate(&self) -> Result<()> {
        validate_collection_name(&self.name)?;
        if self.vector_size == 0 {
            return Err(Error::invalid_argument("vector_size must be greater than 0"));
        }
        if let Some(q) = &self.policy.quantization {
            if !(q.quantile > 0.5 && q.quantile <= 1.0) {
                return Err(Error::invalid_argument(format!(
                    "quantization quantile {} must be in (0.5, 1.0]",
                    q.quantile
                )));
            }
        }
        Ok(())
    }
}

/// Reject names the store cannot address
pub fn validate_collection_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_argument("collection name must not be empty"));
    }
    if name.contains('/') || name.chars().any(char::is_control) {
        return Err(Error::invalid_argument(format!(
            "collection name '{name}' contains invalid characters"
        )));
    }
    Ok(())
}

/// Descriptor returned when listing collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Collection name
    pub name: String,
    /// Number of stored points, when the store reports it
    pub points_count: Option<u64>,
    /// Declared vector size, when the store reports it
    pub vector_size: Option<usize>,
    /// Name of the backing provider
    pub provider: String,
}

impl CollectionInfo {
    /// Create a descriptor
    pub fn new(
        name: impl Into<String>,
        points_count: Option<u64>,
        vector_size: Option<usize>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            points_count,
            vector_size,
            provider: provider.into(),
        }
    }
}
