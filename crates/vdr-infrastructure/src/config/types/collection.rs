//! Collection policy configuration

use serde::{Deserialize, Serialize};
use vdr_domain::constants::DEFAULT_QUANTIZATION_QUANTILE;
use vdr_domain::value_objects::{
    CollectionPolicy, Distance, MultiVectorComparator, ScalarQuantization,
};

/// Scalar quantization settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantizationConfig {
    /// Quantize vectors to int8
    pub enabled: bool,
    /// Outlier clipping quantile
    pub quantile: f32,
    /// Keep quantized vectors in RAM
    pub always_ram: bool,
}

impl Default for QuantizationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            quantile: DEFAULT_QUANTIZATION_QUANTILE,
            always_ram: true,
        }
    }
}

/// Multi-vector comparison setting
///
/// `none` creates single-vector collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparatorSetting {
    /// Late-interaction max-sim
    #[default]
    MaxSim,
    /// Single pooled vectors
    None,
}

impl ComparatorSetting {
    fn comparator(self) -> Option<MultiVectorComparator> {
        match self {
            Self::MaxSim => Some(MultiVectorComparator::MaxSim),
            Self::None => None,
        }
    }
}

/// Policy applied to collections created through the API
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionDefaultsConfig {
    /// Distance metric
    pub distance: Distance,
    /// Multi-vector comparator
    pub multivector_comparator: ComparatorSetting,
    /// Scalar quantization
    pub quantization: QuantizationConfig,
    /// Keep payloads on disk
    pub on_disk_payload: bool,
}

impl Default for CollectionDefaultsConfig {
    fn default() -> Self {
        Self {
            distance: Distance::Cosine,
            multivector_comparator: ComparatorSetting::MaxSim,
            quantization: QuantizationConfig::default(),
            on_disk_payload: true,
        }
    }
}

impl CollectionDefaultsConfig {
    /// Domain policy
    pub fn to_policy(&self) -> CollectionPolicy {
        CollectionPolicy {
            distance: self.distance,
            multivector: self.multivector_comparator.comparator(),
            quantization: self.quantization.enabled.then_some(ScalarQuantization {
                quantile: self.quantization.quantile,
                always_ram: self.quantization.always_ram,
            }),
            on_disk_payload: self.on_disk_payload,
        }
    }
}
