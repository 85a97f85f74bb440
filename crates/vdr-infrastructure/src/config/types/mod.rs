//! Configuration types module

pub mod app;
pub mod collection;
pub mod logging;
pub mod pipeline;
pub mod providers;
pub mod resilience;
pub mod server;

// Re-export main types
pub use app::AppConfig;
pub use collection::{CollectionDefaultsConfig, ComparatorSetting, QuantizationConfig};
pub use logging::LoggingConfig;
pub use pipeline::PipelineConfig;
pub use providers::{
    EmbeddingSettings, MetadataSettings, ProvidersConfig, VectorStoreSettings, VisionSettings,
};
pub use resilience::ResilienceConfig;
pub use server::ServerConfig;
