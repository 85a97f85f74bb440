//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `vdr_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "vdr.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "vdr";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "VDR";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "VDR_LOG";

// ============================================================================
// HTTP SERVER CONSTANTS
// ============================================================================

/// Default HTTP server port
pub const DEFAULT_HTTP_PORT: u16 = 8000;

/// Default server host
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default maximum upload size in megabytes
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 200;

/// Default directory for staged uploads
pub const DEFAULT_STAGING_DIR: &str = "staging";

// ============================================================================
// PIPELINE CONSTANTS
// ============================================================================

/// Default collection name
pub const DEFAULT_COLLECTION: &str = "documents";

/// Default directory for rasterized page images
pub const DEFAULT_IMAGE_DIR: &str = "images";

// ============================================================================
// PROVIDER CONSTANTS
// ============================================================================

/// Default embedding provider
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "colpali";

/// Default vector store provider
pub const DEFAULT_VECTOR_STORE_PROVIDER: &str = "qdrant";

/// Default metadata store provider
pub const DEFAULT_METADATA_PROVIDER: &str = "redis";

/// Default vision host
pub const DEFAULT_VISION_BASE_URL: &str = "http://localhost:8002";

/// Providers reached over the network (need a URL)
pub const REMOTE_PROVIDERS: &[&str] = &["colpali", "qdrant", "redis"];

// ============================================================================
// RESILIENCE CONSTANTS
// ============================================================================

/// Initial backoff between upsert attempts in milliseconds
pub const DEFAULT_BACKOFF_INITIAL_MS: u64 = 100;

/// Maximum backoff between upsert attempts in milliseconds
pub const DEFAULT_BACKOFF_MAX_MS: u64 = 5_000;

/// Deadline for a single store call in seconds
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;

/// Deadline for a single model call in seconds
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";
