//! Provider Constants
//!
//! Constants specific to provider implementations. Domain defaults live in
//! `vdr_domain::constants`.

// ============================================================================
// EMBEDDING PROVIDER CONSTANTS
// ============================================================================

/// ColPali v1.2 per-token embedding dimension
pub const EMBEDDING_DIMENSION_COLPALI: usize = 128;

/// Default ColPali model identifier
pub const COLPALI_DEFAULT_MODEL: &str = "vidore/colpali-v1.2";

/// Default model server URL
pub const COLPALI_DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Model server route for query embeddings
pub const COLPALI_TEXT_ROUTE: &str = "get_text_embedding";

/// Model server route for page image embeddings
pub const COLPALI_IMAGE_ROUTE: &str = "get_image_embeddings";

/// Null embedding provider dimension (matches ColPali)
pub const EMBEDDING_DIMENSION_NULL: usize = 128;

/// Sub-vectors produced per item by the null provider in multi-vector mode
pub const NULL_MULTI_VECTOR_ROWS: usize = 4;

// ============================================================================
// VECTOR STORE CONSTANTS
// ============================================================================

/// Default Qdrant REST endpoint
pub const QDRANT_DEFAULT_URL: &str = "http://localhost:6333";

/// Header carrying the Qdrant API key
pub const QDRANT_API_KEY_HEADER: &str = "api-key";

/// Page size used when scrolling point ids
pub const QDRANT_SCROLL_PAGE_SIZE: usize = 1024;

// ============================================================================
// METADATA STORE CONSTANTS
// ============================================================================

/// Default Redis URL
pub const REDIS_DEFAULT_URL: &str = "redis://127.0.0.1:6379";

/// Default key namespace
pub const METADATA_DEFAULT_NAMESPACE: &str = "vdr";

// ============================================================================
// HTTP CONSTANTS
// ============================================================================

/// Default timeout for provider HTTP calls, in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 120;

/// Content-Type header value for JSON
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Vision host prediction route
pub const VISION_PREDICT_ROUTE: &str = "predict";

/// Default token budget for generated answers
pub const VISION_DEFAULT_MAX_NEW_TOKENS: u32 = 512;
