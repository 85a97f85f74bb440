//! Server-specific constants
//!
//! Response messages and transport limits of the HTTP API.

// ============================================================================
// RESPONSE MESSAGES
// ============================================================================

/// Status returned after a successful upload
pub const EMBED_SUCCESS_MESSAGE: &str = "Document embedded successfully";

/// Health status when the model is ready
pub const HEALTH_STATUS_OK: &str = "ok";

/// Health status when the model is not ready
pub const HEALTH_STATUS_DEGRADED: &str = "degraded";

// ============================================================================
// TRANSPORT
// ============================================================================

/// Prefix of per-upload staging directories
pub const STAGING_DIR_PREFIX: &str = "vdr-upload-";

/// Largest accepted JSON body in bytes
pub const JSON_BODY_LIMIT_BYTES: u64 = 1024 * 1024;
