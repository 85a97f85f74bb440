//! Domain layer constants
//!
//! Contains constants that are part of the domain logic and are used by
//! the application layer. Infrastructure-specific constants remain in
//! `vdr_infrastructure::constants`.

// ============================================================================
// INGESTION DOMAIN CONSTANTS
// ============================================================================

/// Resolution used to rasterize PDF pages
pub const RENDER_DPI: f32 = 300.0;

/// PDF user-space units per inch
pub const PDF_POINTS_PER_INCH: f32 = 72.0;

/// Infix used when naming rasterized PDF pages (`{stem}_page_{n}.png`)
pub const PAGE_FILE_INFIX: &str = "_page_";

/// Image extensions accepted as single artifacts and as ZIP entries
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

// ============================================================================
// INDEXING DOMAIN CONSTANTS
// ============================================================================

/// Default batch size for indexing operations
pub const INDEXING_BATCH_SIZE: usize = 10;

/// Default number of attempts for a batch upsert
pub const UPSERT_MAX_ATTEMPTS: u32 = 3;

/// First id assigned when a collection has no points yet
pub const DEFAULT_STARTING_ID: u64 = 0;

// ============================================================================
// SEARCH DOMAIN CONSTANTS
// ============================================================================

/// Default number of hits returned by a search
pub const DEFAULT_TOP_K: usize = 3;

// ============================================================================
// COLLECTION DOMAIN CONSTANTS
// ============================================================================

/// Default scalar quantization quantile
pub const DEFAULT_QUANTIZATION_QUANTILE: f32 = 0.99;

/// Default indexing threshold (points) before the store builds an ANN index
pub const DEFAULT_INDEXING_THRESHOLD: u64 = 10_000;
