//! Application Layer - Visual Document Retrieval
//!
//! Use cases of the page-image retrieval pipeline, orchestrating the domain
//! ports without depending on any concrete adapter.
//!
//! ## Use Cases
//!
//! - Document ingestion (PDF, ZIP, single image → page images)
//! - Embedding generation behind a one-shot model lifecycle
//! - Batch indexing with bounded retries
//! - Similarity search and metadata-enriched retrieval
//! - Collection management
//!
//! ## Ports
//!
//! - `ports::services::*`: service interfaces consumed by the server
//! - `ports::registry::*`: linkme registries providers submit themselves to
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `vdr-domain`: value objects, errors and provider ports
//! - Pure Rust libraries for async, decoding and serialization

pub mod ports;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
