//! # Visual Document Retrieval Server
//!
//! HTTP API over the document embedding and retrieval pipeline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vdr_server::run;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Defaults, then vdr.toml, then VDR_ environment variables
//!     run(None).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`transport`] | Rocket server, CORS fairing and body limits |
//! | [`handlers`] | Route handlers |
//! | [`models`] | Request and response bodies |
//! | [`error`] | Domain error to HTTP status mapping |
//! | [`staging`] | Per-upload staging directories |
//!
//! ## Feature Flags
//!
//! - `pdfium`: rasterize PDF uploads with libpdfium (default)

pub mod constants;
pub mod error;
pub mod handlers;
pub mod init;
pub mod models;
pub mod staging;
pub mod transport;

pub use init::run;
pub use transport::{HttpTransport, HttpTransportConfig};
