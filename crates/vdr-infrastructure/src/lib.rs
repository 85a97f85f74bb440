// Clippy allows for complex patterns in infrastructure code
#![allow(clippy::collapsible_if)]

//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns that support the application and domain layers.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment configuration (defaults, TOML, `VDR_` environment) |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Composition root building the [`AppContext`](bootstrap::AppContext) |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`constants`] | Centralized configuration constants |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::{AppContext, init_app};
pub use config::{AppConfig, ConfigBuilder, ConfigLoader};
pub use error_ext::ErrorContext;
