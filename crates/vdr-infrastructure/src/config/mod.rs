//! Configuration management
//!
//! Layered configuration: compiled defaults, a TOML file, then `VDR_`
//! environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader};
pub use types::*;
