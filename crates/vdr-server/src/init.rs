//! Server Initialization
//!
//! Loads configuration, sets up logging, wires the services through
//! [`init_app`] and starts the HTTP transport. A model that cannot be loaded
//! or a store that cannot be reached aborts startup.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use vdr_infrastructure::config::{AppConfig, ConfigLoader};
use vdr_infrastructure::init_app;
use vdr_infrastructure::logging::{init_logging, log_config_loaded};

use crate::transport::http::{HttpTransport, HttpTransportConfig};

/// Run the Visual Document Retrieval server
///
/// This is the main entry point that initializes all components and starts the server.
pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    init_logging(config.logging.clone())?;
    if let Some(path) = config_path {
        log_config_loaded(path, true);
    }

    info!(
        host = %config.server.host,
        port = config.server.port,
        collection = %config.pipeline.collection,
        "Starting Visual Document Retrieval server"
    );

    let http_config = HttpTransportConfig::from(&config.server);
    let context = init_app(config).await?;
    info!(context = ?context, "Services initialized");

    HttpTransport::new(http_config, Arc::new(context))
        .start()
        .await
        .map_err(|e| -> Box<dyn std::error::Error> { e })
}

/// Load configuration from optional path
fn load_config(config_path: Option<&Path>) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    Ok(loader.load()?)
}
