//! HTTP server configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_HTTP_PORT, DEFAULT_MAX_UPLOAD_MB, DEFAULT_SERVER_HOST, DEFAULT_STAGING_DIR,
};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Answer CORS preflights and add permissive CORS headers
    pub enable_cors: bool,
    /// Largest accepted upload in megabytes
    pub max_upload_mb: u64,
    /// Parent directory of per-upload staging directories
    pub staging_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            enable_cors: true,
            max_upload_mb: DEFAULT_MAX_UPLOAD_MB,
            staging_dir: PathBuf::from(DEFAULT_STAGING_DIR),
        }
    }
}

impl ServerConfig {
    /// Upload limit in bytes
    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }
}
