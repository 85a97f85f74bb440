//! HTTP Transport
//!
//! Serves the document API, the page images and the web UI with Rocket.
//!
//! # Example
//!
//! ```text
//! POST /document_retrieval HTTP/1.1
//! Content-Type: application/json
//!
//! {"user_query": "photosynthesis diagram", "top_k": 3}
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::Header;
use rocket::{Build, Request, Response, Rocket};
use tracing::info;
use vdr_infrastructure::AppContext;
use vdr_infrastructure::config::ServerConfig;
use vdr_infrastructure::constants::{DEFAULT_HTTP_PORT, DEFAULT_SERVER_HOST};

use crate::constants::JSON_BODY_LIMIT_BYTES;
use crate::handlers::{api_catchers, api_routes};

/// HTTP transport configuration
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Enable CORS for browser access
    pub enable_cors: bool,
    /// Largest accepted upload in bytes
    pub max_upload_bytes: u64,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for HttpTransportConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            host: server.host.clone(),
            port: server.port,
            enable_cors: server.enable_cors,
            max_upload_bytes: server.max_upload_bytes(),
        }
    }
}

impl HttpTransportConfig {
    /// Create config for localhost with specified port
    pub fn localhost(port: u16) -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port,
            ..Self::default()
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], DEFAULT_HTTP_PORT)))
    }

    /// Body limits for uploads and JSON requests
    pub fn limits(&self) -> Limits {
        let upload = self.max_upload_bytes.bytes();
        Limits::default()
            .limit("file", upload)
            .limit("data-form", upload)
            .limit("json", JSON_BODY_LIMIT_BYTES.bytes())
    }
}

/// Shared state handed to every handler
#[derive(Clone)]
pub struct ApiState {
    /// Wired services
    pub context: Arc<AppContext>,
}

/// HTTP transport server
pub struct HttpTransport {
    config: HttpTransportConfig,
    state: ApiState,
}

impl HttpTransport {
    /// Create a new HTTP transport
    pub fn new(config: HttpTransportConfig, context: Arc<AppContext>) -> Self {
        Self {
            config,
            state: ApiState { context },
        }
    }

    fn figment(&self) -> Figment {
        rocket::Config::figment().merge(("limits", self.config.limits()))
    }

    /// Build the Rocket application
    pub fn rocket(&self) -> Rocket<Build> {
        let mut rocket = rocket::custom(self.figment())
            .manage(self.state.clone())
            .mount("/", api_routes())
            .register("/", api_catchers());

        if self.config.enable_cors {
            rocket = rocket.attach(Cors);
        }

        rocket
    }

    /// Start the HTTP transport server
    pub async fn start(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.socket_addr();
        info!("HTTP transport listening on {}", addr);

        let figment = self
            .figment()
            .merge(("address", self.config.host.clone()))
            .merge(("port", self.config.port));

        let rocket = self.rocket().configure(figment);

        rocket
            .launch()
            .await
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)?;

        Ok(())
    }
}

/// CORS Fairing for Rocket
///
/// Adds CORS headers to all responses to allow browser access.
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "CORS Headers",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}
