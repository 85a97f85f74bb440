//! Shared helpers: an offline server over temporary directories

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::{Value, json};
use tempfile::TempDir;
use vdr_application::ports::registry::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};
use vdr_domain::error::Result;
use vdr_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vdr_domain::value_objects::{
    CollectionInfo, CollectionSpec, EmbeddingVector, IndexedPoint, SearchHit,
};
use vdr_infrastructure::config::{
    ConfigBuilder, PipelineConfig, ResilienceConfig, ServerConfig, VectorStoreSettings,
};
use vdr_infrastructure::{AppContext, init_app};
use vdr_providers::vector_store::InMemoryVectorStoreProvider;
use vdr_server::{HttpTransport, HttpTransportConfig};

/// Collection used by the offline server
pub const COLLECTION: &str = "pages";

const BOUNDARY: &str = "vdr-test-boundary";

/// Offline server with its scratch directory
pub struct TestServer {
    pub client: Client,
    pub context: Arc<AppContext>,
    pub dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(|builder| builder).await
    }

    /// Offline server whose vector store queries outlast the store deadline
    pub async fn with_stalled_store() -> Self {
        Self::start_with(|builder| {
            builder
                .with_vector_store(VectorStoreSettings {
                    provider: STALLED_STORE.to_string(),
                    url: None,
                    api_key: None,
                })
                .with_resilience(ResilienceConfig {
                    store_timeout_secs: 1,
                    ..ResilienceConfig::default()
                })
        })
        .await
    }

    async fn start_with(customize: impl FnOnce(ConfigBuilder) -> ConfigBuilder) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let builder = ConfigBuilder::new()
            .offline()
            .with_server(ServerConfig {
                staging_dir: dir.path().join("staging"),
                ..ServerConfig::default()
            })
            .with_pipeline(PipelineConfig {
                collection: COLLECTION.to_string(),
                image_dir: dir.path().join("images"),
                ..PipelineConfig::default()
            });
        let config = customize(builder).build();

        let http_config = HttpTransportConfig::from(&config.server);
        let context = Arc::new(init_app(config).await.expect("offline context"));
        let transport = HttpTransport::new(http_config, context.clone());
        let client = Client::tracked(transport.rocket())
            .await
            .expect("valid rocket instance");

        Self {
            client,
            context,
            dir,
        }
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.dir.path().join("staging")
    }

    /// Number of leftover entries under the staging root
    pub fn staged_entries(&self) -> usize {
        std::fs::read_dir(self.staging_dir())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (Status, Value) {
        let response = self
            .client
            .post(uri)
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch()
            .await;
        let status = response.status();
        let body = response.into_json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn upload(&self, file_name: &str, bytes: &[u8]) -> (Status, Value) {
        let (content_type, body) = multipart(file_name, bytes);
        let response = self
            .client
            .post("/document_embed")
            .header(content_type)
            .body(body)
            .dispatch()
            .await;
        let status = response.status();
        let body = response.into_json::<Value>().await.unwrap_or(Value::Null);
        (status, body)
    }

    pub async fn create_default_collection(&self) {
        let (status, _) = self
            .post_json(
                "/create_qdrant_collection",
                json!({
                    "collection_name": COLLECTION,
                    "vector_size": self.context.generator().dimensions(),
                    "indexing_threshold": 100,
                }),
            )
            .await;
        assert_eq!(status, Status::Ok);
    }
}

/// A small solid PNG
pub fn png(color: [u8; 3]) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb(color)))
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("encode png");
    buffer.into_inner()
}

/// A multipart body with one `file` field
pub fn multipart(file_name: &str, bytes: &[u8]) -> (ContentType, Vec<u8>) {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let content_type =
        ContentType::new("multipart", "form-data").with_params(("boundary", BOUNDARY));
    (content_type, body)
}

/// Registry name of [`StalledStore`]
pub const STALLED_STORE: &str = "stalled-memory";

/// How long a [`StalledStore`] query hangs
const STALL: Duration = Duration::from_secs(3);

/// Memory store whose queries hang for [`STALL`]
struct StalledStore {
    inner: InMemoryVectorStoreProvider,
}

#[async_trait]
impl VectorStoreAdmin for StalledStore {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        self.inner.collection_exists(name).await
    }

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        self.inner.list_collections().await
    }

    async fn count_points(&self, collection: &str) -> Result<u64> {
        self.inner.count_points(collection).await
    }

    async fn next_free_id(&self, collection: &str) -> Result<u64> {
        self.inner.next_free_id(collection).await
    }

    fn provider_name(&self) -> &str {
        STALLED_STORE
    }
}

#[async_trait]
impl VectorStoreProvider for StalledStore {
    async fn create_collection(&self, spec: &CollectionSpec) -> Result<()> {
        self.inner.create_collection(spec).await
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        self.inner.delete_collection(name).await
    }

    async fn upsert_points(&self, collection: &str, points: &[IndexedPoint]) -> Result<()> {
        self.inner.upsert_points(collection, points).await
    }

    async fn query_points(
        &self,
        collection: &str,
        query: &EmbeddingVector,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        tokio::time::sleep(STALL).await;
        self.inner.query_points(collection, query, limit).await
    }
}

fn stalled_factory(
    _config: &VectorStoreProviderConfig,
) -> std::result::Result<Arc<dyn VectorStoreProvider>, String> {
    Ok(Arc::new(StalledStore {
        inner: InMemoryVectorStoreProvider::new(),
    }))
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static STALLED_PROVIDER: VectorStoreProviderEntry = VectorStoreProviderEntry {
    name: STALLED_STORE,
    description: "Memory store with stalled queries (tests)",
    factory: stalled_factory,
};
