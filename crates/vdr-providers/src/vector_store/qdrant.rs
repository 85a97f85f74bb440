//! Qdrant vector store provider
//!
//! REST client for a Qdrant server. Collections are created as
//! multi-vector collections with a configurable comparator and scalar
//! quantization; upserts are sent without waiting for indexing.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};
use vdr_domain::error::{Error, Result};
use vdr_domain::ports::providers::{VectorStoreAdmin, VectorStoreProvider};
use vdr_domain::value_objects::{
    CollectionInfo, CollectionSpec, Distance, EmbeddingVector, IndexedPoint, MultiVectorComparator,
    PointPayload, SearchHit,
};

use crate::constants::{
    DEFAULT_HTTP_TIMEOUT_SECS, QDRANT_API_KEY_HEADER, QDRANT_DEFAULT_URL, QDRANT_SCROLL_PAGE_SIZE,
};
use crate::utils::{HttpResponseUtils, JsonExt, ProviderErrorKind};

const PROVIDER: &str = "Qdrant";

/// Qdrant vector store provider
pub struct QdrantVectorStoreProvider {
    base_url: String,
    timeout: Duration,
    http_client: Client,
}

impl QdrantVectorStoreProvider {
    /// Create a provider for the server at `base_url`
    ///
    /// The API key, when given, is sent as the `api-key` header.
    pub fn new(base_url: &str, api_key: Option<&str>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key.map(str::trim).filter(|k| !k.is_empty()) {
            let value = HeaderValue::from_str(key)
                .map_err(|e| Error::configuration_with_source("Invalid Qdrant API key", e))?;
            headers.insert(QDRANT_API_KEY_HEADER, value);
        }
        let http_client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::configuration_with_source("Failed to build Qdrant client", e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn transport(&self, operation: &str) -> impl Fn(reqwest::Error) -> Error + '_ {
        let operation = operation.to_string();
        move |e| {
            HttpResponseUtils::request_error(e, &operation, self.timeout, ProviderErrorKind::Store)
        }
    }

    /// Map 404 to `CollectionNotFound`, then apply the common status checks
    async fn check(response: Response, collection: &str) -> Result<Response> {
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::collection_not_found(collection));
        }
        HttpResponseUtils::check_status(response, PROVIDER, ProviderErrorKind::Store).await
    }

    async fn parse(response: Response, collection: &str) -> Result<Value> {
        let response = Self::check(response, collection).await?;
        response.json().await.map_err(|e| {
            Error::store_transport_with_source(format!("{PROVIDER} response parse failed"), e)
        })
    }

    async fn collection_details(&self, name: &str) -> Result<Value> {
        let response = self
            .http_client
            .get(self.url(&format!("collections/{name}")))
            .send()
            .await
            .map_err(self.transport("get_collection"))?;
        Self::parse(response, name).await
    }
}

/// Request body for collection creation
pub fn collection_body(spec: &CollectionSpec) -> Value {
    let policy = &spec.policy;
    let mut vectors = json!({
        "size": spec.vector_size,
        "distance": match policy.distance {
            Distance::Cosine => "Cosine",
            Distance::Dot => "Dot",
            Distance::Euclid => "Euclid",
        },
    });
    if let Some(MultiVectorComparator::MaxSim) = policy.multivector {
        vectors["multivector_config"] = json!({ "comparator": "max_sim" });
    }

    let mut body = json!({
        "vectors": vectors,
        "optimizers_config": { "indexing_threshold": spec.indexing_threshold },
        "on_disk_payload": policy.on_disk_payload,
    });
    if let Some(q) = &policy.quantization {
        body["quantization_config"] = json!({
            "scalar": {
                "type": "int8",
                "quantile": q.quantile,
                "always_ram": q.always_ram,
            }
        });
    }
    body
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: QueryResult,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    #[serde(default)]
    points: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    id: Value,
    score: f32,
    #[serde(default)]
    payload: Option<PointPayload>,
}

#[derive(Debug, Deserialize)]
struct ScrollResponse {
    result: ScrollResult,
}

#[derive(Debug, Deserialize)]
struct ScrollResult {
    #[serde(default)]
    points: Vec<ScrolledPoint>,
    #[serde(default)]
    next_page_offset: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ScrolledPoint {
    id: Value,
}

/// Convert a scored point, skipping ids that are not integers
fn into_hit(point: ScoredPoint) -> Option<SearchHit> {
    let Some(id) = point.id.as_u64() else {
        warn!(id = %point.id, "Ignoring point with non-integer id");
        return None;
    };
    Some(SearchHit {
        id,
        score: point.score,
        payload: point.payload.unwrap_or_default(),
    })
}

#[async_trait]
impl VectorStoreAdmin for QdrantVectorStoreProvider {
    async fn collection_exists(&self, name: &str) -> Result<bool> {
        let response = self
            .http_client
            .get(self.url(&format!("collections/{name}/exists")))
            .send()
            .await
            .map_err(self.transport("collection_exists"))?;
        let body =
            HttpResponseUtils::check_and_parse(response, PROVIDER, ProviderErrorKind::Store)
                .await?;
        Ok(body
            .at_path("result/exists")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        let response = self
            .http_client
            .get(self.url("collections"))
            .send()
            .await
            .map_err(self.transport("list_collections"))?;
        let body =
            HttpResponseUtils::check_and_parse(response, PROVIDER, ProviderErrorKind::Store)
                .await?;

        let names: Vec<String> = body
            .at_path("result/collections")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|c| c.opt_str("name").map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        let mut infos = Vec::with_capacity(names.len());
        for name in names {
            // Statistics are best effort; the name alone is still listed.
            let (points_count, vector_size) = match self.collection_details(&name).await {
                Ok(details) => (
                    details.at_path("result/points_count").and_then(Value::as_u64),
                    details
                        .at_path("result/config/params/vectors/size")
                        .and_then(Value::as_u64)
                        .and_then(|s| usize::try_from(s).ok()),
                ),
                Err(e) => {
                    debug!(collection = %name, error = %e, "Collection details unavailable");
                    (None, None)
                }
            };
            infos.push(CollectionInfo::new(
                name,
                points_count,
                vector_size,
                self.provider_name(),
            ));
        }
        Ok(infos)
    }

    async fn count_points(&self, collection: &str) -> Result<u64> {
        let response = self
            .http_client
            .post(self.url(&format!("collections/{collection}/points/count")))
            .json(&json!({ "exact": true }))
            .send()
            .await
            .map_err(self.transport("count_points"))?;
        let body = Self::parse(response, collection).await?;
        body.at_path("result/count")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::store_transport(format!("{PROVIDER} count response missing")))
    }

    // Scans every id page; non-integer ids are ignored.
    async fn next_free_id(&self, collection: &str) -> Result<u64> {
        let mut next = 0u64;
        let mut offset: Option<Value> = None;
        loop {
            let mut request = json!({
                "limit": QDRANT_SCROLL_PAGE_SIZE,
                "with_payload": false,
                "with_vector": false,
            });
            if let Some(offset) = offset.take() {
                request["offset"] = offset;
            }
            let response = self
                .http_client
                .post(self.url(&format!("collections/{collection}/points/scroll")))
                .json(&request)
                .send()
                .await
                .map_err(self.transport("scroll_points"))?;
            let body = Self::parse(response, collection).await?;
            let page: ScrollResponse = serde_json::from_value(body).map_err(|e| {
                Error::store_transport_with_source(format!("{PROVIDER} scroll response malformed"), e)
            })?;

            if let Some(max) = page.result.points.iter().filter_map(|p| p.id.as_u64()).max() {
                next = next.max(max + 1);
            }
            match page.result.next_page_offset {
                Some(Value::Null) | None => return Ok(next),
                Some(value) => offset = Some(value),
            }
        }
    }

    fn provider_name(&self) -> &str {
        "qdrant"
    }
}

#[async_trait]
impl VectorStoreProvider for QdrantVectorStoreProvider {
    async fn create_collection(&self, spec: &CollectionSpec) -> Result<()> {
        let response = self
            .http_client
            .put(self.url(&format!("collections/{}", spec.name)))
            .json(&collection_body(spec))
            .send()
            .await
            .map_err(self.transport("create_collection"))?;
        if response.status() == StatusCode::CONFLICT {
            return Err(Error::collection_exists(&spec.name));
        }
        HttpResponseUtils::check_status(response, PROVIDER, ProviderErrorKind::Store).await?;
        Ok(())
    }

    async fn delete_collection(&self, name: &str) -> Result<()> {
        let response = self
            .http_client
            .delete(self.url(&format!("collections/{name}")))
            .send()
            .await
            .map_err(self.transport("delete_collection"))?;
        let body = Self::parse(response, name).await?;
        // Qdrant answers 200 with `result: false` for unknown collections
        if body.get("result").and_then(Value::as_bool) == Some(false) {
            return Err(Error::collection_not_found(name));
        }
        Ok(())
    }

    async fn upsert_points(&self, collection: &str, points: &[IndexedPoint]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }
        let body = json!({
            "points": points
                .iter()
                .map(|p| json!({ "id": p.id, "vector": p.vector, "payload": p.payload }))
                .collect::<Vec<_>>(),
        });
        let response = self
            .http_client
            .put(self.url(&format!("collections/{collection}/points?wait=false")))
            .json(&body)
            .send()
            .await
            .map_err(self.transport("upsert_points"))?;
        Self::check(response, collection).await?;
        Ok(())
    }

    async fn query_points(
        &self,
        collection: &str,
        query: &EmbeddingVector,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let response = self
            .http_client
            .post(self.url(&format!("collections/{collection}/points/query")))
            .json(&json!({ "query": query, "limit": limit, "with_payload": true }))
            .send()
            .await
            .map_err(self.transport("query_points"))?;
        let body = Self::parse(response, collection).await?;
        let parsed: QueryResponse = serde_json::from_value(body).map_err(|e| {
            Error::store_transport_with_source(format!("{PROVIDER} query response malformed"), e)
        })?;
        Ok(parsed.result.points.into_iter().filter_map(into_hit).collect())
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use std::sync::Arc;

use vdr_application::ports::registry::{
    VECTOR_STORE_PROVIDERS, VectorStoreProviderConfig, VectorStoreProviderEntry,
};

fn qdrant_factory(
    config: &VectorStoreProviderConfig,
) -> std::result::Result<Arc<dyn VectorStoreProvider>, String> {
    let url = config.url.as_deref().unwrap_or(QDRANT_DEFAULT_URL);
    let timeout = Duration::from_secs(config.timeout_secs.unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS));
    QdrantVectorStoreProvider::new(url, config.api_key.as_deref(), timeout)
        .map(|p| Arc::new(p) as Arc<dyn VectorStoreProvider>)
        .map_err(|e| e.to_string())
}

#[linkme::distributed_slice(VECTOR_STORE_PROVIDERS)]
static QDRANT_PROVIDER: VectorStoreProviderEntry = VectorStoreProviderEntry {
    name: "qdrant",
    description: "Qdrant REST API (multi-vector collections, scalar quantization)",
    factory: qdrant_factory,
};
