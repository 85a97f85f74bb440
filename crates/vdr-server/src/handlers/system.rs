//! Health and page image handlers

use std::path::PathBuf;

use rocket::fs::NamedFile;
use rocket::serde::json::Json;
use rocket::{State, get};
use vdr_application::use_cases::ModelState;
use vdr_domain::ports::providers::VectorStoreAdmin;

use crate::constants::{HEALTH_STATUS_DEGRADED, HEALTH_STATUS_OK};
use crate::models::HealthResponse;
use crate::transport::http::ApiState;

/// Model state and wired providers
#[get("/health")]
pub fn health(state: &State<ApiState>) -> Json<HealthResponse> {
    let context = &state.context;
    let generator = context.generator();
    let model = generator.state();
    let status = if model == ModelState::Ready {
        HEALTH_STATUS_OK
    } else {
        HEALTH_STATUS_DEGRADED
    };

    Json(HealthResponse {
        status,
        model,
        model_name: generator.model_name().to_string(),
        embedding_provider: generator.provider_name().to_string(),
        vector_store: context.vector_store().provider_name().to_string(),
        metadata_store: context.metadata_store().provider_name().to_string(),
        rasterizer: context.rasterizer_name(),
        collection: context.config.pipeline.collection.clone(),
        answers_enabled: context.retrieval().answers_enabled(),
    })
}

/// Serve a stored page image
///
/// `path` is resolved below `pipeline.image_dir`; Rocket's segment guard
/// rejects `..` components.
#[get("/images/<path..>")]
pub async fn page_image(state: &State<ApiState>, path: PathBuf) -> Option<NamedFile> {
    NamedFile::open(state.context.config.pipeline.image_dir.join(path))
        .await
        .ok()
}
