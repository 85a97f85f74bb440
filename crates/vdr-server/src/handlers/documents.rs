//! Upload and query handlers

use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::serde::json::Json;
use rocket::{FromForm, State, post};
use tracing::info;
use vdr_domain::error::Error;
use vdr_domain::value_objects::ArtifactKind;

use crate::error::ApiError;
use crate::models::{EmbedResponse, RetrievalRequest, RetrievalResponse};
use crate::staging::{StagedUpload, safe_file_name};
use crate::transport::http::ApiState;

/// Multipart body of `POST /document_embed`
#[derive(FromForm)]
pub struct DocumentUpload<'r> {
    /// PDF, ZIP, PNG or JPEG artifact
    pub file: TempFile<'r>,
}

/// Ingest, persist and index an uploaded artifact
#[post("/document_embed", data = "<upload>")]
pub async fn document_embed(
    state: &State<ApiState>,
    mut upload: Form<DocumentUpload<'_>>,
) -> Result<Json<EmbedResponse>, ApiError> {
    let raw_name = upload
        .file
        .raw_name()
        .map(|name| name.dangerous_unsafe_unsanitized_raw().as_str().to_string())
        .ok_or_else(|| ApiError::bad_request("uploaded file has no name"))?;
    let file_name = safe_file_name(&raw_name)?;
    ArtifactKind::from_file_name(&file_name)?;

    let staged = StagedUpload::create(&state.context.config.server.staging_dir, &file_name).await?;
    let staged_path = staged.file_path();
    upload
        .file
        .copy_to(&staged_path)
        .await
        .map_err(|e| Error::io_with_source("Failed to stage upload", e))?;

    info!(upload = %staged.id(), file = %file_name, "Embedding upload");
    let report = state
        .context
        .document_embed()
        .embed_file(&staged_path, staged.file_name())
        .await?;

    Ok(Json(report.into()))
}

/// Rank stored pages against a natural-language query
#[post("/document_retrieval", data = "<request>")]
pub async fn document_retrieval(
    state: &State<ApiState>,
    request: Json<RetrievalRequest>,
) -> Result<Json<RetrievalResponse>, ApiError> {
    let request = request.into_inner();
    let top_k = request
        .top_k
        .unwrap_or(state.context.config.pipeline.top_k);

    let retrieval = state
        .context
        .retrieval()
        .retrieve(&request.user_query, top_k, request.generate_answer)
        .await
        .map_err(ApiError::from_query)?;

    Ok(Json(retrieval.into()))
}
