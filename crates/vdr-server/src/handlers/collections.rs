//! Collection administration handlers

use rocket::serde::json::Json;
use rocket::{State, post};

use crate::error::ApiError;
use crate::models::{
    CollectionListResponse, CollectionStatusResponse, CreateCollectionRequest,
    DeleteCollectionRequest,
};
use crate::transport::http::ApiState;

/// Create a collection with the configured policy
#[post("/create_qdrant_collection", data = "<request>")]
pub async fn create_collection(
    state: &State<ApiState>,
    request: Json<CreateCollectionRequest>,
) -> Result<Json<CollectionStatusResponse>, ApiError> {
    let request = request.into_inner();
    let spec = state
        .context
        .collections()
        .create(
            &request.collection_name,
            request.vector_size,
            request.indexing_threshold,
        )
        .await?;

    Ok(Json(CollectionStatusResponse {
        status: format!("Collection '{}' created successfully", spec.name),
        collection_name: spec.name,
    }))
}

/// Delete a collection
#[post("/delete_qdrant_collection", data = "<request>")]
pub async fn delete_collection(
    state: &State<ApiState>,
    request: Json<DeleteCollectionRequest>,
) -> Result<Json<CollectionStatusResponse>, ApiError> {
    let name = request.into_inner().collection_name;
    state.context.collections().delete(&name).await?;

    Ok(Json(CollectionStatusResponse {
        status: format!("Collection '{name}' deleted successfully"),
        collection_name: name,
    }))
}

/// List collections
#[post("/get_qdrant_collections")]
pub async fn list_collections(
    state: &State<ApiState>,
) -> Result<Json<CollectionListResponse>, ApiError> {
    let collections = state.context.collections().list().await?;
    Ok(Json(CollectionListResponse {
        collections: collections.into_iter().map(Into::into).collect(),
    }))
}
