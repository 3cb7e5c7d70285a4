//! Repository API Handlers
//!
//! HTTP endpoints of the `pulp_repo` collection.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::Value;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::serializer::SerializedRepo;
use crate::service::repo_service;

/// GET {prefix}/
/// List all repositories
pub async fn list_repos(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<Vec<SerializedRepo>>> {
    tracing::debug!("Listing all repositories");

    let repos = repo_service::list_repos(&state.client).await?;

    Ok(Json(state.serializer(&headers).serialize_many(&repos)))
}

/// GET {prefix}/{pk}/
/// Get repository by ID
pub async fn get_repo(
    State(state): State<AppState>,
    Path(pk): Path<String>,
    headers: HeaderMap,
) -> ApiResult<Json<SerializedRepo>> {
    tracing::debug!("Getting repository: {}", pk);

    let repo = repo_service::get_repo(&state.client, &pk).await?;

    Ok(Json(state.serializer(&headers).serialize(&repo)))
}

/// POST {prefix}/
/// Create a new repository
pub async fn create_repo(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<SerializedRepo>)> {
    let payload: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::BadRequest(format!("JSON parse error - {}", e)))?
    };

    tracing::info!("Creating repository: {}", payload);

    let repo = repo_service::create_repo(&state.client, &payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(state.serializer(&headers).serialize(&repo)),
    ))
}
