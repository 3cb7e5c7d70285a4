//! API Error Handling
//!
//! Unified error types and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pulp_client::ClientError;
use serde_json::{Value, json};

use crate::service::repo_service::{FieldErrors, RepoError};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Validation(FieldErrors),
    Conflict(String),
    RemoteError(ClientError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Validation(errors) => (StatusCode::BAD_REQUEST, json!(errors)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            ApiError::RemoteError(err) => {
                tracing::error!("Pulp error: {}", err);
                remote_error_response(err)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Keep whatever the remote service said so callers can diagnose it
fn remote_error_response(err: ClientError) -> (StatusCode, Value) {
    let message = err.to_string();
    match err {
        ClientError::RemoteService { status, body } => (
            StatusCode::BAD_GATEWAY,
            json!({
                "error": message,
                "remote_status": status,
                "remote_body": serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body)),
            }),
        ),
        ClientError::TaskFailed(task) => (
            StatusCode::BAD_GATEWAY,
            json!({ "error": message, "task": task.payload }),
        ),
        ClientError::TaskTimedOut { .. } => {
            (StatusCode::GATEWAY_TIMEOUT, json!({ "error": message }))
        }
        _ => (StatusCode::BAD_GATEWAY, json!({ "error": message })),
    }
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::ValidationError(errors) => ApiError::Validation(errors),
            RepoError::NotFound(what) => ApiError::NotFound(format!("{} not found", what)),
            RepoError::Conflict(msg) => ApiError::Conflict(msg),
            RepoError::RemoteError(err) => ApiError::RemoteError(err),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
