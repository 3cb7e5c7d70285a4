//! Liveness of the proxy itself; the remote service is not contacted.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::api::{AppState, COLLECTION_NAME};

/// GET /health
///
/// Reports where the repository collection is mounted.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "collection": COLLECTION_NAME,
        "mounted_at": format!("{}/", state.prefix),
    }))
}
