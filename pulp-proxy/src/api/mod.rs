//! API Module
//!
//! HTTP API layer for the proxy.
//! Each submodule handles endpoints for a specific concern.

pub mod error;
pub mod health;
pub mod pulp_repo;
pub mod serializer;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderMap, header},
    routing::get,
};
use pulp_client::PulpClient;
use tower_http::trace::TraceLayer;

use crate::api::serializer::{IdentityLink, PulpRepoSerializer};
use crate::config::ProxyConfig;

/// Route name of the repository collection
pub const COLLECTION_NAME: &str = "pulp_repo";

/// Shared, read-only state of every handler
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<PulpClient>,
    /// Mount point of the collection ("" or "/segment...")
    pub prefix: Arc<str>,
    pub public_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(client: PulpClient, config: &ProxyConfig) -> Self {
        Self {
            client: Arc::new(client),
            prefix: crate::config::normalize_prefix(&config.url_prefix).into(),
            public_url: config.public_url.as_deref().map(Into::into),
        }
    }

    /// Serializer whose links point back at the origin the client used
    pub fn serializer(&self, headers: &HeaderMap) -> PulpRepoSerializer {
        let origin = match &self.public_url {
            Some(url) => url.to_string(),
            None => headers
                .get(header::HOST)
                .and_then(|host| host.to_str().ok())
                .map(|host| format!("http://{}", host))
                .unwrap_or_default(),
        };

        PulpRepoSerializer::new(IdentityLink::new(&origin, &self.prefix, "repo_id"))
    }
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let collection = format!("{}/", state.prefix);
    let detail = format!("{}/{{pk}}/", state.prefix);

    tracing::debug!("Mounting {} at {}", COLLECTION_NAME, collection);

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Repository collection
        .route(
            &collection,
            get(pulp_repo::list_repos).post(pulp_repo::create_repo),
        )
        .route(&detail, get(pulp_repo::get_repo))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
