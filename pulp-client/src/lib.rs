//! Pulp HTTP Client
//!
//! A typed client for the remote Pulp service's v2 REST API.
//!
//! Every call is authenticated with the configured credential pair, goes to the
//! versioned API root and converts non-2xx replies into [`ClientError`]s. No
//! state is kept between calls.
//!
//! # Example
//!
//! ```no_run
//! use pulp_client::{PulpClient, PulpConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pulp_client::ClientError> {
//!     let client = PulpClient::new(PulpConfig::from_env())?;
//!
//!     let repo = client.create_repository("el7-base", "EL7 Base").await?;
//!     client.set_feed(&repo.repo_id, Some("http://mirror.example.com/el7/")).await?;
//!     let ack = client.start_sync(&repo.repo_id).await?;
//!     client.wait_for_tasks(&ack).await?;
//!     Ok(())
//! }
//! ```

mod actions;
pub mod config;
mod distributors;
pub mod error;
mod importers;
pub mod poll;
mod repositories;
mod tasks;

// Re-export commonly used types
pub use config::PulpConfig;
pub use distributors::PublishedTarget;
pub use error::{ClientError, Result};
pub use poll::PollPolicy;
pub use tokio_util::sync::CancellationToken;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// HTTP client for the remote Pulp API
///
/// Operations are grouped by remote resource:
/// - Repositories (list, get, create, delete)
/// - Importers / feeds
/// - Distributors / publication targets
/// - Repository actions (sync, publish, associate)
/// - Tasks (polling to completion)
#[derive(Debug, Clone)]
pub struct PulpClient {
    /// Versioned API root without trailing slash (e.g., "https://pulpapi/pulp/api/v2")
    api_url: String,
    /// Public origin of published repositories, with trailing slash
    public_repo_url: String,
    username: String,
    password: String,
    poll_policy: PollPolicy,
    /// HTTP client instance
    client: Client,
}

impl PulpClient {
    /// Create a new client from validated configuration
    ///
    /// Certificate validation follows `config.verify_tls`.
    pub fn new(config: PulpConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;

        Ok(Self::with_client(config, client))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// The TLS and timeout settings of `config` are ignored in favour of
    /// whatever `client` was built with.
    pub fn with_client(config: PulpConfig, client: Client) -> Self {
        let api_url = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            config.api_version_path.trim_matches('/')
        );

        let mut public_repo_url = config.public_repo_url;
        if !public_repo_url.ends_with('/') {
            public_repo_url.push('/');
        }

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            public_repo_url,
            username: config.username,
            password: config.password,
            poll_policy: config.poll_policy,
            client,
        }
    }

    /// Get the versioned API root
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Default policy used by [`PulpClient::wait_for_task`]
    pub fn poll_policy(&self) -> &PollPolicy {
        &self.poll_policy
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Build the URL for a path below the API root
    ///
    /// Each entry is exactly one path segment and is percent-encoded, so a
    /// caller-supplied id never adds segments, a query or a fragment. The
    /// remote service expects a trailing slash on every endpoint.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| ClientError::InvalidConfig(format!("invalid API root: {}", e)))?;

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidConfig("API root cannot be a base".to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                // Dot segments would be resolved away and address another resource
                if segment.is_empty() || *segment == "." || *segment == ".." {
                    return Err(ClientError::not_found(segments.join("/")));
                }
                path.push(segment);
            }
            path.push("");
        }

        Ok(url)
    }

    /// Start an authenticated request
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self
            .client
            .request(method, self.url(segments)?)
            .basic_auth(&self.username, Some(&self.password)))
    }

    /// Send a request and log the exchange
    async fn execute(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        debug!(%method, %url, "sending request to Pulp");
        let response = self.client.execute(request).await?;
        debug!(%method, %url, status = %response.status(), "received reply from Pulp");

        Ok(response)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Turn a non-2xx reply into the matching error
    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound { what: path, body },
            StatusCode::CONFLICT => ClientError::Conflict(body),
            _ => ClientError::remote(status.as_u16(), body),
        })
    }

    /// Handle a reply and deserialize its JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::time::Duration;

    use wiremock::MockServer;

    use crate::{PollPolicy, PulpClient, PulpConfig};

    /// Client pointed at `server`, polling tasks every millisecond
    pub fn client_for(server: &MockServer) -> PulpClient {
        let config = PulpConfig {
            base_url: format!("{}/pulp", server.uri()),
            poll_policy: PollPolicy::fixed(Duration::from_millis(1))
                .with_max_wait(Some(Duration::from_secs(5))),
            ..PulpConfig::default()
        };
        PulpClient::new(config).expect("client")
    }

    /// Path of an endpoint as the mock server sees it
    pub fn api_path(rest: &str) -> String {
        format!("/pulp/api/v2/{}", rest)
    }
}
