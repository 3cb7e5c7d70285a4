//! Distributor (publication target) endpoints

use pulp_core::dto::distributor::DistributorConfig;
use reqwest::Method;
use serde_json::Value;

use crate::PulpClient;
use crate::error::{ClientError, Result};
use crate::repositories::not_found_as;

/// A distributor attached to a repository, with the URL it publishes to
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedTarget {
    /// Distributor as echoed by the remote service
    pub distributor: Value,

    /// Externally reachable URL of the published repository
    pub repo_url: String,
}

impl PulpClient {
    // =============================================================================
    // Publication Targets
    // =============================================================================

    /// Attach the publication target distributor to a repository
    ///
    /// The repository is served over HTTP under its own id and republished
    /// after every sync.
    pub async fn set_target(&self, repo_id: &str) -> Result<PublishedTarget> {
        let config = DistributorConfig::target_for(repo_id);
        let response = self
            .execute(
                self.request(Method::POST, &["repositories", repo_id, "distributors"])?
                    .json(&config),
            )
            .await?;

        let distributor: Value = self
            .handle_response(response)
            .await
            .map_err(|e| not_found_as(e, || format!("repository {}", repo_id)))?;

        let relative_url = distributor
            .pointer("/config/relative_url")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ClientError::ParseError(format!(
                    "distributor of repository {} has no config.relative_url",
                    repo_id
                ))
            })?;

        let repo_url = format!(
            "{}{}",
            self.public_repo_url,
            relative_url.trim_start_matches('/')
        );

        Ok(PublishedTarget {
            distributor,
            repo_url,
        })
    }

    /// Get the distributor attached to a repository
    pub async fn get_target(&self, repo_id: &str) -> Result<Value> {
        let response = self
            .execute(self.request(Method::GET, &["repositories", repo_id, "distributors"])?)
            .await?;

        let distributors: Vec<Value> = self
            .handle_response(response)
            .await
            .map_err(|e| not_found_as(e, || format!("repository {}", repo_id)))?;

        distributors
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::not_found(format!("distributor of repository {}", repo_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{api_path, client_for};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_set_target_computes_public_url() {
        let server = MockServer::start().await;
        let echo = json!({
            "id": "target",
            "distributor_type_id": "yum_distributor",
            "auto_publish": true,
            "config": {"http": true, "https": false, "relative_url": "r1"}
        });
        Mock::given(method("POST"))
            .and(path(api_path("repositories/r1/distributors/")))
            .and(body_json(json!({
                "distributor_id": "target",
                "distributor_type_id": "yum_distributor",
                "distributor_config": {"http": true, "https": false, "relative_url": "r1"},
                "auto_publish": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(echo.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let target = client_for(&server).set_target("r1").await.unwrap();
        assert_eq!(target.distributor, echo);
        assert_eq!(target.repo_url, "http://localhost/pulp/repos/r1");
    }

    #[tokio::test]
    async fn test_set_target_without_relative_url_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api_path("repositories/r1/distributors/")))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "target"})))
            .mount(&server)
            .await;

        let err = client_for(&server).set_target("r1").await.unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_get_target_without_distributor_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api_path("repositories/r1/distributors/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = client_for(&server).get_target("r1").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_get_target_missing_repository() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api_path("repositories/nope/distributors/")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).get_target("nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Not found: repository nope");
    }
}
