//! Importer (feed) endpoints

use pulp_core::dto::importer::ImporterConfig;
use reqwest::Method;
use serde_json::Value;

use crate::PulpClient;
use crate::error::{ClientError, Result};
use crate::repositories::not_found_as;

impl PulpClient {
    // =============================================================================
    // Feeds
    // =============================================================================

    /// Attach a yum importer to a repository
    ///
    /// With `feed_url` set to `None` the importer is configured without any
    /// feed at all.
    ///
    /// # Returns
    /// The importer as echoed by the remote service
    pub async fn set_feed(&self, repo_id: &str, feed_url: Option<&str>) -> Result<Value> {
        let config = ImporterConfig::yum(feed_url);
        let response = self
            .execute(
                self.request(Method::POST, &["repositories", repo_id, "importers"])?
                    .json(&config),
            )
            .await?;

        self.handle_response(response)
            .await
            .map_err(|e| not_found_as(e, || format!("repository {}", repo_id)))
    }

    /// Get the importer attached to a repository
    pub async fn get_feed(&self, repo_id: &str) -> Result<Value> {
        let response = self
            .execute(self.request(Method::GET, &["repositories", repo_id, "importers"])?)
            .await?;

        let importers: Vec<Value> = self
            .handle_response(response)
            .await
            .map_err(|e| not_found_as(e, || format!("repository {}", repo_id)))?;

        importers
            .into_iter()
            .next()
            .ok_or_else(|| ClientError::not_found(format!("importer of repository {}", repo_id)))
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
    async fn test_set_feed_without_url_sends_no_config() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api_path("repositories/r1/importers/")))
            .and(body_json(json!({"importer_type_id": "yum_importer"})))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "result": {"importer_type_id": "yum_importer", "config": {}},
                "error": null,
                "spawned_tasks": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let echo = client_for(&server).set_feed("r1", None).await.unwrap();
        assert_eq!(echo["result"]["config"], json!({}));
    }

    #[tokio::test]
    async fn test_set_feed_with_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api_path("repositories/r1/importers/")))
            .and(body_json(json!({
                "importer_type_id": "yum_importer",
                "importer_config": {"feed": "http://mirror/el7/"}
            })))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"spawned_tasks": []})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .set_feed("r1", Some("http://mirror/el7/"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_get_feed_returns_first_importer() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api_path("repositories/r1/importers/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "yum_importer", "config": {"feed": "http://mirror/el7/"}}
            ])))
            .mount(&server)
            .await;

        let importer = client_for(&server).get_feed("r1").await.unwrap();
        assert_eq!(importer["config"]["feed"], "http://mirror/el7/");
    }

    #[tokio::test]
    async fn test_get_feed_without_importer_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api_path("repositories/r1/importers/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = client_for(&server).get_feed("r1").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
