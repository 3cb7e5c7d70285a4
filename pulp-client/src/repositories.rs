//! Repository endpoints

use pulp_core::domain::repository::RepositoryRecord;
use pulp_core::domain::task::TaskAck;
use pulp_core::dto::repository::CreateRepository;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::info;

use crate::PulpClient;
use crate::error::{ClientError, Result};

/// Body the remote service sends instead of an empty array when it has no repositories
const EMPTY_COLLECTION_SENTINEL: &str = "not found";

impl PulpClient {
    // =============================================================================
    // Repository Management
    // =============================================================================

    /// List all repositories
    ///
    /// Every call performs a fresh request; nothing is cached between calls.
    pub async fn list_repositories(&self) -> Result<Vec<RepositoryRecord>> {
        let response = self
            .execute(self.request(Method::GET, &["repositories"])?)
            .await?;
        let response = self.check_status(response).await?;

        let body = response.text().await?;
        if is_empty_sentinel(&body) {
            return Ok(Vec::new());
        }

        let raw: Vec<Value> = serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Invalid repository list: {}", e)))?;

        raw.into_iter().map(convert).collect()
    }

    /// Get a repository by ID
    pub async fn get_repository(&self, repo_id: &str) -> Result<RepositoryRecord> {
        let what = || format!("repository {}", repo_id);
        let request = self
            .request(Method::GET, &["repositories", repo_id])
            .map_err(|e| not_found_as(e, what))?;
        let response = self.execute(request).await?;

        let raw: Value = self
            .handle_response(response)
            .await
            .map_err(|e| not_found_as(e, what))?;

        convert(raw)
    }

    /// Create a repository
    ///
    /// Fails with [`ClientError::Conflict`] when `repo_id` is already taken.
    pub async fn create_repository(
        &self,
        repo_id: &str,
        display_name: &str,
    ) -> Result<RepositoryRecord> {
        let req = CreateRepository {
            id: repo_id.to_string(),
            display_name: display_name.to_string(),
        };
        let response = self
            .execute(self.request(Method::POST, &["repositories"])?.json(&req))
            .await?;

        let raw: Value = self.handle_response(response).await?;
        let record = convert(raw)?;

        info!("Repository created: {}", record.repo_id);

        Ok(record)
    }

    /// Delete a repository
    ///
    /// Deleting a repository that does not exist succeeds with
    /// [`TaskAck::null`].
    pub async fn delete_repository(&self, repo_id: &str) -> Result<TaskAck> {
        let request = match self.request(Method::DELETE, &["repositories", repo_id]) {
            Err(err) if err.is_not_found() => {
                info!("Repository id {:?} cannot exist, nothing to delete", repo_id);
                return Ok(TaskAck::null());
            }
            request => request?,
        };
        let response = self.execute(request).await?;

        if response.status() == StatusCode::NOT_FOUND {
            info!("Repository {} already absent, nothing to delete", repo_id);
            return Ok(TaskAck::null());
        }

        self.handle_response(response).await
    }
}

fn is_empty_sentinel(body: &str) -> bool {
    let body = body.trim();
    body == EMPTY_COLLECTION_SENTINEL || body.trim_matches('"') == EMPTY_COLLECTION_SENTINEL
}

fn convert(raw: Value) -> Result<RepositoryRecord> {
    RepositoryRecord::from_remote(raw).map_err(ClientError::ParseError)
}

/// Replace the path in a not-found error with a description of what was missing
///
/// The remote reply body is kept.
pub(crate) fn not_found_as(err: ClientError, what: impl FnOnce() -> String) -> ClientError {
    match err {
        ClientError::NotFound { body, .. } => ClientError::NotFound { what: what(), body },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{api_path, client_for};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_repositories_converts_each_entry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api_path("repositories/")))
            .and(header("authorization", "Basic YWRtaW46YWRtaW4="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": "r1", "display_name": "Repo One", "notes": {}},
                {"id": "r2", "display_name": "Repo Two", "notes": {}}
            ])))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let repos = client.list_repositories().await.unwrap();

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].repo_id, "r1");
        assert_eq!(repos[1].display_name, "Repo Two");
        assert_eq!(repos[1].details["notes"], json!({}));

        // Each call is a fresh pass over the remote collection
        let again = client.list_repositories().await.unwrap();
        assert_eq!(again, repos);
    }

    #[tokio::test]
    async fn test_list_repositories_sentinel_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api_path("repositories/")))
            .respond_with(ResponseTemplate::new(200).set_body_string("not found"))
            .mount(&server)
            .await;

        let repos = client_for(&server).list_repositories().await.unwrap();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn test_get_repository_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api_path("repositories/missing/")))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "http_status": 404,
                "error_message": "Missing resource(s): repository=missing"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .get_repository("missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Not found: repository missing");
        match err {
            ClientError::NotFound { body, .. } => {
                assert!(body.contains("Missing resource(s): repository=missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_repository_encodes_hostile_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(api_path("tasks/x/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"state": "finished"})))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(api_path("repositories/..%2Ftasks%2Fx/")))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(api_path("repositories/a%20b%3Fc/")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "a b?c", "display_name": "Odd"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);

        let err = client.get_repository("../tasks/x").await.unwrap_err();
        assert_eq!(err.to_string(), "Not found: repository ../tasks/x");

        let repo = client.get_repository("a b?c").await.unwrap();
        assert_eq!(repo.repo_id, "a b?c");

        // Dot ids never reach the remote service
        let err = client.get_repository("..").await.unwrap_err();
        assert_eq!(err.to_string(), "Not found: repository ..");
        let ack = client.delete_repository("..").await.unwrap();
        assert_eq!(ack, TaskAck::null());
    }

    #[tokio::test]
    async fn test_create_then_get_round_trips() {
        let server = MockServer::start().await;
        let remote = json!({"id": "r1", "display_name": "Repo One", "_href": "/pulp/api/v2/repositories/r1/"});

        Mock::given(method("POST"))
            .and(path(api_path("repositories/")))
            .and(body_json(json!({"id": "r1", "display_name": "Repo One"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(remote.clone()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(api_path("repositories/r1/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(remote.clone()))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let created = client.create_repository("r1", "Repo One").await.unwrap();
        let fetched = client.get_repository("r1").await.unwrap();

        assert_eq!(created.repo_id, fetched.repo_id);
        assert_eq!(created.display_name, fetched.display_name);
        assert_eq!(fetched.details, remote);
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api_path("repositories/")))
            .respond_with(ResponseTemplate::new(409).set_body_string("Duplicate resource: r1"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_repository("r1", "Repo One")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Conflict(ref body) if body.contains("r1")));
    }

    #[tokio::test]
    async fn test_delete_missing_repository_is_null_ack() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(api_path("repositories/gone/")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let ack = client_for(&server).delete_repository("gone").await.unwrap();
        assert_eq!(ack, TaskAck::null());
    }

    #[tokio::test]
    async fn test_delete_returns_spawned_tasks() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(api_path("repositories/r1/")))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({
                "result": null,
                "error": null,
                "spawned_tasks": [{"_href": "/pulp/api/v2/tasks/t1/", "task_id": "t1"}]
            })))
            .mount(&server)
            .await;

        let ack = client_for(&server).delete_repository("r1").await.unwrap();
        assert_eq!(ack.task_ids().collect::<Vec<_>>(), vec!["t1"]);
    }

    #[tokio::test]
    async fn test_server_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(api_path("repositories/r1/")))
            .respond_with(ResponseTemplate::new(500).set_body_string("database is on fire"))
            .mount(&server)
            .await;

        let err = client_for(&server).delete_repository("r1").await.unwrap_err();
        match err {
            ClientError::RemoteService { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "database is on fire");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
