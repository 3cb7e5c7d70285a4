//! Repository action endpoints
//!
//! Each action starts work on the remote service and returns immediately with
//! a [`TaskAck`]; use [`PulpClient::wait_for_tasks`] to wait for the outcome.

use pulp_core::domain::task::TaskAck;
use pulp_core::dto::action::{AssociateRequest, PublishRequest};
use pulp_core::dto::distributor::TARGET_DISTRIBUTOR_ID;
use reqwest::Method;
use tracing::info;

use crate::PulpClient;
use crate::error::Result;
use crate::repositories::not_found_as;

impl PulpClient {
    // =============================================================================
    // Repository Actions
    // =============================================================================

    /// Start syncing a repository from its feed
    pub async fn start_sync(&self, repo_id: &str) -> Result<TaskAck> {
        let response = self
            .execute(self.request(Method::POST, &["repositories", repo_id, "actions", "sync"])?)
            .await?;

        let ack: TaskAck = self
            .handle_response(response)
            .await
            .map_err(|e| not_found_as(e, || format!("repository {}", repo_id)))?;

        info!("Sync of {} started ({} task(s))", repo_id, ack.spawned_tasks.len());

        Ok(ack)
    }

    /// Start copying all content of `source_repo_id` into `target_repo_id`
    pub async fn start_merge(&self, source_repo_id: &str, target_repo_id: &str) -> Result<TaskAck> {
        let req = AssociateRequest {
            source_repo_id: source_repo_id.to_string(),
        };
        let response = self
            .execute(
                self.request(
                    Method::POST,
                    &["repositories", target_repo_id, "actions", "associate"],
                )?
                .json(&req),
            )
            .await?;

        let ack: TaskAck = self.handle_response(response).await?;

        info!(
            "Merge of {} into {} started ({} task(s))",
            source_repo_id,
            target_repo_id,
            ack.spawned_tasks.len()
        );

        Ok(ack)
    }

    /// Start publishing a repository through its publication target
    pub async fn start_publish(&self, repo_id: &str) -> Result<TaskAck> {
        let req = PublishRequest {
            id: TARGET_DISTRIBUTOR_ID.to_string(),
        };
        let response = self
            .execute(
                self.request(Method::POST, &["repositories", repo_id, "actions", "publish"])?
                    .json(&req),
            )
            .await?;

        let ack: TaskAck = self
            .handle_response(response)
            .await
            .map_err(|e| not_found_as(e, || format!("repository {}", repo_id)))?;

        info!("Publish of {} started ({} task(s))", repo_id, ack.spawned_tasks.len());

        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{api_path, client_for};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn call_report(task_id: &str) -> serde_json::Value {
        json!({
            "result": null,
            "error": null,
            "spawned_tasks": [{"_href": format!("/pulp/api/v2/tasks/{task_id}/"), "task_id": task_id}]
        })
    }

    #[tokio::test]
    async fn test_start_sync() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api_path("repositories/r1/actions/sync/")))
            .respond_with(ResponseTemplate::new(202).set_body_json(call_report("sync-1")))
            .expect(1)
            .mount(&server)
            .await;

        let ack = client_for(&server).start_sync("r1").await.unwrap();
        assert_eq!(ack.task_ids().collect::<Vec<_>>(), vec!["sync-1"]);
    }

    #[tokio::test]
    async fn test_start_merge_posts_to_target() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api_path("repositories/dest/actions/associate/")))
            .and(body_json(json!({"source_repo_id": "src"})))
            .respond_with(ResponseTemplate::new(202).set_body_json(call_report("merge-1")))
            .expect(1)
            .mount(&server)
            .await;

        let ack = client_for(&server).start_merge("src", "dest").await.unwrap();
        assert_eq!(ack.spawned_tasks[0].task_id, "merge-1");
    }

    #[tokio::test]
    async fn test_start_publish_uses_target_distributor() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api_path("repositories/r1/actions/publish/")))
            .and(body_json(json!({"id": "target"})))
            .respond_with(ResponseTemplate::new(202).set_body_json(call_report("pub-1")))
            .expect(1)
            .mount(&server)
            .await;

        let ack = client_for(&server).start_publish("r1").await.unwrap();
        assert_eq!(ack.spawned_tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_start_sync_missing_repository() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(api_path("repositories/nope/actions/sync/")))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = client_for(&server).start_sync("nope").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
