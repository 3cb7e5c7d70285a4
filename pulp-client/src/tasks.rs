//! Task endpoints
//!
//! Remote tasks move through `waiting`, `running` and `suspended` until they
//! settle. `finished` is the only successful outcome; every other settled
//! state fails the wait with the full task report attached.

use pulp_core::domain::task::{TaskAck, TaskState, TaskStatus};
use reqwest::Method;
use serde_json::Value;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::PulpClient;
use crate::error::{ClientError, Result};
use crate::poll::PollPolicy;
use crate::repositories::not_found_as;

impl PulpClient {
    // =============================================================================
    // Tasks
    // =============================================================================

    /// Fetch the current report of a task
    pub async fn get_task(&self, task_id: &str) -> Result<TaskStatus> {
        let what = || format!("task {}", task_id);
        let request = self
            .request(Method::GET, &["tasks", task_id])
            .map_err(|e| not_found_as(e, what))?;
        let response = self.execute(request).await?;

        let payload: Value = self
            .handle_response(response)
            .await
            .map_err(|e| not_found_as(e, what))?;

        Ok(TaskStatus::from_remote(payload))
    }

    /// Wait for a task to settle using the configured poll policy
    ///
    /// # Returns
    /// The final report of a `finished` task
    ///
    /// # Errors
    /// [`ClientError::TaskFailed`] when the task settles in any other state,
    /// [`ClientError::TaskTimedOut`] when the policy's bound is exceeded.
    pub async fn wait_for_task(&self, task_id: &str) -> Result<TaskStatus> {
        self.wait_for_task_with(task_id, &self.poll_policy, &CancellationToken::new())
            .await
    }

    /// Wait for a task to settle, polling per `policy` until `cancel` fires
    pub async fn wait_for_task_with(
        &self,
        task_id: &str,
        policy: &PollPolicy,
        cancel: &CancellationToken,
    ) -> Result<TaskStatus> {
        let started = Instant::now();
        let mut polls: u32 = 0;
        let mut last_state: Option<TaskState> = None;

        loop {
            let status = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(task_id)),
                status = self.get_task(task_id) => status?,
            };

            if last_state.as_ref() != Some(&status.state) {
                debug!(task_id, state = %status.state, "task state changed");
                last_state = Some(status.state.clone());
            }

            if status.state.is_success() {
                info!("Task {} finished after {:?}", task_id, started.elapsed());
                return Ok(status);
            }

            if status.state.is_terminal() {
                warn!(task_id, state = %status.state, "task failed");
                return Err(ClientError::TaskFailed(status));
            }

            let mut delay = policy.delay_for(polls);
            polls = polls.saturating_add(1);

            if let Some(max_wait) = policy.max_wait {
                let waited = started.elapsed();
                if waited >= max_wait {
                    return Err(ClientError::TaskTimedOut {
                        task_id: task_id.to_string(),
                        waited,
                    });
                }
                delay = delay.min(max_wait - waited);
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(cancelled(task_id)),
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// Wait for every task spawned by a remote call, in order
    pub async fn wait_for_tasks(&self, ack: &TaskAck) -> Result<Vec<TaskStatus>> {
        self.wait_for_tasks_with(ack, &self.poll_policy, &CancellationToken::new())
            .await
    }

    /// Wait for every task spawned by a remote call under an explicit policy
    pub async fn wait_for_tasks_with(
        &self,
        ack: &TaskAck,
        policy: &PollPolicy,
        cancel: &CancellationToken,
    ) -> Result<Vec<TaskStatus>> {
        let mut finished = Vec::with_capacity(ack.spawned_tasks.len());
        for task_id in ack.task_ids() {
            finished.push(self.wait_for_task_with(task_id, policy, cancel).await?);
        }
        Ok(finished)
    }
}

fn cancelled(task_id: &str) -> ClientError {
    ClientError::TaskCancelled {
        task_id: task_id.to_string(),
    }
}
