//! Task domain model
//!
//! The remote service runs long operations (sync, publish, associate, delete)
//! as asynchronous tasks. Callers receive a [`TaskAck`] pointing at the spawned
//! tasks and poll each one until its [`TaskState`] is terminal.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State reported by the remote service for a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskState {
    Waiting,
    Running,
    Suspended,
    Finished,
    /// Any other value. Always a failure terminal.
    Other(String),
}

impl TaskState {
    /// Whether the task has stopped moving
    pub fn is_terminal(&self) -> bool {
        !matches!(
            self,
            TaskState::Waiting | TaskState::Running | TaskState::Suspended
        )
    }

    /// Whether the task completed successfully
    pub fn is_success(&self) -> bool {
        matches!(self, TaskState::Finished)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskState::Waiting => "waiting",
            TaskState::Running => "running",
            TaskState::Suspended => "suspended",
            TaskState::Finished => "finished",
            TaskState::Other(state) => state,
        }
    }
}

impl From<&str> for TaskState {
    fn from(state: &str) -> Self {
        match state {
            "waiting" => TaskState::Waiting,
            "running" => TaskState::Running,
            "suspended" => TaskState::Suspended,
            "finished" => TaskState::Finished,
            other => TaskState::Other(other.to_string()),
        }
    }
}

impl From<String> for TaskState {
    fn from(state: String) -> Self {
        TaskState::from(state.as_str())
    }
}

impl From<TaskState> for String {
    fn from(state: TaskState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A polled task report
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatus {
    pub state: TaskState,

    /// Full report as returned by the remote service
    pub payload: Value,
}

impl TaskStatus {
    /// Classify a raw task report
    ///
    /// A report without a string `state` cannot be waited on any further and is
    /// treated as a failure terminal; the payload is preserved for diagnostics.
    pub fn from_remote(payload: Value) -> Self {
        let state = match payload.get("state").and_then(Value::as_str) {
            Some(state) => TaskState::from(state),
            None => TaskState::Other(String::new()),
        };
        Self { state, payload }
    }

    pub fn task_id(&self) -> Option<&str> {
        self.payload.get("task_id").and_then(Value::as_str)
    }
}

/// Reference to a task spawned by a remote call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTask {
    pub task_id: String,

    #[serde(rename = "_href", default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Acknowledgement ("call report") returned by remote calls that start tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskAck {
    #[serde(default)]
    pub error: Option<Value>,

    #[serde(default)]
    pub result: Option<Value>,

    #[serde(default)]
    pub spawned_tasks: Vec<SpawnedTask>,
}

impl TaskAck {
    /// Acknowledgement carrying no result, error, or tasks
    ///
    /// Returned when deleting a repository that is already gone.
    pub fn null() -> Self {
        Self::default()
    }

    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.spawned_tasks.iter().map(|task| task.task_id.as_str())
    }
}
