//! Error types for the Pulp client

use std::time::Duration;

use pulp_core::domain::task::TaskStatus;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the remote Pulp service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a reply arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Remote service answered with an unexpected status code
    #[error("Pulp error (status {status}): {body}")]
    RemoteService {
        /// HTTP status code
        status: u16,
        /// Raw reply body
        body: String,
    },

    /// Resource not found on the remote service
    #[error("Not found: {what}")]
    NotFound {
        /// Request path, or a description of the missing resource
        what: String,
        /// Reply body as the remote service sent it; empty when no request was made
        body: String,
    },

    /// Remote service refused a duplicate
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A remote task reached a terminal state other than `finished`
    #[error("Pulp task failed in state '{}': {}", .0.state, .0.payload)]
    TaskFailed(TaskStatus),

    /// Gave up waiting on a remote task
    #[error("Timed out after {waited:?} waiting for task {task_id}")]
    TaskTimedOut { task_id: String, waited: Duration },

    /// Waiting on a remote task was cancelled locally
    #[error("Cancelled while waiting for task {task_id}")]
    TaskCancelled { task_id: String },

    /// Failed to parse a reply
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Create a remote service error from status code and body
    pub fn remote(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteService {
            status,
            body: body.into(),
        }
    }

    /// Create a not-found error that did not come from a remote reply
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound {
            what: what.into(),
            body: String::new(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status reported by the remote service, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteService { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Conflict(_) => Some(409),
            Self::RequestFailed(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_of_remote_errors() {
        assert_eq!(ClientError::remote(503, "down").status(), Some(503));
        assert_eq!(ClientError::not_found("r1").status(), Some(404));
        assert_eq!(ClientError::ParseError("bad".into()).status(), None);
    }

    #[test]
    fn test_task_failed_message_carries_payload() {
        let status = TaskStatus::from_remote(json!({"state": "error", "task_id": "t1"}));
        let message = ClientError::TaskFailed(status).to_string();
        assert!(message.contains("'error'"));
        assert!(message.contains("\"task_id\":\"t1\""));
    }
}
