//! Repository action DTOs

use serde::{Deserialize, Serialize};

/// Copy all content of `source_repo_id` into the repository the request is sent to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociateRequest {
    pub source_repo_id: String,
}

/// Publish a repository through one of its distributors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    /// Distributor id
    pub id: String,
}
