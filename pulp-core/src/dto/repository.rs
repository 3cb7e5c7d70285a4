//! Repository DTOs

use serde::{Deserialize, Serialize};

/// Request to create a repository on the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRepository {
    pub id: String,
    pub display_name: String,
}
