//! Repository Service
//!
//! Validates local requests and forwards them to the remote Pulp service.

use std::collections::BTreeMap;

use pulp_client::{ClientError, PulpClient};
use pulp_core::domain::repository::RepositoryRecord;
use serde_json::Value;

/// Validation messages keyed by the offending field
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key for errors not tied to a single field
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Service error type
#[derive(Debug)]
pub enum RepoError {
    ValidationError(FieldErrors),
    NotFound(String),
    Conflict(String),
    RemoteError(ClientError),
}

impl From<ClientError> for RepoError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound { what, .. } => RepoError::NotFound(what),
            ClientError::Conflict(body) => RepoError::Conflict(body),
            other => RepoError::RemoteError(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, RepoError>;

/// A create request that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepository {
    pub repo_id: String,
    pub display_name: String,
}

/// List all remote repositories
pub async fn list_repos(client: &PulpClient) -> Result<Vec<RepositoryRecord>> {
    let repos = client.list_repositories().await?;
    Ok(repos)
}

/// Get a remote repository by ID
pub async fn get_repo(client: &PulpClient, repo_id: &str) -> Result<RepositoryRecord> {
    let repo = client.get_repository(repo_id).await?;
    Ok(repo)
}

/// Create a remote repository from a raw request body
pub async fn create_repo(client: &PulpClient, payload: &Value) -> Result<RepositoryRecord> {
    // Validate request
    let new_repo = validate_create_request(payload)?;

    let repo = client
        .create_repository(&new_repo.repo_id, &new_repo.display_name)
        .await?;

    tracing::info!("Repository created: {} ({})", repo.display_name, repo.repo_id);

    Ok(repo)
}

// =============================================================================
// Validation
// =============================================================================

/// Check a create request
///
/// `repo_id` and `display_name` are required strings; surrounding whitespace
/// is trimmed before the blank check. Read-only fields (`url`, `details`) are
/// ignored.
pub fn validate_create_request(payload: &Value) -> Result<NewRepository> {
    let Some(fields) = payload.as_object() else {
        let mut errors = FieldErrors::new();
        errors.insert(
            NON_FIELD_ERRORS.to_string(),
            vec![format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(payload)
            )],
        );
        return Err(RepoError::ValidationError(errors));
    };

    let mut errors = FieldErrors::new();
    let repo_id = char_field(fields.get("repo_id"), "repo_id", &mut errors);
    let display_name = char_field(fields.get("display_name"), "display_name", &mut errors);

    match (repo_id, display_name) {
        (Some(repo_id), Some(display_name)) if errors.is_empty() => Ok(NewRepository {
            repo_id,
            display_name,
        }),
        _ => Err(RepoError::ValidationError(errors)),
    }
}

fn char_field(value: Option<&Value>, name: &str, errors: &mut FieldErrors) -> Option<String> {
    let message = match value {
        None => "This field is required.",
        Some(Value::Null) => "This field may not be null.",
        Some(Value::String(s)) if s.trim().is_empty() => "This field may not be blank.",
        Some(Value::String(s)) => return Some(s.trim().to_string()),
        Some(Value::Number(n)) => return Some(n.to_string()),
        Some(_) => "Not a valid string.",
    };

    errors
        .entry(name.to_string())
        .or_default()
        .push(message.to_string());
    None
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
