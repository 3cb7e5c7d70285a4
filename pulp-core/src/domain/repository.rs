//! Repository domain model
//!
//! A repository as reported by the remote Pulp service, reduced to the
//! identifier and display name the proxy exposes, with the full raw reply kept
//! alongside for diagnostics.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A remote repository
///
/// Built fresh from every remote reply and never cached: the remote service
/// owns `repo_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    /// Identifier assigned by the remote service
    pub repo_id: String,

    /// Human readable name
    pub display_name: String,

    /// The remote service's complete JSON object for this repository
    pub details: Value,
}

impl RepositoryRecord {
    /// Convert a raw remote repository object
    ///
    /// The remote `id` is required. A missing or null `display_name` falls back
    /// to the id, which is what the remote service itself does on creation.
    pub fn from_remote(raw: Value) -> Result<Self, String> {
        let repo_id = raw
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| format!("repository object has no string `id`: {}", raw))?
            .to_string();

        let display_name = match raw.get("display_name") {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Null) | None => repo_id.clone(),
            Some(other) => {
                return Err(format!(
                    "repository {} has a non-string display_name: {}",
                    repo_id, other
                ));
            }
        };

        Ok(Self {
            repo_id,
            display_name,
            details: raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_remote_keeps_raw_details() {
        let raw = json!({
            "id": "r1",
            "display_name": "Repo One",
            "content_unit_counts": {"rpm": 3},
        });

        let record = RepositoryRecord::from_remote(raw.clone()).unwrap();
        assert_eq!(record.repo_id, "r1");
        assert_eq!(record.display_name, "Repo One");
        assert_eq!(record.details, raw);
    }

    #[test]
    fn test_from_remote_display_name_defaults_to_id() {
        let record = RepositoryRecord::from_remote(json!({"id": "r2", "display_name": null}))
            .unwrap();
        assert_eq!(record.display_name, "r2");
    }

    #[test]
    fn test_from_remote_requires_id() {
        assert!(RepositoryRecord::from_remote(json!({"display_name": "x"})).is_err());
        assert!(RepositoryRecord::from_remote(json!({"id": 7})).is_err());
    }
}
