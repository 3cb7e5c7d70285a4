//! Repository serialization
//!
//! Renders repositories as hyperlinked representations. Fields are read
//! through [`FieldSource`] so the same serializer works for remote records
//! (read by attribute) and for raw request objects (read by key) that have not
//! been saved yet.

use pulp_core::domain::repository::RepositoryRecord;
use serde::Serialize;
use serde_json::{Map, Value};

/// Field lookup strategy of a serializable entity
pub trait FieldSource {
    /// Value of `name`, or `None` when the entity has no such field
    fn field(&self, name: &str) -> Option<Value>;
}

impl FieldSource for RepositoryRecord {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "repo_id" => Some(Value::String(self.repo_id.clone())),
            "display_name" => Some(Value::String(self.display_name.clone())),
            "details" => Some(self.details.clone()),
            _ => None,
        }
    }
}

/// Key lookup, for request objects that have not been saved yet
impl FieldSource for Map<String, Value> {
    fn field(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

/// Builds the self link of a collection member from its lookup field
#[derive(Debug, Clone)]
pub struct IdentityLink {
    /// Origin and collection path, e.g. "http://proxy.local/pulp_repo"
    collection_url: String,
    lookup_field: &'static str,
}

impl IdentityLink {
    pub fn new(origin: &str, prefix: &str, lookup_field: &'static str) -> Self {
        Self {
            collection_url: format!("{}{}", origin.trim_end_matches('/'), prefix),
            lookup_field,
        }
    }

    /// Link to `source`, or `None` when its lookup field is missing or null
    ///
    /// The key is encoded as a single path segment. Keys that are dot
    /// segments cannot be addressed and get no link.
    pub fn url_for(&self, source: &dyn FieldSource) -> Option<String> {
        let key = match source.field(self.lookup_field)? {
            Value::Null => return None,
            Value::String(key) => key,
            other => other.to_string(),
        };
        if key.is_empty() || key == "." || key == ".." {
            return None;
        }
        Some(format!("{}/{}/", self.collection_url, urlencoding::encode(&key)))
    }
}

/// Wire representation of a repository
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerializedRepo {
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Full remote object; never accepted on input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Serializer for the `pulp_repo` collection
#[derive(Debug, Clone)]
pub struct PulpRepoSerializer {
    link: IdentityLink,
}

impl PulpRepoSerializer {
    pub fn new(link: IdentityLink) -> Self {
        Self { link }
    }

    pub fn serialize(&self, source: &dyn FieldSource) -> SerializedRepo {
        let text = |name: &str| match source.field(name)? {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => Some(other.to_string()),
        };

        SerializedRepo {
            url: self.link.url_for(source),
            repo_id: text("repo_id"),
            display_name: text("display_name"),
            details: source.field("details"),
        }
    }

    pub fn serialize_many<T: FieldSource>(&self, sources: &[T]) -> Vec<SerializedRepo> {
        sources.iter().map(|source| self.serialize(source)).collect()
    }
}
