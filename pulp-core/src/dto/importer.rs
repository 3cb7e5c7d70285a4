//! Importer (feed) DTOs

use serde::{Deserialize, Serialize};

/// The only importer type the proxy configures
pub const YUM_IMPORTER: &str = "yum_importer";

/// Importer configuration attached to a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImporterConfig {
    pub importer_type_id: String,

    /// Absent (not null) when the repository has no feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importer_config: Option<FeedConfig>,
}

/// Where the importer pulls content from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub feed: String,
}

impl ImporterConfig {
    /// A yum importer, optionally fed from `feed_url`
    pub fn yum(feed_url: Option<&str>) -> Self {
        Self {
            importer_type_id: YUM_IMPORTER.to_string(),
            importer_config: feed_url.map(|feed| FeedConfig {
                feed: feed.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_feed_omits_config_key() {
        let value = serde_json::to_value(ImporterConfig::yum(None)).unwrap();
        assert_eq!(value, json!({"importer_type_id": "yum_importer"}));
    }

    #[test]
    fn test_feed_url_is_nested() {
        let value =
            serde_json::to_value(ImporterConfig::yum(Some("http://mirror/el7/"))).unwrap();
        assert_eq!(
            value,
            json!({
                "importer_type_id": "yum_importer",
                "importer_config": {"feed": "http://mirror/el7/"}
            })
        );
    }
}
