//! Distributor (target) DTOs

use serde::{Deserialize, Serialize};

/// Distributor id used for every repository's publication target
pub const TARGET_DISTRIBUTOR_ID: &str = "target";

/// The only distributor type the proxy configures
pub const YUM_DISTRIBUTOR: &str = "yum_distributor";

/// Distributor configuration attached to a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributorConfig {
    pub distributor_id: String,
    pub distributor_type_id: String,
    pub distributor_config: PublishSettings,
    pub auto_publish: bool,
}

/// How published content is served
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishSettings {
    pub http: bool,
    pub https: bool,
    pub relative_url: String,
}

impl DistributorConfig {
    /// Publication target for `repo_id`
    ///
    /// Served over plain HTTP at `relative_url = repo_id` and republished
    /// automatically after every sync. HTTPS stays off as the remote service
    /// has no default certificates.
    pub fn target_for(repo_id: &str) -> Self {
        Self {
            distributor_id: TARGET_DISTRIBUTOR_ID.to_string(),
            distributor_type_id: YUM_DISTRIBUTOR.to_string(),
            distributor_config: PublishSettings {
                http: true,
                https: false,
                relative_url: repo_id.to_string(),
            },
            auto_publish: true,
        }
    }
}
