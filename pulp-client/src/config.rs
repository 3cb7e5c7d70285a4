//! Client configuration
//!
//! Where the remote Pulp service lives and how to authenticate against it.
//! Built once per process and handed to [`crate::PulpClient::new`].

use std::time::Duration;

use crate::error::{ClientError, Result};
use crate::poll::PollPolicy;

/// Remote Pulp connection settings
#[derive(Debug, Clone)]
pub struct PulpConfig {
    /// Root of the Pulp web application (e.g., "https://pulpapi/pulp")
    pub base_url: String,

    /// Versioned API path below `base_url` (e.g., "/api/v2/")
    pub api_version_path: String,

    pub username: String,
    pub password: String,

    /// Validate the remote TLS certificate
    pub verify_tls: bool,

    /// Public origin under which published repositories are served
    pub public_repo_url: String,

    /// Timeout for a single HTTP exchange
    pub request_timeout: Duration,

    /// How `wait_for_task` re-polls
    pub poll_policy: PollPolicy,
}

impl Default for PulpConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pulpapi/pulp".to_string(),
            api_version_path: "/api/v2/".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            verify_tls: false,
            public_repo_url: "http://localhost/pulp/repos/".to_string(),
            request_timeout: Duration::from_secs(30),
            poll_policy: PollPolicy::default(),
        }
    }
}

impl PulpConfig {
    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables (all optional):
    /// - PULP_URL
    /// - PULP_API_PATH
    /// - PULP_USERNAME / PULP_PASSWORD
    /// - PULP_VERIFY_TLS (true/false)
    /// - PULP_PUBLIC_REPO_URL
    /// - PULP_REQUEST_TIMEOUT (seconds)
    /// - PULP_TASK_POLL_INTERVAL_MS / PULP_TASK_MAX_INTERVAL_MS
    /// - PULP_TASK_TIMEOUT (seconds, 0 waits forever)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let verify_tls = lookup("PULP_VERIFY_TLS")
            .and_then(|s| parse_flag(&s))
            .unwrap_or(defaults.verify_tls);

        let request_timeout = number("PULP_REQUEST_TIMEOUT")
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let poll_policy = PollPolicy {
            initial_interval: number("PULP_TASK_POLL_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_policy.initial_interval),
            max_interval: number("PULP_TASK_MAX_INTERVAL_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.poll_policy.max_interval),
            multiplier: defaults.poll_policy.multiplier,
            max_wait: match number("PULP_TASK_TIMEOUT") {
                Some(0) => None,
                Some(secs) => Some(Duration::from_secs(secs)),
                None => defaults.poll_policy.max_wait,
            },
        };

        Self {
            base_url: lookup("PULP_URL").unwrap_or(defaults.base_url),
            api_version_path: lookup("PULP_API_PATH").unwrap_or(defaults.api_version_path),
            username: lookup("PULP_USERNAME").unwrap_or(defaults.username),
            password: lookup("PULP_PASSWORD").unwrap_or(defaults.password),
            verify_tls,
            public_repo_url: lookup("PULP_PUBLIC_REPO_URL").unwrap_or(defaults.public_repo_url),
            request_timeout,
            poll_policy,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::InvalidConfig(
                "base_url must start with http:// or https://".to_string(),
            ));
        }

        if self.username.is_empty() {
            return Err(ClientError::InvalidConfig(
                "username cannot be empty".to_string(),
            ));
        }

        if self.poll_policy.initial_interval.is_zero() {
            return Err(ClientError::InvalidConfig(
                "task poll interval must be greater than 0".to_string(),
            ));
        }

        if self.poll_policy.max_interval < self.poll_policy.initial_interval {
            return Err(ClientError::InvalidConfig(
                "task max interval must not be below the poll interval".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
