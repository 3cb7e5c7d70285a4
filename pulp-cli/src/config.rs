//! Configuration module
//!
//! Layers command-line flags over the environment-derived client settings.

use pulp_client::PulpConfig;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Settings for the remote Pulp service
    pub pulp: PulpConfig,
}

impl Config {
    pub fn load(
        pulp_url: Option<String>,
        username: Option<String>,
        password: Option<String>,
        verify_tls: bool,
    ) -> Self {
        let mut pulp = PulpConfig::from_env();

        if let Some(url) = pulp_url {
            pulp.base_url = url;
        }
        if let Some(username) = username {
            pulp.username = username;
        }
        if let Some(password) = password {
            pulp.password = password;
        }
        if verify_tls {
            pulp.verify_tls = true;
        }

        Self { pulp }
    }
}
