//! Proxy configuration
//!
//! Where the proxy listens and where the collection is mounted. Connection
//! settings for the remote service live in [`pulp_client::PulpConfig`].

/// Proxy configuration
#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Socket address to listen on
    pub bind_addr: String,

    /// URL prefix of the `pulp_repo` collection, normalized to a leading
    /// slash and no trailing slash ("" mounts it at the root)
    pub url_prefix: String,

    /// Origin used for hyperlinks (e.g., "https://proxy.example.com").
    /// When unset, links are built from the request's Host header.
    pub public_url: Option<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            url_prefix: "/pulp_repo".to_string(),
            public_url: None,
        }
    }
}

impl ProxyConfig {
    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - PROXY_BIND_ADDR (default: 0.0.0.0:8080)
    /// - PULP_REPO_PREFIX (default: /pulp_repo)
    /// - PROXY_PUBLIC_URL
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: lookup("PROXY_BIND_ADDR").unwrap_or(defaults.bind_addr),
            url_prefix: normalize_prefix(
                &lookup("PULP_REPO_PREFIX").unwrap_or(defaults.url_prefix),
            ),
            public_url: lookup("PROXY_PUBLIC_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self
            .url_prefix
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | '?' | '#'))
        {
            anyhow::bail!("url_prefix contains characters not allowed in a path");
        }

        if let Some(url) = &self.public_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("public_url must start with http:// or https://");
            }
        }

        Ok(())
    }
}

/// Normalize a mount prefix to "/segment[/segment...]" or ""
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
