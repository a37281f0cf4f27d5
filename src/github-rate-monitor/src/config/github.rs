//! GitHub API client settings.

use super::ConfigError;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

/// Settings for the `/rate_limit` request, the `[github]` table of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct GithubConfig {
    /// Full URL of the rate limit endpoint.
    pub api_url: String,

    /// Upper bound on the whole request, in seconds.
    pub timeout_secs: u64,

    /// Skip TLS certificate verification. Only meant for hosts behind broken
    /// certificate chains.
    pub accept_invalid_certs: bool,

    /// `User-Agent` header value; GitHub rejects requests without one.
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
            accept_invalid_certs: false,
            user_agent: default_user_agent(),
        }
    }
}

/// Default rate limit endpoint.
#[must_use]
pub fn default_api_url() -> String {
    "https://api.github.com/rate_limit".to_string()
}

/// Default request timeout in seconds.
#[must_use]
pub fn default_timeout_secs() -> u64 {
    10
}

/// Default `User-Agent`, derived from the crate version.
#[must_use]
pub fn default_user_agent() -> String {
    concat!("github-rate-monitor/", env!("CARGO_PKG_VERSION")).to_string()
}

impl GithubConfig {
    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks that the settings can produce a working client.
    ///
    /// `path` names the config source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-HTTP(S) URL, a zero
    /// timeout or an empty user agent.
    pub fn validate(&self, path: &str) -> Result<(), ConfigError> {
        let invalid = |key: &'static str, reason: String| ConfigError::InvalidValue {
            path: path.to_string(),
            key,
            reason,
        };

        let url = Url::parse(&self.api_url)
            .map_err(|e| invalid("api-url", format!("'{}' is not a URL: {e}", self.api_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(
                "api-url",
                format!("scheme must be http or https, got '{}'", url.scheme()),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(invalid("timeout-secs", "must be greater than 0".to_string()));
        }

        if self.user_agent.trim().is_empty() {
            return Err(invalid("user-agent", "must not be empty".to_string()));
        }

        Ok(())
    }
}
