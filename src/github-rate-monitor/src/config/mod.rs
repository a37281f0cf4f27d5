//! Configuration loading.
//!
//! Settings come from an optional `config.toml`:
//!
//! ```toml
//! bind = "127.0.0.1:8501"
//!
//! [github]
//! api-url = "https://api.github.com/rate_limit"
//! timeout-secs = 10
//! accept-invalid-certs = false
//! user-agent = "github-rate-monitor/0.1.0"
//! ```
//!
//! Every key is optional. The access token is never part of the
//! configuration; it is only entered through the login page.

mod error;
mod github;

pub use error::ConfigError;
pub use github::{default_api_url, default_timeout_secs, default_user_agent, GithubConfig};

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use tracing::{debug, info};

/// Top-level structure of `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct MonitorConfig {
    /// Address the dashboard listens on.
    pub bind: SocketAddr,

    /// Settings for the rate limit request.
    pub github: GithubConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            github: GithubConfig::default(),
        }
    }
}

/// Default listen address.
#[must_use]
pub fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8501))
}

impl MonitorConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable, not valid TOML or
    /// fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        info!(path = %shown, "Loading configuration");

        if !path.exists() {
            return Err(ConfigError::NotFound { path: shown });
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: shown.clone(),
            source,
        })?;

        let config = Self::parse(&contents, &shown)?;
        debug!(bind = %config.bind, api_url = %config.github.api_url, "Loaded configuration");
        Ok(config)
    }

    /// Parses and validates TOML content. `path` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or fails validation.
    pub fn parse(contents: &str, path: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Malformed {
            path: path.to_string(),
            source,
        })?;
        config.validate(path)?;
        Ok(config)
    }

    /// Validates every section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for the first invalid value.
    pub fn validate(&self, path: &str) -> Result<(), ConfigError> {
        self.github.validate(path)
    }
}
