//! Configuration error types.

use thiserror::Error;

/// Reasons a configuration cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file given on the command line does not exist.
    #[error("Config file not found: {path}")]
    NotFound { path: String },

    /// The config file exists but could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not TOML, or names a key the monitor does not know.
    #[error("Malformed config file '{path}': {source}")]
    Malformed {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// A setting parsed but cannot produce a working client.
    #[error("Invalid '{key}' in {path}: {reason}")]
    InvalidValue {
        path: String,
        key: &'static str,
        reason: String,
    },
}
