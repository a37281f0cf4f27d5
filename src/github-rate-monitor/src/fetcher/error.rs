//! Fetch error types.

use thiserror::Error;

/// Reasons a fetch can fail. None of them are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API rejected the token (HTTP 401).
    #[error("Authentication Failed: Invalid Token")]
    Authentication,

    /// Any other non-200 response.
    #[error("API Error: {status}")]
    Api { status: u16 },

    /// The request never produced a usable response: DNS, connection,
    /// timeout, TLS or an undecodable body.
    #[error("{0}")]
    Transport(String),
}

impl FetchError {
    /// Returns true if logging in again could fix this failure.
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Builds a [`Transport`][`FetchError::Transport`] error from an error and
    /// its full source chain.
    pub(crate) fn transport(error: &(dyn std::error::Error + 'static)) -> Self {
        let mut message = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = cause.source();
        }
        Self::Transport(message)
    }
}
