//! GitHub `/rate_limit` client.

use super::{FetchError, FetchResult, QuotaSource};
use crate::config::GithubConfig;
use crate::quota::QuotaSnapshot;
use async_trait::async_trait;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

/// Media type pinning the v3 REST API.
pub const GITHUB_V3_ACCEPT: &str = "application/vnd.github.v3+json";

/// Fetches quota snapshots from the GitHub REST API.
///
/// Each call sends exactly one request, bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct GithubQuotaFetcher {
    client: reqwest::Client,
    api_url: String,
}

impl GithubQuotaFetcher {
    /// Builds a fetcher from the `[github]` settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized (e.g. the
    /// TLS backend fails to load).
    pub fn new(config: &GithubConfig) -> Result<Self, reqwest::Error> {
        if config.accept_invalid_certs {
            warn!(
                api_url = %config.api_url,
                "TLS certificate verification is disabled for GitHub requests"
            );
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    /// Returns the endpoint this fetcher queries.
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl QuotaSource for GithubQuotaFetcher {
    async fn fetch(&self, token: &str) -> FetchResult {
        let mut authorization = HeaderValue::from_str(&format!("token {token}")).map_err(|_| {
            FetchError::Transport("Token contains characters not allowed in a header".to_string())
        })?;
        authorization.set_sensitive(true);

        debug!(api_url = %self.api_url, "Fetching rate limits");
        let response = self
            .client
            .get(&self.api_url)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, GITHUB_V3_ACCEPT)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Rate limit request failed");
                FetchError::transport(&e)
            })?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let body = response.bytes().await.map_err(|e| {
                    warn!(error = %e, "Failed to read rate limit response");
                    FetchError::transport(&e)
                })?;
                let snapshot = QuotaSnapshot::from_json(&body).map_err(|e| {
                    warn!(error = %e, "Failed to decode rate limit response");
                    FetchError::Transport(format!("Invalid rate limit response: {e}"))
                })?;
                info!(resources = snapshot.len(), "Fetched rate limits");
                Ok(snapshot)
            }
            StatusCode::UNAUTHORIZED => {
                warn!(status = status.as_u16(), "GitHub rejected the access token");
                Err(FetchError::Authentication)
            }
            _ => {
                warn!(status = status.as_u16(), "GitHub returned an error status");
                Err(FetchError::Api {
                    status: status.as_u16(),
                })
            }
        }
    }
}
