//! Fetching quota snapshots.
//!
//! [`QuotaSource`] is the seam between the dashboard and the network: the
//! server uses [`GithubQuotaFetcher`], tests plug in canned results.

mod client;
mod error;

pub use client::{GithubQuotaFetcher, GITHUB_V3_ACCEPT};
pub use error::FetchError;

use crate::quota::QuotaSnapshot;
use async_trait::async_trait;

/// Outcome of a single fetch. There is no partial success.
pub type FetchResult = Result<QuotaSnapshot, FetchError>;

/// Something that can report the quotas for an access token.
#[async_trait]
pub trait QuotaSource: Send + Sync {
    /// Performs one fetch for `token`. Implementations must not retry.
    async fn fetch(&self, token: &str) -> FetchResult;
}
