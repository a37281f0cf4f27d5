//! Raw `/rate_limit` response body.

use super::ResourceQuota;
use indexmap::IndexMap;
use serde::Deserialize;

/// The `/rate_limit` response body as sent by GitHub.
///
/// Current responses list every resource under `resources`; legacy responses
/// only carry the core quota as a top-level `rate` object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RateLimitPayload {
    /// Per-resource quotas keyed by resource name, in response order.
    pub resources: IndexMap<String, ResourceQuota>,

    /// Legacy top-level core quota.
    pub rate: Option<ResourceQuota>,
}
