//! Normalized quota snapshot.

use super::{RateLimitPayload, ResourceQuota};
use indexmap::IndexMap;

/// Name of the general-purpose REST quota.
pub const CORE_RESOURCE: &str = "core";

/// All resource quotas from one successful fetch, keyed by resource name.
///
/// Resources keep the order in which the API listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotaSnapshot {
    resources: IndexMap<String, ResourceQuota>,
}

impl QuotaSnapshot {
    /// Creates a snapshot from already-normalized resources.
    #[must_use]
    pub fn new(resources: IndexMap<String, ResourceQuota>) -> Self {
        Self { resources }
    }

    /// Normalizes a response body into a snapshot.
    ///
    /// A legacy top-level `rate` is exposed as `core`, unless the payload
    /// already lists `resources.core`, in which case `rate` is ignored.
    #[must_use]
    pub fn from_payload(payload: RateLimitPayload) -> Self {
        let RateLimitPayload {
            mut resources,
            rate,
        } = payload;

        if let Some(rate) = rate {
            resources.entry(CORE_RESOURCE.to_string()).or_insert(rate);
        }

        Self { resources }
    }

    /// Parses and normalizes a raw JSON response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not a valid `/rate_limit` payload.
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let payload: RateLimitPayload = serde_json::from_slice(body)?;
        Ok(Self::from_payload(payload))
    }

    /// Returns the core quota, if reported.
    #[must_use]
    pub fn core(&self) -> Option<&ResourceQuota> {
        self.resources.get(CORE_RESOURCE)
    }

    /// Iterates over every resource except `core`, in response order.
    pub fn specific(&self) -> impl Iterator<Item = (&str, &ResourceQuota)> {
        self.resources
            .iter()
            .filter(|(name, _)| name.as_str() != CORE_RESOURCE)
            .map(|(name, quota)| (name.as_str(), quota))
    }

    /// Returns the quota for a named resource.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResourceQuota> {
        self.resources.get(name)
    }

    /// Number of resources in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if the API reported no resources at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
