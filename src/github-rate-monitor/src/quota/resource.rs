//! Quota counters for a single API resource.

use serde::{Deserialize, Serialize};

/// Quota counters for one rate-limited API resource.
///
/// Missing fields in the response default to 0. `used + remaining == limit`
/// is expected from GitHub but not checked here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceQuota {
    /// Total requests allowed per window.
    pub limit: u64,

    /// Requests consumed in the current window.
    pub used: u64,

    /// Requests remaining in the current window.
    pub remaining: u64,

    /// Unix timestamp when the window resets.
    pub reset: u64,
}

impl ResourceQuota {
    /// Returns the consumed share of the quota, clamped to `[0.0, 1.0]`.
    ///
    /// A zero limit yields 0.0.
    #[must_use]
    pub fn usage_ratio(&self) -> f64 {
        if self.limit == 0 {
            return 0.0;
        }
        (self.used as f64 / self.limit as f64).min(1.0)
    }
}
