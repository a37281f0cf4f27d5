//! Quota data returned by the GitHub `/rate_limit` endpoint.
//!
//! The endpoint reports one [`ResourceQuota`] per API category (`core`,
//! `search`, `graphql`, ...). Older responses carry the core quota in a
//! top-level `rate` object instead; [`QuotaSnapshot::from_payload`] folds that
//! shape into the `core` entry so the rest of the crate only deals with one
//! layout.

mod payload;
mod resource;
mod snapshot;

pub use payload::RateLimitPayload;
pub use resource::ResourceQuota;
pub use snapshot::{QuotaSnapshot, CORE_RESOURCE};
