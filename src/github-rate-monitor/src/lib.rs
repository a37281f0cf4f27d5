#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod dashboard;
pub mod fetcher;
pub mod quota;
pub mod server;
pub mod session;
pub mod templates;
pub mod time_format;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, GithubConfig, MonitorConfig};
pub use dashboard::{Action, DashboardModel, DashboardState, ErrorModel, ResourceSummary, View};
pub use fetcher::{FetchError, FetchResult, GithubQuotaFetcher, QuotaSource};
pub use quota::{QuotaSnapshot, RateLimitPayload, ResourceQuota};
pub use server::{router, AppState, Server, ServerError};
pub use session::{AccessToken, FetchState, Session, SessionId, SessionStore};
pub use templates::{PageRenderer, TemplateError};
pub use time_format::{format_timestamp, minutes_until_reset};
