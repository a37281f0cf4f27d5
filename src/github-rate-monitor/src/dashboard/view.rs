//! View models handed to the page templates.

use crate::fetcher::FetchError;
use crate::quota::{QuotaSnapshot, ResourceQuota};
use crate::session::{FetchState, Session};
use crate::time_format::{format_timestamp, minutes_until_reset_at};
use serde::Serialize;

/// Number of resource cards per grid row.
pub const CARDS_PER_ROW: usize = 3;

/// What the page shows for a session.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Login form, optionally with a validation warning.
    LoggedOut { warning: Option<String> },

    /// Token accepted, quotas are being fetched.
    Loading,

    /// The last fetch failed.
    ErrorShown(ErrorModel),

    /// Quotas are available.
    Dashboard(DashboardModel),
}

impl View {
    /// Derives the view for a session without fetching anything.
    #[must_use]
    pub fn of(session: &Session, now: u64) -> Self {
        if session.token().is_none() {
            return Self::LoggedOut { warning: None };
        }

        match session.fetch_state() {
            FetchState::NotFetched => Self::Loading,
            FetchState::Failed(error) => Self::ErrorShown(ErrorModel::from(error)),
            FetchState::Fetched(snapshot) => Self::Dashboard(DashboardModel::build(snapshot, now)),
        }
    }

    /// Login form with a warning.
    #[must_use]
    pub fn login_warning(warning: &str) -> Self {
        Self::LoggedOut {
            warning: Some(warning.to_string()),
        }
    }
}

/// A failed fetch as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorModel {
    /// The failure message.
    pub message: String,

    /// Whether to offer "Try Login Again".
    pub can_retry_login: bool,
}

impl From<&FetchError> for ErrorModel {
    fn from(error: &FetchError) -> Self {
        Self {
            message: error.to_string(),
            can_retry_login: error.is_authentication_failure(),
        }
    }
}

/// The full dashboard: the core summary plus a grid of the other resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardModel {
    /// Summary of the `core` resource, if the API reported one.
    pub core: Option<ResourceSummary>,

    /// Other resources in response order, [`CARDS_PER_ROW`] per row.
    pub rows: Vec<Vec<ResourceSummary>>,
}

impl DashboardModel {
    /// Builds the dashboard for a snapshot, with countdowns measured from `now`.
    #[must_use]
    pub fn build(snapshot: &QuotaSnapshot, now: u64) -> Self {
        let core = snapshot
            .core()
            .map(|quota| ResourceSummary::new(crate::quota::CORE_RESOURCE, quota, now));

        let cards: Vec<ResourceSummary> = snapshot
            .specific()
            .map(|(name, quota)| ResourceSummary::new(name, quota, now))
            .collect();

        let rows = cards
            .chunks(CARDS_PER_ROW)
            .map(<[ResourceSummary]>::to_vec)
            .collect();

        Self { core, rows }
    }

    /// Iterates over every non-core card.
    pub fn cards(&self) -> impl Iterator<Item = &ResourceSummary> {
        self.rows.iter().flatten()
    }
}

/// Display values for one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSummary {
    /// Resource name as reported by the API.
    pub name: String,
    /// Human-readable title.
    pub title: String,
    pub limit: u64,
    pub used: u64,
    pub remaining: u64,
    /// Reset instant in local time.
    pub reset_at: String,
    pub minutes_until_reset: u64,
    /// Usage ratio in `[0.0, 1.0]`.
    pub progress: f64,
    /// Usage as a percentage label, e.g. `0.2%`.
    pub percent: String,
}

impl ResourceSummary {
    /// Builds the summary for one resource.
    #[must_use]
    pub fn new(name: &str, quota: &ResourceQuota, now: u64) -> Self {
        let progress = quota.usage_ratio();
        Self {
            name: name.to_string(),
            title: display_name(name),
            limit: quota.limit,
            used: quota.used,
            remaining: quota.remaining,
            reset_at: format_timestamp(quota.reset),
            minutes_until_reset: minutes_until_reset_at(quota.reset, now),
            progress,
            percent: format!("{:.1}%", progress * 100.0),
        }
    }
}

/// Turns a resource name into a title: `code_scanning_upload` becomes
/// `Code Scanning Upload`.
#[must_use]
pub fn display_name(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut word_start = true;

    for c in name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if word_start {
                title.extend(c.to_uppercase());
            } else {
                title.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            title.push(c);
            word_start = true;
        }
    }

    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::AccessToken;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    const NOW: u64 = 1_700_000_000;

    fn quota(limit: u64, used: u64, reset: u64) -> ResourceQuota {
        ResourceQuota {
            limit,
            used,
            remaining: limit.saturating_sub(used),
            reset,
        }
    }

    fn snapshot(entries: &[(&str, ResourceQuota)]) -> QuotaSnapshot {
        QuotaSnapshot::new(
            entries
                .iter()
                .map(|(name, quota)| (name.to_string(), *quota))
                .collect::<IndexMap<_, _>>(),
        )
    }

    #[test]
    fn display_name_title_cases_words() {
        assert_eq!(display_name("core"), "Core");
        assert_eq!(display_name("graphql"), "Graphql");
        assert_eq!(display_name("code_scanning_upload"), "Code Scanning Upload");
        assert_eq!(display_name("SOURCE_IMPORT"), "Source Import");
        assert_eq!(display_name("audit_log2x"), "Audit Log2X");
    }

    #[test]
    fn summary_formats_core_counters() {
        let summary = ResourceSummary::new("core", &quota(5000, 10, NOW + 1800), NOW);

        assert_eq!(summary.limit, 5000);
        assert_eq!(summary.used, 10);
        assert_eq!(summary.remaining, 4990);
        assert_eq!(summary.minutes_until_reset, 30);
        assert_eq!(summary.progress, 0.002);
        assert_eq!(summary.percent, "0.2%");
        assert_eq!(summary.reset_at, format_timestamp(NOW + 1800));
    }

    #[test]
    fn summary_clamps_progress_and_countdown() {
        let summary = ResourceSummary::new("search", &quota(10, 25, NOW - 60), NOW);
        assert_eq!(summary.progress, 1.0);
        assert_eq!(summary.percent, "100.0%");
        assert_eq!(summary.minutes_until_reset, 0);

        let summary = ResourceSummary::new("search", &quota(0, 0, NOW), NOW);
        assert_eq!(summary.progress, 0.0);
        assert_eq!(summary.percent, "0.0%");
    }

    #[test]
    fn dashboard_puts_other_resources_in_rows_of_three() {
        let snapshot = snapshot(&[
            ("core", quota(5000, 10, NOW)),
            ("search", quota(30, 1, NOW)),
            ("graphql", quota(5000, 0, NOW)),
            ("integration_manifest", quota(5000, 0, NOW)),
            ("source_import", quota(100, 0, NOW)),
        ]);

        let model = DashboardModel::build(&snapshot, NOW);

        assert_eq!(model.core.as_ref().map(|core| core.limit), Some(5000));
        let names: Vec<Vec<&str>> = model
            .rows
            .iter()
            .map(|row| row.iter().map(|card| card.name.as_str()).collect())
            .collect();
        assert_eq!(
            names,
            vec![
                vec!["search", "graphql", "integration_manifest"],
                vec!["source_import"],
            ]
        );
    }

    #[test]
    fn dashboard_without_core_or_other_resources() {
        let model = DashboardModel::build(&QuotaSnapshot::default(), NOW);
        assert!(model.core.is_none());
        assert!(model.rows.is_empty());
        assert_eq!(model.cards().count(), 0);
    }

    #[test]
    fn view_follows_session_state() {
        let mut session = Session::new();
        assert_eq!(View::of(&session, NOW), View::LoggedOut { warning: None });

        session.set_token(AccessToken::new("ghp_test").unwrap());
        assert_eq!(View::of(&session, NOW), View::Loading);

        session.set_failure(FetchError::Authentication);
        assert_eq!(
            View::of(&session, NOW),
            View::ErrorShown(ErrorModel {
                message: "Authentication Failed: Invalid Token".to_string(),
                can_retry_login: true,
            })
        );

        session.set_failure(FetchError::Api { status: 403 });
        assert_eq!(
            View::of(&session, NOW),
            View::ErrorShown(ErrorModel {
                message: "API Error: 403".to_string(),
                can_retry_login: false,
            })
        );

        session.set_data(QuotaSnapshot::default());
        assert!(matches!(View::of(&session, NOW), View::Dashboard(_)));
    }
}
