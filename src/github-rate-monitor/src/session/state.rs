//! Per-session state.

use super::AccessToken;
use crate::dashboard::DashboardState;
use crate::fetcher::{FetchError, FetchResult};
use crate::quota::QuotaSnapshot;

/// Result of the most recent fetch for the current token.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    /// Nothing fetched since login or the last refresh.
    #[default]
    NotFetched,

    /// The last fetch succeeded. An empty snapshot still counts as fetched.
    Fetched(QuotaSnapshot),

    /// The last fetch failed; shown until the user acts.
    Failed(FetchError),
}

/// State of one dashboard session: the token and what was fetched with it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<AccessToken>,
    fetch: FetchState,
}

impl Session {
    /// Creates a logged-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current token.
    #[must_use]
    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Stores a new token. Anything fetched with a previous token is dropped.
    pub fn set_token(&mut self, token: AccessToken) {
        self.token = Some(token);
        self.clear_data();
    }

    /// Logs out: removes the token together with any fetched data.
    pub fn clear_token(&mut self) {
        self.token = None;
        self.clear_data();
    }

    /// Returns the last successfully fetched snapshot.
    #[must_use]
    pub fn data(&self) -> Option<&QuotaSnapshot> {
        match &self.fetch {
            FetchState::Fetched(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    /// Stores a successfully fetched snapshot.
    pub fn set_data(&mut self, snapshot: QuotaSnapshot) {
        self.fetch = FetchState::Fetched(snapshot);
    }

    /// Stores a failed fetch.
    pub fn set_failure(&mut self, error: FetchError) {
        self.fetch = FetchState::Failed(error);
    }

    /// Stores the outcome of a fetch, whichever it was.
    pub fn record(&mut self, result: FetchResult) {
        match result {
            Ok(snapshot) => self.set_data(snapshot),
            Err(error) => self.set_failure(error),
        }
    }

    /// Forgets the last fetch so the next render fetches again.
    pub fn clear_data(&mut self) {
        self.fetch = FetchState::NotFetched;
    }

    /// Returns the result of the last fetch.
    #[must_use]
    pub fn fetch_state(&self) -> &FetchState {
        &self.fetch
    }

    /// Returns which dashboard view this session is in.
    #[must_use]
    pub fn state(&self) -> DashboardState {
        match (&self.token, &self.fetch) {
            (None, _) => DashboardState::LoggedOut,
            (Some(_), FetchState::NotFetched) => DashboardState::Loading,
            (Some(_), FetchState::Failed(_)) => DashboardState::ErrorShown,
            (Some(_), FetchState::Fetched(_)) => DashboardState::Dashboard,
        }
    }
}
