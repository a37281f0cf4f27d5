//! Dashboard state machine.
//!
//! A session moves between four states:
//!
//! ```text
//! LoggedOut --Connect--> Loading --fetch ok--> Dashboard
//!     ^                     |  ^                  |
//!     |                fetch failed  \--Refresh---/
//!     |                     v
//!     \--TryLoginAgain-- ErrorShown (authentication failures only)
//! ```
//!
//! Logout returns to `LoggedOut` from anywhere. Transitions only happen on a
//! user [`Action`] or when the fetch completes; nothing polls in the
//! background.

mod view;

pub use view::{display_name, DashboardModel, ErrorModel, ResourceSummary, View, CARDS_PER_ROW};

use crate::fetcher::QuotaSource;
use crate::session::{AccessToken, FetchState, Session};
use crate::time_format::unix_now;
use std::fmt;
use tracing::{debug, info};

/// Warning shown when Connect is submitted without a token.
pub const EMPTY_TOKEN_WARNING: &str = "Please enter a token.";

/// The view a session is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardState {
    /// No token; the login form is shown.
    LoggedOut,
    /// Token present, nothing fetched yet.
    Loading,
    /// The last fetch failed.
    ErrorShown,
    /// Quotas are available.
    Dashboard,
}

/// A user action.
#[derive(Clone, PartialEq, Eq)]
pub enum Action {
    /// Submit the login form.
    Connect { token: String },
    /// Drop the fetched data and fetch again.
    Refresh,
    /// Forget the token and any data.
    Logout,
    /// Return to the login form after an authentication failure.
    TryLoginAgain,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connect { .. } => f.write_str("Connect { token: <redacted> }"),
            Self::Refresh => f.write_str("Refresh"),
            Self::Logout => f.write_str("Logout"),
            Self::TryLoginAgain => f.write_str("TryLoginAgain"),
        }
    }
}

/// Applies a user action to a session.
///
/// Returns the validation warning to show on the login form when the action
/// was rejected.
pub fn apply(session: &mut Session, action: Action) -> Option<&'static str> {
    match action {
        Action::Connect { token } => match AccessToken::new(&token) {
            Some(token) => {
                info!("Connecting with a new access token");
                session.set_token(token);
                None
            }
            None => {
                debug!("Rejected empty access token");
                Some(EMPTY_TOKEN_WARNING)
            }
        },
        Action::Refresh => {
            if session.token().is_some() {
                info!("Refreshing rate limits");
                session.clear_data();
            }
            None
        }
        Action::Logout => {
            info!("Logging out");
            session.clear_token();
            None
        }
        Action::TryLoginAgain => {
            if let FetchState::Failed(error) = session.fetch_state() {
                if error.is_authentication_failure() {
                    info!("Returning to login after authentication failure");
                    session.clear_token();
                    return None;
                }
            }
            debug!(state = ?session.state(), "Ignoring login retry outside authentication failure");
            None
        }
    }
}

/// Resolves the view for a session.
///
/// A session in [`DashboardState::Loading`] is fetched inline: the call only
/// returns once `source` has answered, and the result is stored in the
/// session before the view is derived. Every other state is rendered as is,
/// so a failed fetch is never retried on its own.
pub async fn render(session: &mut Session, source: &dyn QuotaSource) -> View {
    if session.state() == DashboardState::Loading {
        if let Some(token) = session.token().cloned() {
            let result = source.fetch(token.expose()).await;
            session.record(result);
        }
    }

    View::of(session, unix_now())
}
