//! Shared server state.

use crate::fetcher::QuotaSource;
use crate::session::{Session, SessionHandle, SessionId, SessionStore};
use crate::templates::{PageRenderer, TemplateError};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

/// Name of the cookie holding the session id.
pub const SESSION_COOKIE: &str = "rate_monitor_session";

/// State shared by every request handler.
pub struct AppState {
    pub(crate) sessions: SessionStore,
    pub(crate) source: Arc<dyn QuotaSource>,
    pub(crate) renderer: PageRenderer,
}

impl AppState {
    /// Creates the state around a quota source.
    ///
    /// # Errors
    ///
    /// Returns an error if the page templates fail to load.
    pub fn new(source: Arc<dyn QuotaSource>) -> Result<Self, TemplateError> {
        Ok(Self {
            sessions: SessionStore::new(),
            source,
            renderer: PageRenderer::new()?,
        })
    }

    /// Returns the live sessions.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Finds the live session named by the request's cookie.
    pub(crate) fn lookup(&self, jar: &CookieJar) -> Option<(SessionId, SessionHandle)> {
        let id = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| SessionId::parse(cookie.value()))?;
        self.sessions.get(id).map(|handle| (id, handle))
    }

    /// Registers `session` and returns the jar carrying its new cookie.
    pub(crate) fn start_session(&self, jar: CookieJar, session: Session) -> (CookieJar, SessionId) {
        let id = self.sessions.insert(session);
        let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict);

        (jar.add(cookie), id)
    }

    /// Drops the session and tells the browser to forget its cookie.
    pub(crate) fn end_session(&self, jar: CookieJar, id: SessionId) -> CookieJar {
        self.sessions.remove(id);
        forget_cookie(jar)
    }
}

/// Removes a session cookie the request carried, if any.
pub(crate) fn forget_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
