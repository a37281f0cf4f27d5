//! Dashboard sessions.
//!
//! Each logged-in browser gets its own [`Session`], looked up by a
//! [`SessionId`] kept in a cookie. A session exists only while it holds a
//! token. Sessions share nothing; the [`SessionStore`] only hands out
//! handles. A handle is an async mutex so that one session's requests,
//! including the fetch they may trigger, run strictly one after another.

mod state;
mod token;

pub use state::{FetchState, Session};
pub use token::AccessToken;

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Shared, lockable handle to one session.
pub type SessionHandle = Arc<tokio::sync::Mutex<Session>>;

/// Opaque identifier of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an id from its cookie value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// In-memory registry of live sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `session` under a freshly generated id.
    pub fn insert(&self, session: Session) -> SessionId {
        let id = SessionId::generate();
        self.sessions
            .lock()
            .insert(id, Arc::new(tokio::sync::Mutex::new(session)));
        debug!(session = %id, "Started new session");
        id
    }

    /// Forgets the session for `id`. Requests already holding its handle
    /// finish against the detached session.
    pub fn remove(&self, id: SessionId) -> Option<SessionHandle> {
        let removed = self.sessions.lock().remove(&id);
        if removed.is_some() {
            debug!(session = %id, "Ended session");
        }
        removed
    }

    /// Returns the session for `id`, if it exists.
    #[must_use]
    pub fn get(&self, id: SessionId) -> Option<SessionHandle> {
        self.sessions.lock().get(&id).cloned()
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Returns true if no session is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
