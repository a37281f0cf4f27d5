//! Request handlers, one per user action.
//!
//! Only a successful Connect starts a session. Requests without a live
//! session see the login form, and actions that clear the token end the
//! session.

use super::state::forget_cookie;
use super::{AppState, ServerError};
use crate::dashboard::{self, Action, DashboardState, View};
use crate::session::Session;
use axum::extract::{Form, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Login form body.
#[derive(Deserialize)]
pub struct ConnectForm {
    #[serde(default)]
    pub token: String,
}

/// `GET /`: renders the session's current view, fetching first if it is
/// loading. Without a session this is the login form.
pub async fn index(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, ServerError> {
    let Some((id, handle)) = state.lookup(&jar) else {
        return page(&state, forget_cookie(jar), &View::LoggedOut { warning: None });
    };

    async {
        let mut session = handle.lock().await;
        let view = dashboard::render(&mut session, state.source.as_ref()).await;
        page(&state, jar, &view)
    }
    .instrument(info_span!("index", session = %id))
    .await
}

/// `POST /connect`: stores the token, or shows the login form again with a
/// warning if it was empty.
pub async fn connect(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ConnectForm>,
) -> Result<Response, ServerError> {
    let action = Action::Connect { token: form.token };

    let Some((id, handle)) = state.lookup(&jar) else {
        let mut session = Session::default();
        let warning = info_span!("connect").in_scope(|| dashboard::apply(&mut session, action));
        if let Some(warning) = warning {
            return page(&state, forget_cookie(jar), &View::login_warning(warning));
        }
        let (jar, _) = state.start_session(jar, session);
        return page(&state, jar, &View::Loading);
    };

    async {
        let mut session = handle.lock().await;
        let view = match dashboard::apply(&mut session, action) {
            Some(warning) => View::login_warning(warning),
            None => View::Loading,
        };
        page(&state, jar, &view)
    }
    .instrument(info_span!("connect", session = %id))
    .await
}

/// `POST /refresh`: drops the fetched data and shows the loading page, which
/// sends the browser back to `/` for the actual fetch.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Response, ServerError> {
    let Some((id, handle)) = state.lookup(&jar) else {
        return Ok((forget_cookie(jar), Redirect::to("/")).into_response());
    };

    async {
        let mut session = handle.lock().await;
        dashboard::apply(&mut session, Action::Refresh);
        if session.state() != DashboardState::Loading {
            return Ok::<_, ServerError>((jar, Redirect::to("/")).into_response());
        }
        page(&state, jar, &View::Loading)
    }
    .instrument(info_span!("refresh", session = %id))
    .await
}

/// `POST /logout`: forgets the token and data.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    apply_and_redirect(&state, jar, Action::Logout).await
}

/// `POST /relogin`: returns to the login form after an authentication failure.
pub async fn relogin(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    apply_and_redirect(&state, jar, Action::TryLoginAgain).await
}

/// Applies `action` and ends the session once it no longer holds a token.
async fn apply_and_redirect(state: &AppState, jar: CookieJar, action: Action) -> Response {
    let Some((id, handle)) = state.lookup(&jar) else {
        return (forget_cookie(jar), Redirect::to("/")).into_response();
    };
    let span = info_span!("action", session = %id, action = ?action);

    async {
        let mut session = handle.lock().await;
        dashboard::apply(&mut session, action);
        let jar = if session.token().is_none() {
            state.end_session(jar, id)
        } else {
            jar
        };
        (jar, Redirect::to("/")).into_response()
    }
    .instrument(span)
    .await
}

fn page(state: &AppState, jar: CookieJar, view: &View) -> Result<Response, ServerError> {
    let html = state.renderer.render(view)?;
    Ok((jar, Html(html)).into_response())
}
