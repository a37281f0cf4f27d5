//! Web server hosting the dashboard.
//!
//! Pages are rendered on the server; every user action is a plain form post.
//! Connect and Refresh answer with a loading page that immediately navigates
//! back to `/`, where the fetch runs while the browser keeps the spinner on
//! screen.

mod error;
mod handlers;
mod state;

pub use error::ServerError;
pub use state::{AppState, SESSION_COOKIE};

use crate::config::MonitorConfig;
use crate::fetcher::GithubQuotaFetcher;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the dashboard routes around shared state.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/connect", post(handlers::connect))
        .route("/refresh", post(handlers::refresh))
        .route("/logout", post(handlers::logout))
        .route("/relogin", post(handlers::relogin))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// The dashboard server.
pub struct Server {
    config: MonitorConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Builds a server that fetches from GitHub using `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or the page templates fail to
    /// initialize.
    pub fn new(config: MonitorConfig) -> Result<Self, ServerError> {
        let fetcher = GithubQuotaFetcher::new(&config.github)?;
        let state = AppState::new(Arc::new(fetcher))?;
        Ok(Self {
            config,
            state: Arc::new(state),
        })
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Serves the dashboard until Ctrl+C is received.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound or fails.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = tokio::net::TcpListener::bind(self.config.bind).await?;
        info!(
            address = %listener.local_addr()?,
            api_url = %self.config.github.api_url,
            "Dashboard listening"
        );

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Dashboard stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{FetchError, FetchResult};
    use crate::quota::{QuotaSnapshot, ResourceQuota};
    use crate::test_support::CannedSource;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use indexmap::IndexMap;
    use tower::ServiceExt;

    fn snapshot() -> QuotaSnapshot {
        let reset = crate::time_format::unix_now() + 1200;
        let mut resources = IndexMap::new();
        for (name, limit, used) in [("core", 5000, 10), ("search", 30, 2), ("graphql", 5000, 7)] {
            resources.insert(
                name.to_string(),
                ResourceQuota {
                    limit,
                    used,
                    remaining: limit - used,
                    reset,
                },
            );
        }
        QuotaSnapshot::new(resources)
    }

    fn test_app(result: FetchResult) -> (Router, Arc<AppState>, Arc<CannedSource>) {
        let source = Arc::new(CannedSource::new(result));
        let state = Arc::new(AppState::new(source.clone()).unwrap());
        (router(Arc::clone(&state)), state, source)
    }

    fn test_router(result: FetchResult) -> (Router, Arc<CannedSource>) {
        let (app, _, source) = test_app(result);
        (app, source)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn get(cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn post(uri: &str, cookie: Option<&str>, form: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(form.to_string())).unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        let value = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie")
            .to_str()
            .unwrap();
        assert!(value.starts_with(SESSION_COOKIE));
        assert!(value.contains("HttpOnly"));
        value.split(';').next().unwrap().to_string()
    }

    async fn body(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// Logs in with `token` and returns the session cookie.
    async fn login(app: &Router, token: &str) -> String {
        let response = send(app, post("/connect", None, &format!("token={token}"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);
        assert!(body(response).await.contains("Fetching API quotas..."));
        cookie
    }

    #[tokio::test]
    async fn first_visit_shows_login_without_a_session() {
        let (app, state, source) = test_app(Ok(snapshot()));

        let response = send(&app, get(None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert!(body(response).await.contains(r#"action="/connect""#));
        assert!(state.sessions().is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn empty_token_shows_warning_without_fetching() {
        let (app, state, source) = test_app(Ok(snapshot()));

        let response = send(&app, post("/connect", None, "token=")).await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.contains("Please enter a token."));
        assert!(state.sessions().is_empty());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn anonymous_requests_do_not_accumulate_sessions() {
        let (app, state, _) = test_app(Ok(snapshot()));
        let stale = format!("{SESSION_COOKIE}={}", crate::session::SessionId::generate());

        for _ in 0..50 {
            send(&app, get(None)).await;
            send(&app, get(Some(&stale))).await;
            send(&app, post("/refresh", None, "")).await;
            send(&app, post("/logout", None, "")).await;
        }
        assert!(state.sessions().is_empty());

        let cookie = login(&app, "ghp_test").await;
        send(&app, get(Some(&cookie))).await;
        assert_eq!(state.sessions().len(), 1);

        let response = send(&app, post("/logout", Some(&cookie), "")).await;
        let cleared = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cleared.starts_with(&format!("{SESSION_COOKIE}=;")));
        assert!(cleared.contains("Max-Age=0"));
        assert!(state.sessions().is_empty());
    }

    #[tokio::test]
    async fn reconnecting_reuses_the_session() {
        let (app, state, source) = test_app(Ok(snapshot()));
        let cookie = login(&app, "ghp_first").await;

        let response = send(&app, post("/connect", Some(&cookie), "token=ghp_second")).await;
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        send(&app, get(Some(&cookie))).await;

        assert_eq!(state.sessions().len(), 1);
        assert_eq!(*source.tokens.lock(), vec!["ghp_second".to_string()]);
    }

    #[tokio::test]
    async fn connect_then_index_shows_dashboard() {
        let (app, source) = test_router(Ok(snapshot()));
        let cookie = login(&app, "ghp_test").await;
        assert_eq!(source.calls(), 0);

        let html = body(send(&app, get(Some(&cookie))).await).await;

        assert!(html.contains(r#"<span class="value">5000</span>"#));
        assert!(html.contains(r#"<span class="value">4990</span>"#));
        assert!(html.contains("0.2%"));
        assert_eq!(html.matches(r#"<div class="row">"#).count(), 1);
        assert_eq!(html.matches(r#"class="card""#).count(), 2);
        assert_eq!(*source.tokens.lock(), vec!["ghp_test".to_string()]);

        // Revisiting does not fetch again.
        send(&app, get(Some(&cookie))).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn refresh_fetches_again() {
        let (app, source) = test_router(Ok(snapshot()));
        let cookie = login(&app, "ghp_test").await;
        send(&app, get(Some(&cookie))).await;

        let response = send(&app, post("/refresh", Some(&cookie), "")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body(response).await.contains("Fetching API quotas..."));
        send(&app, get(Some(&cookie))).await;

        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn refresh_while_logged_out_redirects() {
        let (app, source) = test_router(Ok(snapshot()));

        let response = send(&app, post("/refresh", None, "")).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn authentication_failure_allows_relogin() {
        let (app, state, _) = test_app(Err(FetchError::Authentication));
        let cookie = login(&app, "ghp_bad").await;

        let html = body(send(&app, get(Some(&cookie))).await).await;
        assert!(html.contains("Authentication Failed: Invalid Token"));
        assert!(html.contains(r#"action="/relogin""#));

        let response = send(&app, post("/relogin", Some(&cookie), "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert!(state.sessions().is_empty());

        let html = body(send(&app, get(Some(&cookie))).await).await;
        assert!(html.contains(r#"action="/connect""#));
    }

    #[tokio::test]
    async fn api_error_has_no_relogin() {
        let (app, state, source) = test_app(Err(FetchError::Api { status: 403 }));
        let cookie = login(&app, "ghp_test").await;

        let html = body(send(&app, get(Some(&cookie))).await).await;
        assert!(html.contains("API Error: 403"));
        assert!(!html.contains(r#"action="/relogin""#));

        // Try Login Again only applies to authentication failures.
        send(&app, post("/relogin", Some(&cookie), "")).await;
        assert_eq!(state.sessions().len(), 1);

        let html = body(send(&app, get(Some(&cookie))).await).await;
        assert!(html.contains("API Error: 403"));
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn logout_returns_to_login() {
        let (app, _) = test_router(Ok(snapshot()));
        let cookie = login(&app, "ghp_test").await;
        send(&app, get(Some(&cookie))).await;

        let response = send(&app, post("/logout", Some(&cookie), "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let html = body(send(&app, get(Some(&cookie))).await).await;
        assert!(html.contains(r#"action="/connect""#));
        assert!(!html.contains("ghp_test"));
    }

    #[tokio::test]
    async fn sessions_do_not_leak_between_browsers() {
        let (app, _) = test_router(Ok(snapshot()));
        let cookie = login(&app, "ghp_test").await;
        send(&app, get(Some(&cookie))).await;

        let html = body(send(&app, get(None)).await).await;
        assert!(html.contains(r#"action="/connect""#));

        let stale = format!("{SESSION_COOKIE}=not-a-uuid");
        let html = body(send(&app, get(Some(&stale))).await).await;
        assert!(html.contains(r#"action="/connect""#));
    }

    #[test]
    fn server_keeps_its_config() {
        let config = MonitorConfig {
            bind: "127.0.0.1:0".parse().unwrap(),
            ..MonitorConfig::default()
        };

        let server = Server::new(config.clone()).unwrap();

        assert_eq!(server.config(), &config);
    }
}
