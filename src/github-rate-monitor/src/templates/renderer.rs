//! Page renderer.

use super::{
    create_handlebars_registry, TemplateError, DASHBOARD_PAGE, ERROR_PAGE, LOADING_PAGE,
    LOGIN_PAGE,
};
use crate::dashboard::View;
use handlebars::Handlebars;
use serde_json::{json, Value};

/// Renders dashboard views to HTML pages.
pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    /// Creates a renderer with the built-in pages registered.
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in template fails to parse.
    pub fn new() -> Result<Self, TemplateError> {
        Ok(Self {
            handlebars: create_handlebars_registry()?,
        })
    }

    /// Renders the page for a view.
    ///
    /// # Errors
    ///
    /// Returns an error if template rendering fails.
    pub fn render(&self, view: &View) -> Result<String, TemplateError> {
        let (page, data) = match view {
            View::LoggedOut { warning } => (
                LOGIN_PAGE,
                json!({
                    "logged_in": false,
                    "refresh": false,
                    "warning": warning,
                }),
            ),
            View::Loading => (
                LOADING_PAGE,
                json!({
                    "logged_in": true,
                    "refresh": true,
                }),
            ),
            View::ErrorShown(error) => (
                ERROR_PAGE,
                json!({
                    "logged_in": true,
                    "refresh": false,
                    "error": error,
                }),
            ),
            View::Dashboard(dashboard) => (
                DASHBOARD_PAGE,
                json!({
                    "logged_in": true,
                    "refresh": false,
                    "dashboard": dashboard,
                }),
            ),
        };

        self.render_page(page, &data)
    }

    /// Renders a registered page with the given data.
    fn render_page(&self, page: &'static str, data: &Value) -> Result<String, TemplateError> {
        self.handlebars
            .render(page, data)
            .map_err(|source| TemplateError::Render { page, source })
    }
}
