//! Page rendering errors.

/// Failure to prepare or render one of the dashboard pages.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A built-in page or partial failed to parse.
    #[error("Failed to register page '{name}': {source}")]
    Register {
        name: &'static str,
        #[source]
        source: Box<handlebars::TemplateError>,
    },

    /// A page could not be rendered from its view data.
    #[error("Failed to render page '{page}': {source}")]
    Render {
        page: &'static str,
        #[source]
        source: handlebars::RenderError,
    },
}
