//! Page rendering using Handlebars.
//!
//! Every view has its own page template; all of them share the `header` and
//! `footer` partials.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::PageRenderer;

use handlebars::Handlebars;

/// Page template names, one per view.
pub(crate) const LOGIN_PAGE: &str = "login";
pub(crate) const LOADING_PAGE: &str = "loading";
pub(crate) const ERROR_PAGE: &str = "error";
pub(crate) const DASHBOARD_PAGE: &str = "dashboard";

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("pages/header.hbs")),
    ("footer", include_str!("pages/footer.hbs")),
];

const PAGES: [(&str, &str); 4] = [
    (LOGIN_PAGE, include_str!("pages/login.hbs")),
    (LOADING_PAGE, include_str!("pages/loading.hbs")),
    (ERROR_PAGE, include_str!("pages/error.hbs")),
    (DASHBOARD_PAGE, include_str!("pages/dashboard.hbs")),
];

/// Creates a Handlebars registry with every page and partial registered.
///
/// The registry is configured with:
/// - HTML escaping (the default) for every interpolated value
/// - Strict mode (catches missing variables)
///
/// # Errors
///
/// Returns an error if a built-in template fails to parse.
pub fn create_handlebars_registry() -> Result<Handlebars<'static>, TemplateError> {
    let mut hbs = Handlebars::new();

    // Enable strict mode to catch missing variables
    hbs.set_strict_mode(true);

    let failed = |name: &'static str| {
        move |source: handlebars::TemplateError| TemplateError::Register {
            name,
            source: Box::new(source),
        }
    };

    for (name, source) in PARTIALS {
        hbs.register_partial(name, source).map_err(failed(name))?;
    }
    for (name, source) in PAGES {
        hbs.register_template_string(name, source).map_err(failed(name))?;
    }

    Ok(hbs)
}
