use askama::Template;

use super::SiteContext;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub ctx: SiteContext,
    pub error: Option<String>,
    pub username: String,
}

/// Terminal error page, e.g. when a content document cannot be loaded.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}
