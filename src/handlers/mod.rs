pub mod api_v1;
pub mod auth_handlers;
pub mod edit_handlers;
pub mod inquiry_handlers;
pub mod page_handlers;

use actix_web::{HttpResponse, http::StatusCode, middleware::from_fn, web};

use crate::auth::middleware::require_admin;
use crate::errors::AppError;
use crate::pages::SitePage;
use crate::templates_structs::ErrorTemplate;

/// Register every site route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1").configure(api_v1::configure));

    cfg.route("/admin/login", web::get().to(auth_handlers::login_page))
        .route("/admin/login", web::post().to(auth_handlers::login_submit));
    cfg.service(
        web::scope("/admin")
            .wrap(from_fn(require_admin))
            .route("/logout", web::post().to(auth_handlers::logout))
            .route("/edit-mode/{page}", web::post().to(auth_handlers::toggle_edit_mode))
            .route("/edit/{page}/{section}", web::get().to(edit_handlers::form))
            .route("/edit/{page}/{section}", web::post().to(edit_handlers::submit)),
    );

    for page in SitePage::ALL {
        cfg.route(page.path(), web::get().to(page_handlers::show));
        if page.inquiry().is_some() {
            cfg.route(page.path(), web::post().to(inquiry_handlers::submit));
        }
    }
}

/// Full-page error, rendered without the site layout.
pub fn error_page(status: StatusCode, title: &str, message: &str) -> Result<HttpResponse, AppError> {
    let html = askama::Template::render(&ErrorTemplate {
        title: title.to_string(),
        message: message.to_string(),
    })?;
    Ok(HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(html))
}

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header(("Location", location))
        .finish()
}
