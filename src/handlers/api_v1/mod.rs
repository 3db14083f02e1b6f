pub mod auth;
pub mod content;
pub mod edit;
pub mod uploads;

use actix_session::Session;
use actix_web::{
    Error, HttpRequest, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::{Next, from_fn},
    web,
};

use crate::auth::Authenticator;
use crate::auth::session::AdminSession;
use crate::auth::tokens::bearer_token;
use crate::errors::AppError;
use crate::uploads::MAX_UPLOAD_BYTES;

/// CSRF protection for REST API mutation endpoints.
///
/// Rejects POST/PUT/DELETE requests that don't have Content-Type: application/json.
/// Browsers cannot send cross-origin JSON with cookies via simple form POST,
/// so the Content-Type check acts as a CSRF guard without requiring tokens.
/// GET requests are exempt (read-only, no state changes).
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method().clone();

    if method == actix_web::http::Method::POST
        || method == actix_web::http::Method::PUT
        || method == actix_web::http::Method::DELETE
    {
        let content_type = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("application/json") {
            let body = serde_json::json!({
                "error": "Content-Type must be application/json for mutation requests"
            });
            let response = HttpResponse::BadRequest().json(body);
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Same guard for raw image bodies: only `image/*` is let through, which a
/// cross-site form cannot send either.
async fn require_image_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let is_image = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("image/"));

    if !is_image {
        let body = serde_json::json!({
            "error": "Content-Type must be an image type for uploads"
        });
        let response = HttpResponse::UnsupportedMediaType().json(body);
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Admin token of the caller: the bearer header, or the signed-in cookie session.
pub fn require_token(
    req: &HttpRequest,
    session: &Session,
    auth: &Authenticator,
) -> Result<String, AppError> {
    if let Some(token) = bearer_token(req) {
        return if auth.verify(&token) { Ok(token) } else { Err(AppError::Unauthorized) };
    }
    AdminSession::restore(session, auth)
        .token()
        .map(str::to_string)
        .ok_or(AppError::Unauthorized)
}

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .wrap(from_fn(require_json_content_type))
            .route("/login", web::post().to(auth::login))
            .route("/verify", web::get().to(auth::verify)),
    );
    cfg.service(
        web::scope("/content")
            .wrap(from_fn(require_json_content_type))
            .route("/{page}", web::get().to(content::read))
            .route("/{page}", web::put().to(content::update)),
    );
    cfg.service(
        web::resource("/uploads")
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .wrap(from_fn(require_image_content_type))
            .route(web::post().to(uploads::create)),
    );
    cfg.service(
        web::resource("/edit/upload")
            .app_data(web::PayloadConfig::new(MAX_UPLOAD_BYTES))
            .wrap(from_fn(require_image_content_type))
            .route(web::post().to(edit::upload)),
    );
    cfg.service(
        web::scope("/edit")
            .wrap(from_fn(require_json_content_type))
            .route("", web::get().to(edit::state))
            .route("/ops", web::post().to(edit::ops))
            .route("/submit", web::post().to(edit::submit))
            .route("/cancel", web::post().to(edit::cancel))
            .route("/abort", web::post().to(edit::abort))
            .route("/{page}/{section}/open", web::post().to(edit::open)),
    );
}
