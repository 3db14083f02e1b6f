use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use askama::Template;
use std::fmt;

use crate::auth::AuthError;
use crate::content::ContentError;
use crate::forms::FormError;
use crate::templates_structs::ApiErrorResponse;
use crate::uploads::UploadError;

#[derive(Debug)]
pub enum AppError {
    Content(ContentError),
    Form(FormError),
    Upload(UploadError),
    Auth(AuthError),
    Template(askama::Error),
    Csrf(String),
    BadRequest(String),
    Unauthorized,
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Content(e) => write!(f, "{e}"),
            AppError::Form(e) => write!(f, "{e}"),
            AppError::Upload(e) => write!(f, "{e}"),
            AppError::Auth(e) => write!(f, "{e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Csrf(e) => write!(f, "CSRF error: {e}"),
            AppError::BadRequest(e) => write!(f, "Bad request: {e}"),
            AppError::Unauthorized => write!(f, "Authentication required"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Content(ContentError::Disabled) => StatusCode::FORBIDDEN,
            AppError::Content(ContentError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Content(ContentError::InvalidPayload(_)) => StatusCode::BAD_REQUEST,
            AppError::Content(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Form(FormError::Busy(_) | FormError::NotOpen | FormError::StaleResult) => {
                StatusCode::CONFLICT
            }
            AppError::Form(FormError::Save(_) | FormError::Upload(_) | FormError::Cancelled) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Form(_) => StatusCode::BAD_REQUEST,
            AppError::Upload(UploadError::Disabled) => StatusCode::FORBIDDEN,
            AppError::Upload(UploadError::TooLarge(_)) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Upload(UploadError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upload(_) => StatusCode::BAD_REQUEST,
            AppError::Auth(AuthError::Hash(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Auth(_) | AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Csrf(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{self}");
            return HttpResponse::build(status).json(ApiErrorResponse {
                error: "Internal Server Error".to_string(),
                details: None,
            });
        }
        log::warn!("{status}: {self}");
        HttpResponse::build(status).json(ApiErrorResponse {
            error: self.to_string(),
            details: None,
        })
    }
}

impl From<ContentError> for AppError {
    fn from(e: ContentError) -> Self {
        AppError::Content(e)
    }
}

impl From<FormError> for AppError {
    fn from(e: FormError) -> Self {
        AppError::Form(e)
    }
}

impl From<UploadError> for AppError {
    fn from(e: UploadError) -> Self {
        AppError::Upload(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

/// Render an askama template into an HTML response.
pub fn render<T: Template>(tmpl: T) -> Result<HttpResponse, AppError> {
    let html = tmpl.render()?;
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}
