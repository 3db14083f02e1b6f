use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};

use super::require_token;
use crate::auth::Authenticator;
use crate::errors::AppError;
use crate::templates_structs::ApiUploadResponse;
use crate::uploads::UploadStore;

pub(crate) fn content_type(req: &HttpRequest) -> &str {
    req.headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// POST /api/v1/uploads - Store a raw image body, return its public URL
pub async fn create(
    req: HttpRequest,
    session: Session,
    auth: web::Data<Authenticator>,
    uploads: web::Data<UploadStore>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    require_token(&req, &session, &auth)?;
    let url = uploads.store(&body, content_type(&req)).await?;
    Ok(HttpResponse::Created().json(ApiUploadResponse { url }))
}
