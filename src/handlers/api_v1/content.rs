use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::Value;

use super::require_token;
use crate::auth::Authenticator;
use crate::content::{ContentError, ContentMode, ContentStore, PageName};
use crate::errors::AppError;

fn parse_page(raw: &str) -> Result<PageName, AppError> {
    raw.parse().map_err(|_| AppError::NotFound)
}

/// GET /api/v1/content/{page} - Full content document
pub async fn read(
    store: web::Data<ContentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let page = parse_page(&path)?;
    let doc = store.get(page).await?;
    Ok(HttpResponse::Ok().json(doc))
}

/// PUT /api/v1/content/{page} - Replace the top-level sections named in the body
pub async fn update(
    req: HttpRequest,
    session: Session,
    store: web::Data<ContentStore>,
    auth: web::Data<Authenticator>,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let page = parse_page(&path)?;
    if store.mode() == ContentMode::Static {
        return Err(ContentError::Disabled.into());
    }
    require_token(&req, &session, &auth)?;

    let doc = store.update(page, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(doc))
}
