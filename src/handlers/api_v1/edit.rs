use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};

use super::require_token;
use super::uploads::content_type;
use crate::auth::Authenticator;
use crate::content::{ContentStore, PageName};
use crate::errors::AppError;
use crate::forms::{DraftOp, EditSessions, ImageTarget};
use crate::pages::editing;
use crate::templates_structs::{
    ApiAbortResponse, ApiEditState, ApiSaveResponse, ApiUploadResponse, ApiUploadTarget,
};
use crate::uploads::UploadStore;

fn snapshot(edits: &EditSessions, token: &str) -> ApiEditState {
    edits.with(token, |slot| {
        let target = slot.target.as_ref().map(|(p, s)| (p.to_string(), s.clone()));
        ApiEditState::new(&slot.session, target)
    })
}

/// GET /api/v1/edit - Current edit session of the caller
pub async fn state(
    req: HttpRequest,
    session: Session,
    auth: web::Data<Authenticator>,
    edits: web::Data<EditSessions>,
) -> Result<HttpResponse, AppError> {
    let token = require_token(&req, &session, &auth)?;
    Ok(HttpResponse::Ok().json(snapshot(&edits, &token)))
}

/// POST /api/v1/edit/{page}/{section}/open - Open (or reset) a section form
pub async fn open(
    req: HttpRequest,
    session: Session,
    auth: web::Data<Authenticator>,
    store: web::Data<ContentStore>,
    edits: web::Data<EditSessions>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let token = require_token(&req, &session, &auth)?;
    let (page, section) = path.into_inner();
    let page: PageName = page.parse().map_err(|_| AppError::NotFound)?;
    editing::open_section(&edits, &store, &token, page, &section).await?;
    Ok(HttpResponse::Ok().json(snapshot(&edits, &token)))
}

/// POST /api/v1/edit/ops - Apply a list of draft edits in order
///
/// Stops at the first failing op; the ops before it stay applied.
pub async fn ops(
    req: HttpRequest,
    session: Session,
    auth: web::Data<Authenticator>,
    edits: web::Data<EditSessions>,
    body: web::Json<Vec<DraftOp>>,
) -> Result<HttpResponse, AppError> {
    let token = require_token(&req, &session, &auth)?;
    editing::apply_ops(&edits, &token, &body)?;
    Ok(HttpResponse::Ok().json(snapshot(&edits, &token)))
}

/// POST /api/v1/edit/upload?field=&index=&sub= - Upload a raw image into the draft
pub async fn upload(
    req: HttpRequest,
    session: Session,
    auth: web::Data<Authenticator>,
    edits: web::Data<EditSessions>,
    uploads: web::Data<UploadStore>,
    query: web::Query<ApiUploadTarget>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let token = require_token(&req, &session, &auth)?;
    let query = query.into_inner();
    let target = match (query.index, query.sub) {
        (Some(index), Some(sub)) => ImageTarget::Item { field: query.field, index, sub },
        (None, None) => ImageTarget::Field(query.field),
        _ => {
            return Err(AppError::BadRequest(
                "index and sub must be given together".to_string(),
            ));
        }
    };
    let url = editing::upload(&edits, &uploads, &token, target, &body, content_type(&req)).await?;
    Ok(HttpResponse::Ok().json(ApiUploadResponse { url }))
}

/// POST /api/v1/edit/submit - Save the draft to its document
pub async fn submit(
    req: HttpRequest,
    session: Session,
    auth: web::Data<Authenticator>,
    store: web::Data<ContentStore>,
    edits: web::Data<EditSessions>,
) -> Result<HttpResponse, AppError> {
    let token = require_token(&req, &session, &auth)?;
    let (page, document) = editing::save(&edits, &store, &token).await?;
    Ok(HttpResponse::Ok().json(ApiSaveResponse { page: page.to_string(), document }))
}

/// POST /api/v1/edit/cancel - Discard the draft
pub async fn cancel(
    req: HttpRequest,
    session: Session,
    auth: web::Data<Authenticator>,
    edits: web::Data<EditSessions>,
) -> Result<HttpResponse, AppError> {
    let token = require_token(&req, &session, &auth)?;
    editing::cancel(&edits, &token)?;
    Ok(HttpResponse::Ok().json(snapshot(&edits, &token)))
}

/// POST /api/v1/edit/abort - Abort an in-flight save or upload
pub async fn abort(
    req: HttpRequest,
    session: Session,
    auth: web::Data<Authenticator>,
    edits: web::Data<EditSessions>,
) -> Result<HttpResponse, AppError> {
    let token = require_token(&req, &session, &auth)?;
    let aborted = editing::abort(&edits, &token);
    Ok(HttpResponse::Ok().json(ApiAbortResponse { aborted }))
}
