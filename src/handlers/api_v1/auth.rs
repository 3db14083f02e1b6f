use actix_web::{HttpRequest, HttpResponse, web};

use crate::auth::Authenticator;
use crate::auth::tokens::bearer_token;
use crate::errors::AppError;
use crate::forms::EditSessions;
use crate::templates_structs::{ApiLoginRequest, ApiTokenResponse, ApiVerifyResponse};

/// POST /api/v1/auth/login - Exchange admin credentials for a bearer token
pub async fn login(
    auth: web::Data<Authenticator>,
    edits: web::Data<EditSessions>,
    body: web::Json<ApiLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let token = auth.login(&body.username, &body.password)?;
    auth.sweep(&edits);
    Ok(HttpResponse::Ok().json(ApiTokenResponse { token }))
}

/// GET /api/v1/auth/verify - Check the bearer token
pub async fn verify(
    req: HttpRequest,
    auth: web::Data<Authenticator>,
) -> Result<HttpResponse, AppError> {
    let valid = bearer_token(&req).is_some_and(|t| auth.verify(&t));
    Ok(HttpResponse::Ok().json(ApiVerifyResponse { valid }))
}
