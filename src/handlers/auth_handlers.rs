use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::session::{AdminSession, EditModePages, set_flash};
use crate::auth::{AuthError, Authenticator, csrf};
use crate::content::{ContentStore, PageName};
use crate::errors::{AppError, render};
use crate::forms::EditSessions;
use crate::handlers::page_handlers::page_path;
use crate::handlers::see_other;
use crate::templates_structs::{LoginTemplate, SiteContext};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

async fn login_template(
    session: &Session,
    store: &ContentStore,
    auth: &Authenticator,
    username: &str,
    error: Option<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = SiteContext::build(session, store, auth, "/admin/login", None).await?;
    render(LoginTemplate { ctx, error, username: username.to_string() })
}

pub async fn login_page(
    session: Session,
    store: web::Data<ContentStore>,
    auth: web::Data<Authenticator>,
) -> Result<HttpResponse, AppError> {
    if AdminSession::restore(&session, &auth).is_admin() {
        return Ok(see_other("/"));
    }
    login_template(&session, &store, &auth, "", None).await
}

pub async fn login_submit(
    session: Session,
    store: web::Data<ContentStore>,
    auth: web::Data<Authenticator>,
    edits: web::Data<EditSessions>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;

    match auth.login(&form.username, &form.password) {
        Ok(token) => {
            auth.sweep(&edits);
            session.renew();
            AdminSession::begin(&session, token);
            set_flash(&session, "Signed in");
            Ok(see_other("/"))
        }
        Err(AuthError::Hash(e)) => Err(AuthError::Hash(e).into()),
        Err(e) => {
            log::warn!("Rejected admin login for '{}': {e}", form.username.trim());
            login_template(&session, &store, &auth, &form.username, Some(e.to_string())).await
        }
    }
}

pub async fn logout(
    session: Session,
    auth: web::Data<Authenticator>,
    edits: web::Data<EditSessions>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    AdminSession::restore(&session, &auth).end(&session, &auth, &edits);
    Ok(see_other("/"))
}

/// Flip edit mode for one document and go back to the page showing it.
pub async fn toggle_edit_mode(
    session: Session,
    path: web::Path<String>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    csrf::validate_csrf(&session, &form.csrf_token)?;
    let page: PageName = path.into_inner().parse().map_err(|_| AppError::NotFound)?;
    let enabled = EditModePages::toggle(&session, page);
    log::info!("Edit mode for {page} {}", if enabled { "enabled" } else { "disabled" });
    Ok(see_other(page_path(page)))
}
