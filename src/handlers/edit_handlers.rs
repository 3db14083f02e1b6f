use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session::{AdminSession, set_flash};
use crate::auth::{Authenticator, csrf};
use crate::content::{ContentStore, PageName};
use crate::errors::{AppError, render};
use crate::forms::{DraftOp, EditSessions};
use crate::handlers::page_handlers::page_path;
use crate::handlers::see_other;
use crate::pages::editing;
use crate::templates_structs::{EditFormTemplate, EditFormView, SiteContext};
use crate::uploads::UploadStore;

fn admin_token(session: &Session, auth: &Authenticator) -> Result<String, AppError> {
    AdminSession::restore(session, auth)
        .token()
        .map(str::to_string)
        .ok_or(AppError::Unauthorized)
}

fn parse_target(path: (String, String)) -> Result<(PageName, String), AppError> {
    let (page, section) = path;
    let page: PageName = page.parse().map_err(|_| AppError::NotFound)?;
    Ok((page, section))
}

struct FormPage<'a> {
    session: &'a Session,
    store: &'a ContentStore,
    auth: &'a Authenticator,
    edits: &'a EditSessions,
    uploads: &'a UploadStore,
    token: &'a str,
    page: PageName,
    section: &'a str,
}

impl FormPage<'_> {
    async fn render(&self, error: Option<String>) -> Result<HttpResponse, AppError> {
        let action = format!("/admin/edit/{}/{}", self.page, self.section);
        let back = page_path(self.page);
        let ctx = SiteContext::build(self.session, self.store, self.auth, &action, Some(self.page)).await?;
        let form = self.edits.with(self.token, |slot| {
            EditFormView::from_session(&slot.session, &action, back, self.uploads.is_enabled(), error)
        });
        render(EditFormTemplate { ctx, form })
    }
}

/// GET /admin/edit/{page}/{section}: show the open form, opening it first
/// unless this section is already being edited.
pub async fn form(
    session: Session,
    store: web::Data<ContentStore>,
    auth: web::Data<Authenticator>,
    edits: web::Data<EditSessions>,
    uploads: web::Data<UploadStore>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let token = admin_token(&session, &auth)?;
    let (page, section) = parse_target(path.into_inner())?;

    let mut error = None;
    if !editing::is_editing(&edits, &token, page, &section) {
        match editing::open_section(&edits, &store, &token, page, &section).await {
            Ok(_) => {}
            Err(AppError::Form(e)) => error = Some(e.to_string()),
            Err(e) => return Err(e),
        }
    }

    let view = FormPage {
        session: &session,
        store: &store,
        auth: &auth,
        edits: &edits,
        uploads: &uploads,
        token: &token,
        page,
        section: &section,
    };
    view.render(error).await
}

/// POST /admin/edit/{page}/{section}: apply posted field values, then run
/// the button action (`save`, `cancel`, `add_item:<f>`, `remove_item:<f>:<i>`).
pub async fn submit(
    session: Session,
    store: web::Data<ContentStore>,
    auth: web::Data<Authenticator>,
    edits: web::Data<EditSessions>,
    uploads: web::Data<UploadStore>,
    path: web::Path<(String, String)>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let token = admin_token(&session, &auth)?;
    let (page, section) = parse_target(path.into_inner())?;
    let fields = form.into_inner();

    let submitted_csrf = fields
        .iter()
        .find(|(k, _)| k == "csrf_token")
        .map(|(_, v)| v.as_str())
        .unwrap_or("");
    csrf::validate_csrf(&session, submitted_csrf)?;

    let back = page_path(page);
    if !editing::is_editing(&edits, &token, page, &section) {
        return Ok(see_other(&format!("/admin/edit/{page}/{section}")));
    }

    let action = fields
        .iter()
        .find(|(k, _)| k == "action")
        .map(|(_, v)| v.clone())
        .unwrap_or_else(|| "save".to_string());
    let view = FormPage {
        session: &session,
        store: &store,
        auth: &auth,
        edits: &edits,
        uploads: &uploads,
        token: &token,
        page,
        section: &section,
    };

    if action == "cancel" {
        return match editing::cancel(&edits, &token) {
            Ok(()) => Ok(see_other(back)),
            Err(e) => view.render(Some(e.to_string())).await,
        };
    }

    let mut ops: Vec<DraftOp> = fields
        .iter()
        .filter_map(|(k, v)| DraftOp::from_form_key(k, v))
        .collect();
    if let Some(op) = DraftOp::from_action(&action) {
        ops.push(op);
    }
    if let Err(e) = editing::apply_ops(&edits, &token, &ops) {
        return view.render(Some(e.to_string())).await;
    }

    if action != "save" {
        return view.render(None).await;
    }

    match editing::save(&edits, &store, &token).await {
        Ok(_) => {
            set_flash(&session, "Changes saved");
            Ok(see_other(back))
        }
        Err(AppError::Form(e)) => view.render(Some(e.to_string())).await,
        Err(AppError::Content(e)) => view.render(Some(e.to_string())).await,
        Err(e) => Err(e),
    }
}
