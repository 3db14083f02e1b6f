use std::collections::HashMap;

use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};

use crate::auth::session::set_flash;
use crate::auth::{Authenticator, csrf};
use crate::content::ContentStore;
use crate::errors::AppError;
use crate::handlers::page_handlers::{build_page, respond};
use crate::handlers::see_other;
use crate::inquiry::Submission;
use crate::pages::SitePage;
use crate::templates_structs::InquiryFormView;

/// POST handler for the contact, career, quote and feedback forms.
///
/// Nothing is delivered; a valid submission is logged and acknowledged.
pub async fn submit(
    req: HttpRequest,
    session: Session,
    store: web::Data<ContentStore>,
    auth: web::Data<Authenticator>,
    form: web::Form<Vec<(String, String)>>,
) -> Result<HttpResponse, AppError> {
    let page = SitePage::from_path(req.path()).ok_or(AppError::NotFound)?;
    let kind = page.inquiry().ok_or(AppError::NotFound)?;

    let submission = Submission::new(form.into_inner());
    csrf::validate_csrf(&session, submission.get("csrf_token"))?;

    let errors = kind.validate(&submission);
    if !errors.is_empty() {
        let inquiry = InquiryFormView::new(kind, &submission, errors);
        let query = HashMap::new();
        return respond(build_page(page, &session, &store, &auth, &query, Some(inquiry)).await);
    }

    log::info!(
        "{} submission from {} <{}>",
        page.title(),
        submission.get("name").trim(),
        submission.get("email").trim()
    );
    set_flash(&session, kind.success_message());
    Ok(see_other(kind.path()))
}
