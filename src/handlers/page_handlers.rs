use std::collections::HashMap;

use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, http::StatusCode, web};
use serde_json::Value;

use crate::auth::Authenticator;
use crate::content::{ContentStore, PageName};
use crate::errors::{AppError, render};
use crate::handlers::error_page;
use crate::pages::SitePage;
use crate::pages::view::{self, ProjectFilter, ProjectSummary};
use crate::templates_structs::{
    InquiryFormView, ListingView, PageTemplate, ProjectsView, SiteContext,
};

fn array<'a>(doc: &'a Value, key: &str) -> &'a [Value] {
    doc.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

fn cards(items: &[&Value]) -> Vec<view::CardView> {
    items
        .iter()
        .filter_map(|item| item.as_object())
        .map(view::card_from_object)
        .collect()
}

/// Build the page template. Errors here are content load failures.
pub async fn build_page(
    page: SitePage,
    session: &Session,
    store: &ContentStore,
    auth: &Authenticator,
    query: &HashMap<String, String>,
    inquiry: Option<InquiryFormView>,
) -> Result<PageTemplate, AppError> {
    let ctx = SiteContext::build(session, store, auth, page.path(), page.document()).await?;

    let mut sections = Vec::new();
    let mut projects = None;
    let mut listing = None;

    if let Some(doc_name) = page.document() {
        let doc = store.get(doc_name).await?;
        let edit = ctx.edit_target(doc_name);
        sections = view::build_sections(&doc, edit);

        match page {
            SitePage::Projects => {
                sections.retain(|s| s.key != "projects");
                let all = array(&doc, "projects");
                // edit mode lists everything so every project stays reachable
                let filter = if ctx.edit_mode {
                    ProjectFilter::All
                } else {
                    ProjectFilter::parse(query.get("type").map(String::as_str))
                };
                let shown: Vec<&Value> = all.iter().filter(|p| filter.matches(p)).collect();
                projects = Some(ProjectsView {
                    heading: filter.title().to_string(),
                    summary: ProjectSummary::from_projects(all),
                    cards: cards(&shown),
                    edit: view::edit_link(edit, "projects"),
                });
            }
            SitePage::Plant | SitePage::Resources => {
                if page == SitePage::Plant {
                    sections.clear();
                } else {
                    sections.retain(|s| s.key != "items");
                }
                let q = query.get("q").cloned().unwrap_or_default();
                let found = view::search_items(array(&doc, "items"), &q);
                listing = Some(ListingView {
                    action: page.path().to_string(),
                    query: q,
                    cards: cards(&found),
                    edit: view::edit_link(edit, "items"),
                });
            }
            _ => {}
        }
    }

    let inquiry = inquiry.or_else(|| {
        page.inquiry()
            .map(|kind| InquiryFormView::new(kind, &Default::default(), Vec::new()))
    });

    Ok(PageTemplate {
        ctx,
        title: page.title().to_string(),
        sections,
        projects,
        listing,
        inquiry,
    })
}

/// Render a built page, or the terminal error page when content failed to load.
pub fn respond(page: Result<PageTemplate, AppError>) -> Result<HttpResponse, AppError> {
    match page {
        Ok(tmpl) => render(tmpl),
        Err(AppError::Content(e)) => {
            log::error!("Failed to load page content: {e}");
            error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load content",
                "This page could not be loaded. Please try again later.",
            )
        }
        Err(e) => Err(e),
    }
}

/// GET handler for every public page; the page is picked by path.
pub async fn show(
    req: HttpRequest,
    session: Session,
    store: web::Data<ContentStore>,
    auth: web::Data<Authenticator>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let page = SitePage::from_path(req.path()).ok_or(AppError::NotFound)?;
    respond(build_page(page, &session, &store, &auth, &query, None).await)
}

/// Path of the page that shows `doc`; the layout lives on every page.
pub fn page_path(doc: PageName) -> &'static str {
    SitePage::for_document(doc).map(|p| p.path()).unwrap_or("/")
}
