// Template context structures for Askama templates, organized by area.
// All types are re-exported: `use corpsite::templates_structs::*`

use actix_session::Session;

use crate::auth::Authenticator;
use crate::auth::csrf;
use crate::auth::session::{AdminSession, EditModePages, take_flash};
use crate::content::{ContentMode, ContentStore, PageName};
use crate::errors::AppError;
use crate::pages::view::{EditLink, LayoutView};
use crate::pages::{self, NavGroup, catalog};

/// Context shared by every site page.
/// Templates access these as `ctx.admin`, `ctx.layout`, etc.
pub struct SiteContext {
    pub admin: bool,
    pub static_mode: bool,
    pub csrf_token: String,
    pub flash: Option<String>,
    pub nav: Vec<NavGroup>,
    pub layout: LayoutView,
    pub current_path: String,
    /// Document the page renders; target of the edit-mode toggle.
    pub document: Option<String>,
    pub edit_mode: bool,
    /// Header and footer editors, shown to admins.
    pub layout_edits: Vec<EditLink>,
}

impl SiteContext {
    pub async fn build(
        session: &Session,
        store: &ContentStore,
        auth: &Authenticator,
        current_path: &str,
        document: Option<PageName>,
    ) -> Result<Self, AppError> {
        let admin = AdminSession::restore(session, auth).is_admin();
        let layout_doc = store.get(PageName::Layout).await?;
        let edit_mode = admin && document.is_some_and(|d| EditModePages::load(session).has(d));
        let layout_edits = if admin {
            catalog::editors(PageName::Layout)
                .into_iter()
                .map(|e| EditLink {
                    url: format!("/admin/edit/{}/{}", PageName::Layout, e.id),
                    label: e.title,
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(Self {
            admin,
            static_mode: store.mode() == ContentMode::Static,
            csrf_token: csrf::get_or_create_token(session),
            flash: take_flash(session),
            nav: pages::navigation(),
            layout: LayoutView::from_doc(&layout_doc),
            current_path: current_path.to_string(),
            document: document.map(|d| d.to_string()),
            edit_mode,
            layout_edits,
        })
    }

    /// Document to pass to section builders when edit links should show.
    pub fn edit_target(&self, document: PageName) -> Option<PageName> {
        self.edit_mode.then_some(document)
    }
}

mod api;
mod common;
mod edit;
mod page;

pub use api::*;
pub use common::*;
pub use edit::*;
pub use page::*;
