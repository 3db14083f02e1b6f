use actix_session::Session;

use super::Authenticator;
use crate::content::PageName;
use crate::forms::EditSessions;

const TOKEN_KEY: &str = "admin_token";
const EDIT_PAGES_KEY: &str = "edit_pages";
const FLASH_KEY: &str = "flash";

/// Admin state for one request, restored from the cookie session.
///
/// Replaces an ambient "is admin" flag: handlers receive this value and
/// pass it on to whatever renders edit affordances.
#[derive(Debug, Clone, Default)]
pub struct AdminSession {
    token: Option<String>,
}

impl AdminSession {
    /// Restore from the cookie session, dropping a token that no longer verifies.
    pub fn restore(session: &Session, auth: &Authenticator) -> Self {
        let stored = session.get::<String>(TOKEN_KEY).unwrap_or(None);
        match stored {
            Some(token) if auth.verify(&token) => Self { token: Some(token) },
            Some(_) => {
                log::info!("Stored admin token no longer valid, clearing session");
                session.remove(TOKEN_KEY);
                session.remove(EDIT_PAGES_KEY);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Record a freshly issued token in the cookie session.
    pub fn begin(session: &Session, token: String) -> Self {
        let _ = session.insert(TOKEN_KEY, &token);
        Self { token: Some(token) }
    }

    /// Revoke the token, drop its edit session and clear the cookie.
    pub fn end(self, session: &Session, auth: &Authenticator, edits: &EditSessions) {
        if let Some(token) = &self.token {
            auth.logout(token);
            edits.remove(token);
        }
        session.purge();
    }

    pub fn is_admin(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

/// Pages with edit mode switched on, stored as a CSV list.
#[derive(Debug, Clone, Default)]
pub struct EditModePages(pub Vec<PageName>);

impl EditModePages {
    pub fn load(session: &Session) -> Self {
        let csv = session.get::<String>(EDIT_PAGES_KEY).unwrap_or(None).unwrap_or_default();
        let pages = csv
            .split(',')
            .map(|s| s.trim())
            .filter_map(|s| s.parse().ok())
            .collect();
        EditModePages(pages)
    }

    pub fn has(&self, page: PageName) -> bool {
        self.0.contains(&page)
    }

    /// Flip edit mode for `page` and persist; returns the new state.
    pub fn toggle(session: &Session, page: PageName) -> bool {
        let mut pages = Self::load(session);
        let enabled = if pages.has(page) {
            pages.0.retain(|p| *p != page);
            false
        } else {
            pages.0.push(page);
            true
        };
        let csv = pages.0.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(",");
        let _ = session.insert(EDIT_PAGES_KEY, csv);
        enabled
    }
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
