//! Shared test infrastructure for the content, form and HTTP tests.
//!
//! - `editable_site()` - content copied into a temp dir, uploads enabled, login on
//! - `static_site()` - bundled content, updates and login disabled
//! - `test_app!` - the full route table over a site, with a cookie session

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use actix_web::web;
use tempfile::TempDir;

use corpsite::auth::Authenticator;
use corpsite::auth::password;
use corpsite::auth::tokens::TokenStore;
use corpsite::content::{ContentMode, ContentStore};
use corpsite::forms::EditSessions;
use corpsite::uploads::UploadStore;

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "admin123";

/// Cookie name actix-session uses by default.
pub const SESSION_COOKIE: &str = "id";

// ============================================================================
// SITE SETUP
// ============================================================================

/// Shared state of one test site. The temp dirs must outlive the app.
pub struct TestSite {
    pub content_dir: Option<TempDir>,
    pub upload_dir: Option<TempDir>,
    pub store: web::Data<ContentStore>,
    pub uploads: web::Data<UploadStore>,
    pub auth: web::Data<Authenticator>,
    pub edits: web::Data<EditSessions>,
}

impl TestSite {
    pub fn content_path(&self) -> &Path {
        self.content_dir.as_ref().expect("static site has no content dir").path()
    }

    pub fn upload_path(&self) -> &Path {
        self.upload_dir.as_ref().expect("static site has no upload dir").path()
    }
}

/// The `content/` directory shipped with the crate.
pub fn bundled_content_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("content")
}

/// Copy every shipped document into a fresh temp dir.
pub fn copy_content() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for entry in std::fs::read_dir(bundled_content_dir()).expect("Failed to read content dir") {
        let entry = entry.expect("Failed to read dir entry");
        std::fs::copy(entry.path(), dir.path().join(entry.file_name()))
            .expect("Failed to copy content file");
    }
    dir
}

pub fn authenticator(mode: ContentMode) -> Authenticator {
    let hash = password::hash_password(ADMIN_PASS).expect("Failed to hash password");
    Authenticator::new(mode, ADMIN_USER, &hash, TokenStore::new(chrono::Duration::hours(1)))
}

pub fn editable_site() -> TestSite {
    let content_dir = copy_content();
    let upload_dir = TempDir::new().expect("Failed to create upload dir");
    let store = ContentStore::open(ContentMode::Editable, content_dir.path())
        .expect("Failed to load content");
    let uploads = UploadStore::new(upload_dir.path(), "/uploads");
    TestSite {
        store: web::Data::new(store),
        uploads: web::Data::new(uploads),
        auth: web::Data::new(authenticator(ContentMode::Editable)),
        edits: web::Data::new(EditSessions::new()),
        content_dir: Some(content_dir),
        upload_dir: Some(upload_dir),
    }
}

pub fn static_site() -> TestSite {
    let store = ContentStore::bundled().expect("Failed to load bundled content");
    TestSite {
        store: web::Data::new(store),
        uploads: web::Data::new(UploadStore::disabled()),
        auth: web::Data::new(authenticator(ContentMode::Static)),
        edits: web::Data::new(EditSessions::new()),
        content_dir: None,
        upload_dir: None,
    }
}

/// Read a document straight from disk, bypassing the store.
pub fn read_doc(dir: &Path, name: &str) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.join(format!("{name}.json"))).expect("Failed to read doc");
    serde_json::from_str(&raw).expect("Failed to parse doc")
}

// ============================================================================
// HTTP HELPERS
// ============================================================================

/// Build the service for a `TestSite` with the full route table.
#[macro_export]
macro_rules! test_app {
    ($site:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::from(&[7u8; 64][..]),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data($site.store.clone())
                .app_data($site.uploads.clone())
                .app_data($site.auth.clone())
                .app_data($site.edits.clone())
                .configure(corpsite::handlers::configure),
        )
        .await
    };
}

/// Session cookie set by a response, if any.
pub fn session_cookie<B>(
    resp: &actix_web::dev::ServiceResponse<B>,
) -> Option<actix_web::cookie::Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

/// Pull the hidden CSRF token out of a rendered page.
pub fn csrf_from_html(html: &str) -> Option<String> {
    let re = regex::Regex::new(r#"name="csrf_token" value="([0-9a-f]+)""#).ok()?;
    re.captures(html).map(|c| c[1].to_string())
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
