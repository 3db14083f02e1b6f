//! HTML site tests: public pages, inquiry forms and the admin edit flow,
//! driven through the full route table with a cookie session.

#[macro_use]
mod common;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::test;

use common::*;

fn body_text(bytes: actix_web::web::Bytes) -> String {
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// Carries the session cookie from one response to the next request.
#[derive(Default)]
struct Jar {
    cookie: Option<Cookie<'static>>,
}

impl Jar {
    fn get(&self, uri: &str) -> test::TestRequest {
        self.attach(test::TestRequest::get().uri(uri))
    }

    fn post_form(&self, uri: &str, form: &[(&str, &str)]) -> test::TestRequest {
        self.attach(test::TestRequest::post().uri(uri).set_form(form))
    }

    fn attach(&self, req: test::TestRequest) -> test::TestRequest {
        match &self.cookie {
            Some(c) => req.cookie(c.clone()),
            None => req,
        }
    }

    fn keep<B>(&mut self, resp: &actix_web::dev::ServiceResponse<B>) {
        if let Some(c) = session_cookie(resp) {
            self.cookie = Some(c);
        }
    }
}

macro_rules! fetch {
    ($app:expr, $jar:expr, $req:expr) => {{
        let resp = test::call_service($app, $req.to_request()).await;
        $jar.keep(&resp);
        resp
    }};
}

macro_rules! fetch_html {
    ($app:expr, $jar:expr, $uri:expr) => {{
        let resp = fetch!($app, $jar, $jar.get($uri));
        assert_eq!(resp.status(), StatusCode::OK, "GET {}", $uri);
        body_text(test::read_body(resp).await)
    }};
}

// ---------------------------------------------------------------------------
// Public pages
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_every_page_renders() {
    let site = static_site();
    let app = test_app!(site);
    let mut jar = Jar::default();

    for page in corpsite::pages::SitePage::ALL {
        let html = fetch_html!(&app, jar, page.path());
        assert!(html.contains("KUNAL"), "{} lacks the layout header", page.path());
        assert!(!html.contains("admin-bar"), "{} shows admin controls", page.path());
    }
}

#[actix_web::test]
async fn test_projects_filter_by_status() {
    let site = static_site();
    let app = test_app!(site);
    let mut jar = Jar::default();

    let html = fetch_html!(&app, jar, "/projects?type=running");
    assert!(html.contains("Running Projects"));
    assert!(html.contains("FGD System Erection"));
    assert!(!html.contains("Boiler Pressure Parts"));

    let html = fetch_html!(&app, jar, "/projects?type=completed");
    assert!(!html.contains("FGD System Erection"));
    assert!(html.contains("Boiler Pressure Parts"));

    let html = fetch_html!(&app, jar, "/projects");
    assert!(html.contains("All Projects"));
    assert!(html.contains("Total: 3"));
}

#[actix_web::test]
async fn test_resources_search() {
    let site = static_site();
    let app = test_app!(site);
    let mut jar = Jar::default();

    let html = fetch_html!(&app, jar, "/resources?q=scaffolding");
    assert!(html.contains("Scaffolding Planks"));
    assert!(html.contains("Scaffolding Pipe"));
    assert!(!html.contains("Hydraulic Press"));

    let html = fetch_html!(&app, jar, "/plant?q=machinery");
    assert!(html.contains("Welding Machine"));
    assert!(!html.contains("Scaffolding Planks"));
}

#[actix_web::test]
async fn test_stats_carry_countup_data() {
    let site = static_site();
    let app = test_app!(site);
    let mut jar = Jar::default();

    let html = fetch_html!(&app, jar, "/");
    assert!(html.contains("data-countup-end="));
}

// ---------------------------------------------------------------------------
// Inquiry forms
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_inquiry_without_csrf_is_forbidden() {
    let site = static_site();
    let app = test_app!(site);
    let mut jar = Jar::default();

    let resp = fetch!(&app, jar, jar.post_form("/contact", &[("name", "A")]));
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_inquiry_errors_then_success() {
    let site = static_site();
    let app = test_app!(site);
    let mut jar = Jar::default();

    let html = fetch_html!(&app, jar, "/quote");
    let csrf = csrf_from_html(&html).expect("csrf token on quote page");

    let resp = fetch!(
        &app,
        jar,
        jar.post_form("/quote", &[("csrf_token", csrf.as_str()), ("name", "Ravi"), ("email", "bad")])
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(test::read_body(resp).await);
    assert!(html.contains("form-errors"));
    assert!(html.contains("value=\"Ravi\""));

    let resp = fetch!(
        &app,
        jar,
        jar.post_form(
            "/quote",
            &[
                ("csrf_token", csrf.as_str()),
                ("name", "Ravi"),
                ("email", "ravi@example.com"),
                ("phone", "+91 99999 00000"),
                ("service", "Civil Work"),
                ("message", "Foundation works for a 2x660MW unit."),
            ],
        )
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/quote");

    let html = fetch_html!(&app, jar, "/quote");
    assert!(html.contains("class=\"flash\""));
}

// ---------------------------------------------------------------------------
// Admin edit flow
// ---------------------------------------------------------------------------

#[actix_web::test]
async fn test_admin_routes_redirect_to_login() {
    let site = editable_site();
    let app = test_app!(site);
    let mut jar = Jar::default();

    let resp = fetch!(&app, jar, jar.get("/admin/edit/contactpage/hero"));
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/admin/login");
}

#[actix_web::test]
async fn test_wrong_password_rerenders_login() {
    let site = editable_site();
    let app = test_app!(site);
    let mut jar = Jar::default();

    let html = fetch_html!(&app, jar, "/admin/login");
    let csrf = csrf_from_html(&html).expect("csrf token on login page");
    let resp = fetch!(
        &app,
        jar,
        jar.post_form(
            "/admin/login",
            &[("csrf_token", csrf.as_str()), ("username", ADMIN_USER), ("password", "nope")]
        )
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(test::read_body(resp).await);
    assert!(html.contains("Invalid username or password"));
}

#[actix_web::test]
async fn test_admin_edits_section_through_html_form() {
    let site = editable_site();
    let app = test_app!(site);
    let mut jar = Jar::default();

    // sign in
    let html = fetch_html!(&app, jar, "/admin/login");
    let csrf = csrf_from_html(&html).expect("csrf token on login page");
    let resp = fetch!(
        &app,
        jar,
        jar.post_form(
            "/admin/login",
            &[("csrf_token", csrf.as_str()), ("username", ADMIN_USER), ("password", ADMIN_PASS)]
        )
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    // the session was renewed on login, so fetch a fresh token
    let html = fetch_html!(&app, jar, "/contact");
    assert!(html.contains("admin-bar"));
    assert!(!html.contains("/admin/edit/contactpage/hero"));
    let csrf = csrf_from_html(&html).expect("csrf token");

    let resp = fetch!(
        &app,
        jar,
        jar.post_form("/admin/edit-mode/contactpage", &[("csrf_token", csrf.as_str())])
    );
    assert_eq!(location(&resp), "/contact");
    let html = fetch_html!(&app, jar, "/contact");
    assert!(html.contains("/admin/edit/contactpage/hero"));

    let html = fetch_html!(&app, jar, "/admin/edit/contactpage/hero");
    assert!(html.contains("Edit Hero"));
    assert!(html.contains("name=\"f.title\""));

    let resp = fetch!(
        &app,
        jar,
        jar.post_form(
            "/admin/edit/contactpage/hero",
            &[
                ("csrf_token", csrf.as_str()),
                ("f.title", "Write to us"),
                ("f.description", "Replies within one working day."),
                ("action", "save"),
            ]
        )
    );
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/contact");
    assert_eq!(read_doc(site.content_path(), "contactpage")["hero"]["title"], "Write to us");

    let html = fetch_html!(&app, jar, "/contact");
    assert!(html.contains("Write to us"));
    assert!(html.contains("Changes saved"));
}

#[actix_web::test]
async fn test_html_form_add_item_keeps_form_open() {
    let site = editable_site();
    let app = test_app!(site);
    let mut jar = Jar::default();

    let html = fetch_html!(&app, jar, "/admin/login");
    let csrf = csrf_from_html(&html).expect("csrf");
    fetch!(
        &app,
        jar,
        jar.post_form(
            "/admin/login",
            &[("csrf_token", csrf.as_str()), ("username", ADMIN_USER), ("password", ADMIN_PASS)]
        )
    );

    let html = fetch_html!(&app, jar, "/admin/edit/careerpage/whyWork");
    let csrf = csrf_from_html(&html).expect("csrf");
    let points = html.matches("name=\"f.points.").count();

    let resp = fetch!(
        &app,
        jar,
        jar.post_form(
            "/admin/edit/careerpage/whyWork",
            &[("csrf_token", csrf.as_str()), ("action", "add_item:points")]
        )
    );
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(test::read_body(resp).await);
    assert_eq!(html.matches("name=\"f.points.").count(), points + 1);

    let resp = fetch!(
        &app,
        jar,
        jar.post_form("/admin/edit/careerpage/whyWork", &[("csrf_token", csrf.as_str()), ("action", "cancel")])
    );
    assert_eq!(location(&resp), "/career");
    assert_eq!(
        read_doc(site.content_path(), "careerpage"),
        read_doc(&bundled_content_dir(), "careerpage")
    );
}
