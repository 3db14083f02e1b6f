//! Offline content fetch against a local content API: failing endpoints are
//! logged and skipped, the rest land on disk as pretty JSON.

use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use corpsite::content::PageName;
use corpsite::content::fetch::{build_client, endpoint_url, fetch_all};

fn served(page: &str) -> Option<Value> {
    match page {
        "homepage" => Some(json!({
            "hero": {"title": "Welcome", "subtitle": "Since 1998"},
            "stats": [{"value": "2,500+", "label": "Workers"}]
        })),
        "layout" => Some(json!({"header": {"companyName": "KUNAL"}, "footer": {}})),
        _ => None,
    }
}

async fn content(path: web::Path<String>) -> HttpResponse {
    let page = path.into_inner();
    match page.as_str() {
        "aboutpage" => HttpResponse::InternalServerError().body("boom"),
        "missionpage" => HttpResponse::Ok().content_type("text/plain").body("not json"),
        _ => match served(&page) {
            Some(doc) => HttpResponse::Ok().json(doc),
            None => HttpResponse::NotFound().json(json!({"error": "Not found"})),
        },
    }
}

/// Start a content API on an ephemeral port; returns its base URL.
fn start_api() -> std::io::Result<(String, actix_web::dev::ServerHandle)> {
    let server = HttpServer::new(|| {
        App::new().route("/api/v1/content/{page}", web::get().to(content))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}/api/v1/content"), handle))
}

#[test]
fn test_endpoint_url_joins_base_and_name() {
    assert_eq!(
        endpoint_url("http://localhost:8080/api/v1/content", PageName::Home),
        "http://localhost:8080/api/v1/content/homepage"
    );
    assert_eq!(
        endpoint_url("http://localhost:8080/api/v1/content/", PageName::Layout),
        "http://localhost:8080/api/v1/content/layout"
    );
}

#[actix_web::test]
async fn test_fetch_skips_failing_pages_and_saves_the_rest() {
    let (base, handle) = start_api().expect("Failed to start content API");
    let out = TempDir::new().expect("Failed to create temp dir");
    let dir = out.path().join("content");

    let client = build_client(5).expect("client");
    let pages = [
        PageName::Home,
        PageName::About,
        PageName::Mission,
        PageName::Gallery,
        PageName::Layout,
    ];
    let report = fetch_all(&client, &base, &dir, &pages).await.expect("fetch");
    handle.stop(true).await;

    let saved: Vec<PageName> = report.saved.iter().map(|(p, _)| *p).collect();
    let failed: Vec<PageName> = report.failed.iter().map(|(p, _)| *p).collect();
    assert_eq!(saved, vec![PageName::Home, PageName::Layout]);
    assert_eq!(failed, vec![PageName::About, PageName::Mission, PageName::Gallery]);
    assert!(!report.is_complete());

    let (_, about_err) = &report.failed[0];
    assert!(about_err.contains("500"), "{about_err}");
    let (_, gallery_err) = &report.failed[2];
    assert!(gallery_err.contains("404"), "{gallery_err}");

    for (page, path) in &report.saved {
        assert_eq!(path, &dir.join(format!("{}.json", page.as_str())));
        let raw = std::fs::read_to_string(path).expect("Failed to read saved page");
        let expected = served(page.as_str()).expect("served page");
        assert_eq!(raw, serde_json::to_string_pretty(&expected).expect("pretty json"));
    }
    assert!(!dir.join("aboutpage.json").exists());
    assert!(!dir.join("missionpage.json").exists());
    assert!(!dir.join("gallerypage.json").exists());
}

#[actix_web::test]
async fn test_fetch_reports_unreachable_api() {
    let out = TempDir::new().expect("Failed to create temp dir");
    // nothing listens on port 9 of the loopback
    let client = build_client(2).expect("client");
    let base = "http://127.0.0.1:9/api/v1/content";
    let report = fetch_all(&client, base, out.path(), &[PageName::Home]).await.expect("fetch");

    assert!(report.saved.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert!(!report.is_complete());
}
