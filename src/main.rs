use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use corpsite::auth::Authenticator;
use corpsite::auth::tokens::TokenStore;
use corpsite::config::AppConfig;
use corpsite::content::{ContentMode, ContentStore};
use corpsite::forms::EditSessions;
use corpsite::handlers;
use corpsite::uploads::UploadStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().unwrap_or_else(|e| {
        log::error!("Invalid configuration: {e}");
        std::process::exit(1);
    });

    let store = ContentStore::open(config.content_mode, &config.content_dir).unwrap_or_else(|e| {
        log::error!("Failed to load content: {e}");
        std::process::exit(1);
    });
    let uploads = match config.content_mode {
        ContentMode::Editable => {
            std::fs::create_dir_all(&config.upload_dir)?;
            UploadStore::new(&config.upload_dir, "/uploads")
        }
        ContentMode::Static => UploadStore::disabled(),
    };
    let auth = Authenticator::new(
        config.content_mode,
        &config.admin_username,
        &config.admin_password_hash,
        TokenStore::new(chrono::Duration::hours(config.token_ttl_hours)),
    );
    log::info!(
        "Content mode: {:?}, admin login {}",
        config.content_mode,
        if auth.is_enabled() { "enabled" } else { "disabled" }
    );

    let store = web::Data::new(store);
    let uploads = web::Data::new(uploads);
    let auth = web::Data::new(auth);
    let edits = web::Data::new(EditSessions::new());

    // Session encryption key: load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match &config.session_key {
        Some(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Some(val) => {
            log::warn!("SESSION_KEY too short ({} bytes, need 64+), generating random key", val.len());
            Key::generate()
        }
        None => {
            log::warn!("No SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let upload_dir = config.upload_dir.clone();
    let serve_uploads = uploads.is_enabled();

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        let mut app = App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(store.clone())
            .app_data(uploads.clone())
            .app_data(auth.clone())
            .app_data(edits.clone())
            // Static files
            .service(actix_files::Files::new("/static", "./static"));
        if serve_uploads {
            app = app.service(actix_files::Files::new("/uploads", upload_dir.clone()));
        }

        app.configure(handlers::configure)
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(&config.bind_addr)?
    .run()
    .await
}
