//! Runtime configuration from environment variables (and `.env` via dotenvy).
//!
//! | Variable              | Default            |
//! |-----------------------|--------------------|
//! | `BIND_ADDR`           | `127.0.0.1:8080`   |
//! | `CONTENT_MODE`        | `static`           |
//! | `CONTENT_DIR`         | `data/content`     |
//! | `UPLOAD_DIR`          | `data/uploads`     |
//! | `ADMIN_USERNAME`      | `admin`            |
//! | `ADMIN_PASSWORD_HASH` | unset              |
//! | `ADMIN_PASSWORD`      | `admin123`         |
//! | `TOKEN_TTL_HOURS`     | `12`               |
//! | `SESSION_KEY`         | random per process |

use std::fmt;
use std::path::PathBuf;

use crate::auth::password;
use crate::content::ContentMode;

#[derive(Debug)]
pub enum ConfigError {
    Invalid { key: &'static str, value: String },
    Hash(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { key, value } => write!(f, "Invalid value for {key}: '{value}'"),
            ConfigError::Hash(e) => write!(f, "Failed to hash admin password: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub content_mode: ContentMode,
    pub content_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub admin_username: String,
    pub admin_password_hash: String,
    pub token_ttl_hours: i64,
    pub session_key: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let mode_raw = get("CONTENT_MODE", "static");
        let content_mode = ContentMode::parse(&mode_raw)
            .ok_or(ConfigError::Invalid { key: "CONTENT_MODE", value: mode_raw })?;

        let ttl_raw = get("TOKEN_TTL_HOURS", "12");
        let token_ttl_hours = ttl_raw
            .parse::<i64>()
            .ok()
            .filter(|h| *h > 0)
            .ok_or(ConfigError::Invalid { key: "TOKEN_TTL_HOURS", value: ttl_raw })?;

        let admin_password_hash = match lookup("ADMIN_PASSWORD_HASH") {
            Some(hash) => hash,
            None => {
                let plain = lookup("ADMIN_PASSWORD").unwrap_or_else(|| {
                    if content_mode == ContentMode::Editable {
                        log::warn!("No ADMIN_PASSWORD set, using the default admin password");
                    }
                    "admin123".to_string()
                });
                password::hash_password(&plain).map_err(|e| ConfigError::Hash(e.to_string()))?
            }
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR", "127.0.0.1:8080"),
            content_mode,
            content_dir: PathBuf::from(get("CONTENT_DIR", "data/content")),
            upload_dir: PathBuf::from(get("UPLOAD_DIR", "data/uploads")),
            admin_username: get("ADMIN_USERNAME", "admin"),
            admin_password_hash,
            token_ttl_hours,
            session_key: lookup("SESSION_KEY"),
        })
    }
}
