use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;

pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug)]
pub enum UploadError {
    Disabled,
    Empty,
    UnsupportedType(String),
    TooLarge(usize),
    Io(std::io::Error),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::Disabled => write!(f, "Uploads disabled"),
            UploadError::Empty => write!(f, "Upload is empty"),
            UploadError::UnsupportedType(t) => write!(f, "Unsupported image type '{t}'"),
            UploadError::TooLarge(n) => {
                write!(f, "Upload of {n} bytes exceeds the {MAX_UPLOAD_BYTES} byte limit")
            }
            UploadError::Io(e) => write!(f, "Upload IO error: {e}"),
        }
    }
}

impl std::error::Error for UploadError {}

impl From<std::io::Error> for UploadError {
    fn from(e: std::io::Error) -> Self {
        UploadError::Io(e)
    }
}

/// File extension for an accepted image content type.
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next().unwrap_or("").trim();
    match mime.to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        "image/svg+xml" => Some("svg"),
        _ => None,
    }
}

/// Stores uploaded images under a directory and hands back their public URL.
pub struct UploadStore {
    dir: Option<PathBuf>,
    url_prefix: String,
}

impl UploadStore {
    pub fn new(dir: impl AsRef<Path>, url_prefix: &str) -> Self {
        Self {
            dir: Some(dir.as_ref().to_path_buf()),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Store that refuses every upload.
    pub fn disabled() -> Self {
        Self { dir: None, url_prefix: String::new() }
    }

    pub fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub async fn store(&self, bytes: &[u8], content_type: &str) -> Result<String, UploadError> {
        let dir = self.dir.as_ref().ok_or(UploadError::Disabled)?;
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge(bytes.len()));
        }
        let ext = extension_for(content_type)
            .ok_or_else(|| UploadError::UnsupportedType(content_type.to_string()))?;

        let id: [u8; 8] = rand::rng().random();
        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        let file_name = format!("{stamp}-{}.{ext}", hex::encode(id));
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        log::info!("Stored upload {file_name} ({} bytes)", bytes.len());
        Ok(format!("{}/{file_name}", self.url_prefix))
    }
}
