//! Named JSON content documents and the get/update facade over them.
//!
//! In [`ContentMode::Static`] every document comes from the copies compiled
//! into the binary and updates are refused. In [`ContentMode::Editable`]
//! documents are read from a directory at startup and every accepted update
//! is written back to `<dir>/<name>.json`.

mod bundled;
pub mod fetch;
mod page;

pub use page::PageName;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    Static,
    Editable,
}

impl ContentMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Some(ContentMode::Static),
            "editable" | "dynamic" => Some(ContentMode::Editable),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ContentError {
    Disabled,
    NotFound(String),
    InvalidPayload(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for ContentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentError::Disabled => write!(f, "Updates disabled"),
            ContentError::NotFound(name) => write!(f, "Content document '{name}' not found"),
            ContentError::InvalidPayload(e) => write!(f, "Invalid payload: {e}"),
            ContentError::Io(e) => write!(f, "Content IO error: {e}"),
            ContentError::Json(e) => write!(f, "Content JSON error: {e}"),
        }
    }
}

impl std::error::Error for ContentError {}

impl From<std::io::Error> for ContentError {
    fn from(e: std::io::Error) -> Self {
        ContentError::Io(e)
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(e: serde_json::Error) -> Self {
        ContentError::Json(e)
    }
}

pub struct ContentStore {
    mode: ContentMode,
    dir: Option<PathBuf>,
    docs: RwLock<HashMap<PageName, Value>>,
}

impl ContentStore {
    /// Store backed only by the compiled-in documents. Updates are refused.
    pub fn bundled() -> Result<Self, ContentError> {
        let mut docs = HashMap::new();
        for page in PageName::ALL {
            docs.insert(page, serde_json::from_str(bundled::source(page))?);
        }
        Ok(Self {
            mode: ContentMode::Static,
            dir: None,
            docs: RwLock::new(docs),
        })
    }

    /// Store loaded from `dir`, persisting updates back to it.
    ///
    /// A document missing from the directory falls back to its bundled copy;
    /// the file is created on the first update.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ContentError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;

        let mut docs = HashMap::new();
        for page in PageName::ALL {
            let path = dir.join(page.file_name());
            let doc = match std::fs::read_to_string(&path) {
                Ok(raw) => serde_json::from_str(&raw)?,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    log::warn!("{} missing, using bundled copy", path.display());
                    serde_json::from_str(bundled::source(page))?
                }
                Err(e) => return Err(e.into()),
            };
            docs.insert(page, doc);
        }
        log::info!("Loaded {} content documents from {}", docs.len(), dir.display());

        Ok(Self {
            mode: ContentMode::Editable,
            dir: Some(dir),
            docs: RwLock::new(docs),
        })
    }

    pub fn open(mode: ContentMode, dir: impl AsRef<Path>) -> Result<Self, ContentError> {
        match mode {
            ContentMode::Static => Self::bundled(),
            ContentMode::Editable => Self::load_dir(dir),
        }
    }

    pub fn mode(&self) -> ContentMode {
        self.mode
    }

    pub async fn get(&self, page: PageName) -> Result<Value, ContentError> {
        self.docs
            .read()
            .await
            .get(&page)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(page.to_string()))
    }

    /// Merge `payload` into the document: each top-level key replaces the
    /// section of the same name. Returns the full updated document.
    pub async fn update(&self, page: PageName, payload: Value) -> Result<Value, ContentError> {
        let dir = match (self.mode, &self.dir) {
            (ContentMode::Editable, Some(dir)) => dir,
            _ => return Err(ContentError::Disabled),
        };
        let Value::Object(sections) = payload else {
            return Err(ContentError::InvalidPayload(
                "update payload must be a JSON object".to_string(),
            ));
        };

        let mut docs = self.docs.write().await;
        let mut updated = docs
            .get(&page)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(page.to_string()))?;
        let target = updated
            .as_object_mut()
            .ok_or_else(|| ContentError::InvalidPayload(format!("{page} is not an object")))?;
        let keys: Vec<String> = sections.keys().cloned().collect();
        for (key, value) in sections {
            target.insert(key, value);
        }

        let raw = serde_json::to_string_pretty(&updated)?;
        tokio::fs::write(dir.join(page.file_name()), raw).await?;
        docs.insert(page, updated.clone());

        log::info!("Updated {page}: sections [{}]", keys.join(", "));
        Ok(updated)
    }
}
