//! Pulls every content document from a remote API into a local directory.
//!
//! Best effort: a failing endpoint is logged and skipped so one bad page never
//! blocks the rest of the batch.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::PageName;

#[derive(Debug, Default)]
pub struct FetchReport {
    pub saved: Vec<(PageName, PathBuf)>,
    pub failed: Vec<(PageName, String)>,
}

impl FetchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub fn build_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

pub fn endpoint_url(base_url: &str, page: PageName) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), page.as_str())
}

async fn fetch_one(
    client: &reqwest::Client,
    base_url: &str,
    page: PageName,
    dir: &Path,
) -> Result<PathBuf, String> {
    let resp = client
        .get(endpoint_url(base_url, page))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.status().is_success() {
        return Err(format!("HTTP {}", resp.status()));
    }
    let data: serde_json::Value = resp.json().await.map_err(|e| e.to_string())?;
    let raw = serde_json::to_string_pretty(&data).map_err(|e| e.to_string())?;

    let path = dir.join(page.file_name());
    tokio::fs::write(&path, raw).await.map_err(|e| e.to_string())?;
    Ok(path)
}

pub async fn fetch_all(
    client: &reqwest::Client,
    base_url: &str,
    dir: &Path,
    pages: &[PageName],
) -> std::io::Result<FetchReport> {
    tokio::fs::create_dir_all(dir).await?;

    let mut report = FetchReport::default();
    for &page in pages {
        log::info!("Fetching {page}...");
        match fetch_one(client, base_url, page, dir).await {
            Ok(path) => {
                log::info!("Saved {page} to {}", path.display());
                report.saved.push((page, path));
            }
            Err(e) => {
                log::error!("Failed to fetch {page}: {e}");
                report.failed.push((page, e));
            }
        }
    }
    Ok(report)
}
