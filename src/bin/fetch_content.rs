//! Downloads every content document from a running content API and writes
//! them as pretty JSON, ready to be bundled or used as an editable directory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use corpsite::content::PageName;
use corpsite::content::fetch::{build_client, fetch_all};

#[derive(Parser, Debug)]
#[command(name = "fetch_content", about = "Fetch site content documents into a directory")]
struct Args {
    /// Base URL of the content endpoint, e.g. http://localhost:8080/api/v1/content
    #[arg(long, env = "CONTENT_API_URL", default_value = "http://localhost:8080/api/v1/content")]
    base_url: String,

    /// Directory the `<name>.json` files are written to
    #[arg(long, default_value = "content")]
    out: PathBuf,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Only fetch these documents (repeatable); all of them by default
    #[arg(long = "page")]
    pages: Vec<PageName>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let pages = if args.pages.is_empty() { PageName::ALL.to_vec() } else { args.pages };

    let client = match build_client(args.timeout) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to build HTTP client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = match fetch_all(&client, &args.base_url, &args.out, &pages).await {
        Ok(r) => r,
        Err(e) => {
            log::error!("Cannot write to {}: {e}", args.out.display());
            return ExitCode::FAILURE;
        }
    };

    log::info!("Fetched {} of {} documents", report.saved.len(), pages.len());
    if report.is_complete() {
        ExitCode::SUCCESS
    } else {
        for (page, err) in &report.failed {
            log::warn!("Missing {page}: {err}");
        }
        ExitCode::FAILURE
    }
}
