//! Paper + repository reproducibility report generation.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod fetch;
pub mod html;
pub mod logging;
pub mod paper;
pub mod render;
pub mod report;
pub mod repository;
pub mod score;

use std::fs;

use tracing::info;

pub use config::{AppConfig, RunRequest, Tunables};
pub use error::ReportError;
pub use logging::{LoggingDestination, LoggingError, init_logging};
pub use report::{Report, assemble_report, build_report};

use fetch::JsonFetcher;
use render::write_report;

/// Fetch, score, render and write one report. Nothing is written unless
/// both fetches succeed.
pub async fn run(config: AppConfig) -> Result<Report, ReportError> {
    let fetcher = JsonFetcher::new(config.tunables.http_timeout)?;

    fs::create_dir_all(&config.request.output_dir)?;
    info!(
        paper_id = %config.request.paper_id,
        github_id = %config.request.github_id,
        "Generating report"
    );

    let report = build_report(&fetcher, &config).await?;
    write_report(&report)?;
    Ok(report)
}
