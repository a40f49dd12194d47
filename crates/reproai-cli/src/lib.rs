//! Command-line front end for reproai.

pub mod cli_args;

use anyhow::{Context, Result};
use clap::Parser;
use reproai_core::{LoggingDestination, init_logging};
use tracing::warn;

pub use cli_args::{Cli, Command, RunArgs};

pub async fn run() -> Result<()> {
    dispatch(Cli::parse()).await
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let destination = if cli.log_file {
        LoggingDestination::FileAndStderr
    } else {
        LoggingDestination::StderrOnly
    };
    if let Err(err) = init_logging(destination) {
        eprintln!("Warning: logging disabled: {err}");
    }

    match cli.command {
        Command::Run(args) => run_report(args).await,
    }
}

async fn run_report(args: RunArgs) -> Result<()> {
    let config = args.resolve().context("failed to resolve configuration")?;
    if config.tunables.github_token.is_none() {
        warn!("No GitHub token configured; unauthenticated requests are rate limited");
    }

    let report = reproai_core::run(config)
        .await
        .context("failed to generate report")?;

    println!(
        "Report written to {} and {}",
        report.report.json_path.display(),
        report.report.html_path.display()
    );
    Ok(())
}
