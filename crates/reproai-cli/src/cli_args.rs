use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use reproai_core::config::{DEFAULT_OUTPUT_DIR, RunRequest, Tunables};
use reproai_core::{AppConfig, ReportError};

/// Top-level CLI entrypoint.
#[derive(Parser, Debug, Clone)]
#[command(name = "reproai", version, about = "Reproducible AI report generator", long_about = None)]
pub struct Cli {
    /// Also write JSON logs to the reproai config directory.
    #[arg(long = "log-file", global = true, action = ArgAction::SetTrue)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Generate reproducibility report.
    Run(RunArgs),
}

/// Arguments for `reproai run`.
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// OpenAlex paper identifier.
    #[arg(long = "paper_id", alias = "paper-id", value_name = "ID")]
    pub paper_id: String,

    /// GitHub repository URL.
    #[arg(long = "github_id", alias = "github-id", value_name = "URL", value_hint = ValueHint::Url)]
    pub github_id: String,

    /// Directory to store the generated JSON and HTML reports.
    #[arg(
        long = "output_dir",
        alias = "output-dir",
        value_name = "DIR",
        default_value = DEFAULT_OUTPUT_DIR,
        value_hint = ValueHint::DirPath
    )]
    pub output_dir: PathBuf,

    /// GitHub token to increase rate limits (falls back to GITHUB_TOKEN).
    #[arg(long = "github_token", alias = "github-token", value_name = "TOKEN")]
    pub github_token: Option<String>,
}

impl RunArgs {
    /// Resolve flags and environment into the configuration handed to the core.
    pub fn resolve(self) -> Result<AppConfig, ReportError> {
        let tunables = Tunables::from_env(self.github_token)?;
        let request =
            RunRequest::new(self.paper_id, self.github_id).with_output_dir(self.output_dir);
        Ok(AppConfig::new(request, tunables))
    }
}
