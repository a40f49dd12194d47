use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dirs::config_dir;

use crate::error::ReportError;

const CONFIG_DIR_NAME: &str = "reproai";

/// Output directory used when the caller does not pick one.
pub const DEFAULT_OUTPUT_DIR: &str = "reports";
pub const DEFAULT_OPENALEX_API_URL: &str = "https://api.openalex.org";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Environment variable consulted when no token is passed explicitly.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// The paper/repository pair a single run reports on.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub paper_id: String,
    pub github_id: String,
    pub output_dir: PathBuf,
}

/// Knobs resolved once at startup and passed down to the fetchers.
#[derive(Debug, Clone)]
pub struct Tunables {
    pub openalex_api_url: String,
    pub github_api_url: String,
    pub github_token: Option<String>,
    pub http_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub request: RunRequest,
    pub tunables: Tunables,
}

impl RunRequest {
    pub fn new<P: Into<String>, G: Into<String>>(paper_id: P, github_id: G) -> Self {
        Self {
            paper_id: paper_id.into(),
            github_id: github_id.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    pub fn with_output_dir<D: Into<PathBuf>>(mut self, output_dir: D) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            openalex_api_url: DEFAULT_OPENALEX_API_URL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_token: None,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl Tunables {
    /// Resolve tunables from the process environment.
    ///
    /// An explicit, non-empty `token_override` wins over `GITHUB_TOKEN`.
    pub fn from_env(token_override: Option<String>) -> Result<Self, ReportError> {
        let openalex_api_url = env::var("REPROAI_OPENALEX_API_URL")
            .unwrap_or_else(|_| DEFAULT_OPENALEX_API_URL.to_string());
        let github_api_url = env::var("REPROAI_GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string());
        let timeout_secs = parse_u64_env("REPROAI_HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        let github_token = resolve_token(token_override, env::var(GITHUB_TOKEN_ENV).ok());

        Ok(Self {
            openalex_api_url: trim_base_url(&openalex_api_url),
            github_api_url: trim_base_url(&github_api_url),
            github_token,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl AppConfig {
    pub fn new(request: RunRequest, tunables: Tunables) -> Self {
        Self { request, tunables }
    }
}

/// Directory holding reproai's own state (currently only logs).
pub fn config_directory() -> PathBuf {
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

fn resolve_token(explicit: Option<String>, from_env: Option<String>) -> Option<String> {
    explicit
        .filter(|token| !token.is_empty())
        .or_else(|| from_env.filter(|token| !token.is_empty()))
}

fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_u64_env(var: &str, default: u64) -> Result<u64, ReportError> {
    match env::var(var) {
        Ok(value) => parse_u64_value(var, &value),
        Err(_) => Ok(default),
    }
}

fn parse_u64_value(var: &str, value: &str) -> Result<u64, ReportError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|err| ReportError::Config(format!("invalid value for {}: {}", var, err)))
}
