use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to fetch {url}: {detail}")]
    Fetch { url: String, detail: String },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("repository identifier '{github_id}' does not contain an owner/name path")]
    InvalidRepositoryPath { github_id: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ReportError {
    pub fn fetch<U: Into<String>, D: Into<String>>(url: U, detail: D) -> Self {
        ReportError::Fetch {
            url: url.into(),
            detail: detail.into(),
        }
    }
}
