use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::ReportError;

/// Identifying agent attached to every outgoing request.
pub const DEFAULT_USER_AGENT: &str = "reproai-cli/0.1";

/// Thin wrapper over a `reqwest::Client` that issues single GETs and decodes
/// the body as JSON. There are no retries and nothing is cached.
#[derive(Debug, Clone)]
pub struct JsonFetcher {
    client: Client,
}

impl JsonFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ReportError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// GET `url` and decode the response body into `T`.
    ///
    /// Caller headers replace the defaults on key collision. Transport errors
    /// and non-2xx statuses both surface as [`ReportError::Fetch`].
    pub async fn fetch<T>(&self, url: &str, headers: Option<HeaderMap>) -> Result<T, ReportError>
    where
        T: DeserializeOwned,
    {
        let request_headers = merge_headers(headers);
        info!(%url, "Fetching");

        let response = self
            .client
            .get(url)
            .headers(request_headers)
            .send()
            .await
            .map_err(|err| {
                warn!(%url, error = %err, "Request failed");
                ReportError::fetch(url, err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            };
            warn!(%url, %status, "Request returned an error status");
            return Err(ReportError::fetch(url, detail));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| ReportError::fetch(url, err.to_string()))?;
        debug!(%url, bytes = body.len(), "Response received");

        serde_json::from_slice(&body).map_err(|source| ReportError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}

fn merge_headers(extra: Option<HeaderMap>) -> HeaderMap {
    let mut headers = default_headers();
    if let Some(extra) = extra {
        headers.extend(extra);
    }
    headers
}
