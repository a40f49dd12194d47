use reqwest::Url;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::fetch::JsonFetcher;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    pub github_id: String,
    pub default_branch: Option<String>,
    pub stars: Option<u64>,
    pub forks: Option<u64>,
    pub open_issues: Option<u64>,
    pub primary_language: Option<String>,
    pub updated_at: Option<String>,
}

/// Owner and name pulled out of a repository identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
}

impl RepoCoordinates {
    /// Split the identifier's path on its first `/`.
    ///
    /// Anything after the second segment stays part of `name`, so
    /// `owner/repo/tree/main` yields the name `repo/tree/main`.
    pub fn parse(github_id: &str) -> Result<Self, ReportError> {
        let path = match Url::parse(github_id) {
            Ok(url) => url.path().to_string(),
            Err(_) => github_id.to_string(),
        };

        let (owner, name) = path
            .trim_matches('/')
            .split_once('/')
            .ok_or_else(|| ReportError::InvalidRepositoryPath {
                github_id: github_id.to_string(),
            })?;

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    pub fn api_url(&self, api_base: &str) -> String {
        format!("{}/repos/{}/{}", api_base, self.owner, self.name)
    }
}

/// Fetch repository details from the GitHub REST API and normalize them.
pub async fn fetch_repo_metadata(
    fetcher: &JsonFetcher,
    api_base: &str,
    github_id: &str,
    token: Option<&str>,
) -> Result<RepositoryMetadata, ReportError> {
    let coordinates = RepoCoordinates::parse(github_id)?;
    let url = coordinates.api_url(api_base);
    let payload: RepoPayload = fetcher.fetch(&url, Some(github_headers(token)?)).await?;
    Ok(payload.into_metadata(github_id))
}

fn github_headers(token: Option<&str>) -> Result<HeaderMap, ReportError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    if let Some(token) = token {
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|err| ReportError::Config(format!("invalid GitHub token: {err}")))?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

#[derive(Debug, Deserialize)]
pub struct RepoPayload {
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    stargazers_count: Option<u64>,
    #[serde(default)]
    forks_count: Option<u64>,
    #[serde(default)]
    open_issues_count: Option<u64>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    pushed_at: Option<String>,
}

impl RepoPayload {
    pub fn into_metadata(self, github_id: &str) -> RepositoryMetadata {
        RepositoryMetadata {
            github_id: github_id.to_string(),
            default_branch: self.default_branch,
            stars: self.stargazers_count,
            forks: self.forks_count,
            open_issues: self.open_issues_count,
            primary_language: self.language,
            updated_at: self.pushed_at,
        }
    }
}
