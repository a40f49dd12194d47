use serde::{Deserialize, Serialize};

use crate::repository::RepositoryMetadata;

/// Count at which a repository signal saturates to 1.0.
pub const NORMALIZATION_SCALE: f64 = 500.0;

// Placeholders until Hugging Face download and citation counts are ingested.
pub const HUGGINGFACE_DOWNLOADS_PLACEHOLDER: f64 = 0.42;
pub const CITATIONS_PLACEHOLDER: f64 = 0.38;

const STARS_WEIGHT: f64 = 0.6;
const FORKS_WEIGHT: f64 = 0.3;
const ISSUES_WEIGHT: f64 = 0.1;

/// The four real-world-evidence dimensions, each rounded to two decimals.
///
/// The aggregate is derived from these on demand and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvidenceScore {
    pub github_activity: f64,
    pub huggingface_downloads: f64,
    pub citations: f64,
    pub community_adoption: f64,
}

impl EvidenceScore {
    pub fn aggregate(&self) -> f64 {
        round2(
            (self.github_activity
                + self.huggingface_downloads
                + self.citations
                + self.community_adoption)
                / 4.0,
        )
    }

    /// Dimension name/value pairs in serialization order.
    pub fn dimensions(&self) -> [(&'static str, f64); 4] {
        [
            ("github_activity", self.github_activity),
            ("huggingface_downloads", self.huggingface_downloads),
            ("citations", self.citations),
            ("community_adoption", self.community_adoption),
        ]
    }
}

pub fn normalize(value: f64, scale: f64) -> f64 {
    (value / scale).min(1.0)
}

pub fn compute_rwe_score(repo: &RepositoryMetadata) -> EvidenceScore {
    let stars = count(repo.stars);
    let forks = count(repo.forks);
    // Zero open issues is scored as one.
    let issues = count(repo.open_issues).max(1.0);

    let github_activity = normalize(stars, NORMALIZATION_SCALE) * STARS_WEIGHT
        + normalize(forks, NORMALIZATION_SCALE) * FORKS_WEIGHT
        + normalize(issues, NORMALIZATION_SCALE) * ISSUES_WEIGHT;
    let huggingface_downloads = HUGGINGFACE_DOWNLOADS_PLACEHOLDER;
    let citations = CITATIONS_PLACEHOLDER;
    let community_adoption = ((github_activity + huggingface_downloads) / 2.0).min(1.0);

    EvidenceScore {
        github_activity: round2(github_activity),
        huggingface_downloads: round2(huggingface_downloads),
        citations: round2(citations),
        community_adoption: round2(community_adoption),
    }
}

fn count(value: Option<u64>) -> f64 {
    value.unwrap_or(0) as f64
}

/// Round the stored binary value to two decimals, so 0.21499... stays 0.21
/// instead of becoming 21.5 after scaling.
pub(crate) fn round2(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}
