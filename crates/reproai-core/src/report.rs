use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use tracing::info;

use crate::artifacts::{ArtifactSet, build_artifacts};
use crate::config::AppConfig;
use crate::error::ReportError;
use crate::fetch::JsonFetcher;
use crate::paper::{PaperMetadata, fetch_paper_metadata};
use crate::repository::{RepositoryMetadata, fetch_repo_metadata};
use crate::score::{EvidenceScore, compute_rwe_score};

pub const REPRODUCIBILITY_CLASS: &str = "II";
pub const CLASSIFICATION_RATIONALE: &str =
    "Heuristic classification based on repository activity and metadata completeness.";
const FALLBACK_SLUG: &str = "report";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub reproducibility_assessment: Assessment,
    pub artifacts: ArtifactSet,
    pub report: ReportOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub paper: PaperMetadata,
    pub repository: RepositoryMetadata,
}

/// Classification plus evidence dimensions. `rwe_score` only exists on the
/// wire: it is recomputed from the dimensions whenever this is serialized.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Assessment {
    #[serde(rename = "class")]
    pub classification: String,
    pub classification_rationale: String,
    pub rwe_dimensions: EvidenceScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportOutput {
    pub json_path: PathBuf,
    pub html_path: PathBuf,
    pub generated_at: String,
}

impl Assessment {
    pub fn new(rwe_dimensions: EvidenceScore) -> Self {
        Self {
            classification: REPRODUCIBILITY_CLASS.to_string(),
            classification_rationale: CLASSIFICATION_RATIONALE.to_string(),
            rwe_dimensions,
        }
    }

    pub fn rwe_score(&self) -> f64 {
        self.rwe_dimensions.aggregate()
    }
}

impl Serialize for Assessment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Assessment", 4)?;
        state.serialize_field("class", &self.classification)?;
        state.serialize_field("classification_rationale", &self.classification_rationale)?;
        state.serialize_field("rwe_score", &self.rwe_score())?;
        state.serialize_field("rwe_dimensions", &self.rwe_dimensions)?;
        state.end()
    }
}

/// Fetch both documents (paper first, then repository) and assemble the
/// report. Either fetch failing aborts the whole assembly.
pub async fn build_report(
    fetcher: &JsonFetcher,
    config: &AppConfig,
) -> Result<Report, ReportError> {
    let AppConfig { request, tunables } = config;

    let paper =
        fetch_paper_metadata(fetcher, &tunables.openalex_api_url, &request.paper_id).await?;
    let repository = fetch_repo_metadata(
        fetcher,
        &tunables.github_api_url,
        &request.github_id,
        tunables.github_token.as_deref(),
    )
    .await?;

    let report = assemble_report(paper, repository, &request.output_dir, Utc::now());
    info!(
        rwe_score = report.reproducibility_assessment.rwe_score(),
        "Report assembled"
    );
    Ok(report)
}

/// Combine normalized metadata into a report. Performs no I/O.
pub fn assemble_report(
    paper: PaperMetadata,
    repository: RepositoryMetadata,
    output_dir: &Path,
    generated_at: DateTime<Utc>,
) -> Report {
    let score = compute_rwe_score(&repository);
    let artifacts = build_artifacts(&repository);
    let slug = report_slug(&repository.github_id);

    Report {
        report: ReportOutput {
            json_path: output_dir.join(format!("{slug}.json")),
            html_path: output_dir.join(format!("{slug}.html")),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, false),
        },
        metadata: ReportMetadata { paper, repository },
        reproducibility_assessment: Assessment::new(score),
        artifacts,
    }
}

/// Base name for the output files: the identifier's last path segment.
pub fn report_slug(github_id: &str) -> &str {
    match github_id.rsplit('/').next() {
        Some(slug) if !slug.is_empty() => slug,
        _ => FALLBACK_SLUG,
    }
}
