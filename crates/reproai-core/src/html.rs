//! Static HTML rendering of a [`Report`].
//!
//! Layout lives here and nowhere else; every value pulled from the report is
//! escaped before it is interpolated.

use std::fmt::Display;

use crate::artifacts::ArtifactRecord;
use crate::paper::PaperMetadata;
use crate::report::{Assessment, Report};
use crate::repository::RepositoryMetadata;

const PAGE_TITLE: &str = "Reproducible AI Report";
const MISSING: &str = "n/a";

const CSS_STYLES: &str = r#"body { font-family: Arial, sans-serif; margin: 2rem; }
h1, h2, h3 { color: #12355b; }
.card { border: 1px solid #e1e4e8; padding: 1rem; margin-bottom: 1rem; border-radius: 8px; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(240px, 1fr)); gap: 1rem; }
table { width: 100%; border-collapse: collapse; }
th, td { padding: 0.5rem; border-bottom: 1px solid #e1e4e8; text-align: left; }
code { background: #f6f8fa; padding: 0.2rem 0.4rem; border-radius: 4px; }
"#;

pub fn render_html(report: &Report) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(&format!("<title>{PAGE_TITLE}</title>\n"));
    html.push_str("<style>\n");
    html.push_str(CSS_STYLES);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(&format!("<h1>{PAGE_TITLE}</h1>\n"));

    html.push_str(&render_paper_card(&report.metadata.paper));
    html.push_str(&render_repository_card(&report.metadata.repository));
    html.push_str(&render_assessment_card(&report.reproducibility_assessment));

    let artifacts = &report.artifacts;
    html.push_str("<div class=\"card\">\n<h2>Artifacts</h2>\n");
    html.push_str(&render_artifact_table("Datasets", &artifacts.datasets));
    html.push_str(&render_artifact_table("Models", &artifacts.models));
    html.push_str(&render_artifact_table("Checkpoints", &artifacts.checkpoints));
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<p><em>Generated at {}</em></p>\n",
        escape_html(&report.report.generated_at)
    ));
    html.push_str("</body>\n</html>\n");

    html
}

fn render_paper_card(paper: &PaperMetadata) -> String {
    let mut html = String::from("<div class=\"card\">\n<h2>Paper</h2>\n");
    html.push_str(&labelled("Title", &paper.title));
    html.push_str(&labelled("Authors", &paper.authors.join(", ")));
    html.push_str(&labelled("Published", &optional(paper.published_year)));
    html.push_str(&labelled("Venue", &optional(paper.venue.as_ref())));
    html.push_str(&format!(
        "<p><strong>OpenAlex ID:</strong> <code>{}</code></p>\n",
        escape_html(&paper.paper_id)
    ));
    html.push_str("</div>\n");
    html
}

fn render_repository_card(repo: &RepositoryMetadata) -> String {
    let mut html = String::from("<div class=\"card\">\n<h2>Repository</h2>\n");
    html.push_str(&format!(
        "<p><strong>GitHub:</strong> <code>{}</code></p>\n",
        escape_html(&repo.github_id)
    ));
    html.push_str(&labelled(
        "Default branch",
        &optional(repo.default_branch.as_ref()),
    ));

    let stats = [
        ("Stars", optional(repo.stars)),
        ("Forks", optional(repo.forks)),
        ("Open issues", optional(repo.open_issues)),
        ("Primary language", optional(repo.primary_language.as_ref())),
        ("Last push", optional(repo.updated_at.as_ref())),
    ];
    html.push_str("<div class=\"grid\">\n");
    for (label, value) in stats {
        html.push_str(&format!(
            "<div><strong>{label}:</strong> {}</div>\n",
            escape_html(&value)
        ));
    }
    html.push_str("</div>\n</div>\n");
    html
}

fn render_assessment_card(assessment: &Assessment) -> String {
    let mut html = String::from("<div class=\"card\">\n<h2>Reproducibility Assessment</h2>\n");
    html.push_str(&labelled("Class", &assessment.classification));
    html.push_str(&labelled(
        "Rationale",
        &assessment.classification_rationale,
    ));
    html.push_str("<h3>Real-world Evidence</h3>\n");
    html.push_str("<table>\n<thead><tr><th>Dimension</th><th>Score</th></tr></thead>\n<tbody>\n");
    for (name, value) in assessment.rwe_dimensions.dimensions() {
        html.push_str(&format!("<tr><td>{name}</td><td>{value}</td></tr>\n"));
    }
    html.push_str("</tbody>\n</table>\n");
    html.push_str(&labelled(
        "Aggregate RWE Score",
        &assessment.rwe_score().to_string(),
    ));
    html.push_str("</div>\n");
    html
}

/// One titled table per artifact list.
///
/// Header cells come from the first entry's field names, so an empty list
/// renders an empty header row and an empty body.
pub fn render_artifact_table<T: ArtifactRecord>(title: &str, items: &[T]) -> String {
    let headers: String = items
        .first()
        .map(|item| {
            item.fields()
                .into_iter()
                .map(|(key, _)| format!("<th>{}</th>", escape_html(key)))
                .collect::<String>()
        })
        .unwrap_or_default();

    let rows: String = items
        .iter()
        .map(|item| {
            let cells: String = item
                .fields()
                .into_iter()
                .map(|(_, value)| format!("<td>{}</td>", escape_html(&value)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    format!(
        "<h3>{}</h3>\n<table>\n<thead><tr>{headers}</tr></thead>\n<tbody>{rows}</tbody>\n</table>\n",
        escape_html(title)
    )
}

fn labelled(label: &str, value: &str) -> String {
    format!("<p><strong>{label}:</strong> {}</p>\n", escape_html(value))
}

fn optional<T: Display>(value: Option<T>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
