use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use mockito::{Matcher, Mock, Server, ServerGuard};
use reproai_core::paper::WorkPayload;
use reproai_core::render::render_json;
use reproai_core::repository::RepoPayload;
use reproai_core::{AppConfig, Report, ReportError, RunRequest, Tunables, assemble_report, run};
use tempfile::tempdir;

const PAPER_PAYLOAD: &str = r#"{"display_name": "Test Paper", "authorships": [{"author":{"display_name":"A. Author"}}], "publication_year": 2023}"#;
const REPO_PAYLOAD: &str = r#"{"default_branch":"main","stargazers_count":100,"forks_count":10,"open_issues_count":2,"language":"Python","pushed_at":"2024-01-01T00:00:00Z"}"#;
const USER_AGENT: &str = "reproai-cli/0.1";
const TOKEN: &str = "secret-token";
// Nothing listens on tcpmux.
const UNREACHABLE_BASE_URL: &str = "http://127.0.0.1:1";

fn config(output_dir: &Path, paper_api: String, github_api: String, github_id: &str) -> AppConfig {
    let request = RunRequest::new("https://openalex.org/W123", github_id).with_output_dir(output_dir);
    let tunables = Tunables {
        openalex_api_url: paper_api,
        github_api_url: github_api,
        github_token: Some(TOKEN.to_string()),
        http_timeout: Duration::from_secs(5),
    };
    AppConfig::new(request, tunables)
}

async fn paper_mock(server: &mut ServerGuard, status: usize, body: &str) -> Mock {
    server
        .mock("GET", "/works/W123")
        .match_header("user-agent", USER_AGENT)
        .match_header("authorization", Matcher::Missing)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect(1)
        .create_async()
        .await
}

async fn repo_mock(server: &mut ServerGuard, hits: usize) -> Mock {
    server
        .mock("GET", "/repos/owner/repo")
        .match_header("user-agent", USER_AGENT)
        .match_header("accept", "application/vnd.github+json")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(REPO_PAYLOAD)
        .expect(hits)
        .create_async()
        .await
}

fn stub_report() -> Report {
    let paper: WorkPayload = serde_json::from_str(PAPER_PAYLOAD).expect("paper payload");
    let repo: RepoPayload = serde_json::from_str(REPO_PAYLOAD).expect("repo payload");
    assemble_report(
        paper.into_metadata("W123"),
        repo.into_metadata("https://github.com/owner/repo"),
        Path::new("reports"),
        Utc::now(),
    )
}

#[test]
fn stub_payloads_produce_expected_assessment() {
    let report = stub_report();
    let assessment = &report.reproducibility_assessment;

    assert_eq!(assessment.classification, "II");
    assert!((assessment.rwe_dimensions.github_activity - 0.13).abs() < 1e-9);
    assert_eq!(report.metadata.paper.title, "Test Paper");
    assert_eq!(report.metadata.paper.authors, vec!["A. Author"]);
    assert_eq!(report.metadata.paper.published_year, Some(2023));
    assert_eq!(report.metadata.repository.primary_language.as_deref(), Some("Python"));
}

#[test]
fn json_round_trips_to_equal_report() {
    let report = stub_report();
    let rendered = render_json(&report).expect("render json");

    assert!(rendered.starts_with("{\n  \"metadata\""));
    let parsed: Report = serde_json::from_str(&rendered).expect("parse json");
    assert_eq!(parsed, report);

    let value: serde_json::Value = serde_json::from_str(&rendered).expect("parse value");
    let assessment = &value["reproducibility_assessment"];
    assert_eq!(assessment["class"], "II");
    assert_eq!(assessment["rwe_dimensions"]["github_activity"], 0.13);
    assert_eq!(assessment["rwe_score"], 0.3);
    assert_eq!(value["report"]["json_path"], "reports/repo.json");
    assert!(value["metadata"]["paper"]["venue"].is_null());
}

#[tokio::test]
async fn run_fetches_both_documents_and_writes_reports() {
    let temp = tempdir().expect("tempdir");
    let output_dir = temp.path().join("out");
    let mut paper_api = Server::new_async().await;
    let mut github_api = Server::new_async().await;
    let paper = paper_mock(&mut paper_api, 200, PAPER_PAYLOAD).await;
    let repo = repo_mock(&mut github_api, 1).await;

    let config = config(
        &output_dir,
        paper_api.url(),
        github_api.url(),
        "https://github.com/owner/repo",
    );
    let report = run(config).await.expect("run succeeds");

    paper.assert_async().await;
    repo.assert_async().await;

    assert_eq!(report.report.json_path, output_dir.join("repo.json"));
    assert_eq!(report.report.html_path, output_dir.join("repo.html"));
    assert!((report.reproducibility_assessment.rwe_dimensions.github_activity - 0.13).abs() < 1e-9);

    let json = fs::read_to_string(&report.report.json_path).expect("json written");
    let parsed: Report = serde_json::from_str(&json).expect("json parses");
    assert_eq!(parsed, report);

    let html = fs::read_to_string(&report.report.html_path).expect("html written");
    assert!(html.contains("<h2>Reproducibility Assessment</h2>"));
    assert!(html.contains("Test Paper"));
}

#[tokio::test]
async fn error_status_maps_to_fetch_error_and_writes_nothing() {
    let temp = tempdir().expect("tempdir");
    let mut paper_api = Server::new_async().await;
    let mut github_api = Server::new_async().await;
    let paper = paper_mock(&mut paper_api, 404, r#"{"error":"Not Found"}"#).await;
    let repo = repo_mock(&mut github_api, 0).await;

    let config = config(
        temp.path(),
        paper_api.url(),
        github_api.url(),
        "https://github.com/owner/repo",
    );
    let err = run(config).await.expect_err("404 must fail");

    paper.assert_async().await;
    repo.assert_async().await;
    match err {
        ReportError::Fetch { url, detail } => {
            assert!(url.ends_with("/works/W123"));
            assert_eq!(detail, r#"{"error":"Not Found"}"#);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_line() {
    let temp = tempdir().expect("tempdir");
    let mut paper_api = Server::new_async().await;
    let mut github_api = Server::new_async().await;
    let paper = paper_mock(&mut paper_api, 503, "").await;
    let repo = repo_mock(&mut github_api, 0).await;

    let config = config(
        temp.path(),
        paper_api.url(),
        github_api.url(),
        "https://github.com/owner/repo",
    );
    let err = run(config).await.expect_err("503 must fail");

    paper.assert_async().await;
    repo.assert_async().await;
    match err {
        ReportError::Fetch { detail, .. } => assert_eq!(detail, "503 Service Unavailable"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_host_maps_to_fetch_error() {
    let temp = tempdir().expect("tempdir");
    let config = config(
        temp.path(),
        UNREACHABLE_BASE_URL.to_string(),
        UNREACHABLE_BASE_URL.to_string(),
        "https://github.com/owner/repo",
    );

    let err = run(config).await.expect_err("connection must fail");
    assert!(matches!(err, ReportError::Fetch { .. }), "unexpected error: {err}");
    assert!(err.to_string().starts_with("Failed to fetch "));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let temp = tempdir().expect("tempdir");
    let mut paper_api = Server::new_async().await;
    let mut github_api = Server::new_async().await;
    let paper = paper_mock(&mut paper_api, 200, "<html>not json</html>").await;
    let repo = repo_mock(&mut github_api, 0).await;

    let config = config(
        temp.path(),
        paper_api.url(),
        github_api.url(),
        "https://github.com/owner/repo",
    );
    let err = run(config).await.expect_err("decode must fail");

    paper.assert_async().await;
    repo.assert_async().await;
    assert!(matches!(err, ReportError::Decode { .. }), "unexpected error: {err}");
}

#[tokio::test]
async fn repository_without_owner_fails_after_paper_fetch() {
    let temp = tempdir().expect("tempdir");
    let mut paper_api = Server::new_async().await;
    let mut github_api = Server::new_async().await;
    let paper = paper_mock(&mut paper_api, 200, PAPER_PAYLOAD).await;
    let repo = repo_mock(&mut github_api, 0).await;

    let config = config(
        temp.path(),
        paper_api.url(),
        github_api.url(),
        "https://github.com/lonely",
    );
    let err = run(config).await.expect_err("path split must fail");

    paper.assert_async().await;
    repo.assert_async().await;
    assert!(matches!(err, ReportError::InvalidRepositoryPath { .. }));
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
