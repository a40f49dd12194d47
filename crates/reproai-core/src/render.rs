use std::fs;

use tracing::info;

use crate::error::ReportError;
use crate::html::render_html;
use crate::report::Report;

/// Pretty-printed (two-space indented) JSON with a trailing newline.
pub fn render_json(report: &Report) -> Result<String, ReportError> {
    let serialized = serde_json::to_string_pretty(report)?;
    Ok(format!("{serialized}\n"))
}

/// Write the JSON and HTML renderings to the paths recorded in the report.
///
/// Files are written in place, not via a temp file and rename, so a crash
/// mid-write can leave a truncated report behind.
pub fn write_report(report: &Report) -> Result<(), ReportError> {
    let json_path = &report.report.json_path;
    let html_path = &report.report.html_path;

    fs::write(json_path, render_json(report)?)?;
    fs::write(html_path, render_html(report))?;

    info!(
        json = %json_path.display(),
        html = %html_path.display(),
        "Report files written"
    );
    Ok(())
}
