//! edgefit-report — Markdown, HTML, and JSON renderings of a finished
//! assessment.

pub mod html;
pub mod json;
pub mod markdown;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Result;

use edgefit_core::report::AssessmentReport;

/// An export format for a finished assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    Markdown,
    Html,
    Json,
}

impl ReportFormat {
    pub const ALL: [ReportFormat; 3] = [
        ReportFormat::Markdown,
        ReportFormat::Html,
        ReportFormat::Json,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Markdown => write!(f, "markdown"),
            ReportFormat::Html => write!(f, "html"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!(
                "unknown report format: {other} (expected markdown, html, or json)"
            )),
        }
    }
}

/// Parse a format selection such as `markdown,html`, `all`, or `none`.
///
/// Duplicates are dropped; order is preserved.
pub fn parse_formats<S: AsRef<str>>(items: &[S]) -> Result<Vec<ReportFormat>, String> {
    let mut formats = Vec::new();
    for item in items.iter().flat_map(|s| s.as_ref().split(',')) {
        let item = item.trim();
        match item.to_lowercase().as_str() {
            "" => continue,
            "none" => return Ok(Vec::new()),
            "all" => return Ok(ReportFormat::ALL.to_vec()),
            _ => {
                let format: ReportFormat = item.parse()?;
                if !formats.contains(&format) {
                    formats.push(format);
                }
            }
        }
    }
    Ok(formats)
}

/// Write `report` into `dir` once per format. Returns the written paths.
pub fn write_reports(
    report: &AssessmentReport,
    dir: &Path,
    formats: &[ReportFormat],
) -> Result<Vec<PathBuf>> {
    let stem = report.file_stem();
    let mut written = Vec::with_capacity(formats.len());
    for &format in formats {
        let path = dir.join(format!("{stem}.{}", format.extension()));
        match format {
            ReportFormat::Markdown => markdown::write_markdown_report(report, &path)?,
            ReportFormat::Html => html::write_html_report(report, &path)?,
            ReportFormat::Json => json::write_json_report(report, &path)?,
        }
        written.push(path);
    }
    Ok(written)
}
