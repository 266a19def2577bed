//! JSON report output.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;

use edgefit_core::report::AssessmentReport;

/// Generate the JSON document for a finished assessment.
///
/// The report is nested under `report` next to a `generator` block naming
/// the edgefit version that produced it.
pub fn generate_json(report: &AssessmentReport) -> Result<serde_json::Value> {
    let body = serde_json::to_value(report).context("failed to serialize report")?;
    Ok(json!({
        "generator": {
            "name": "edgefit",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "report": body,
    }))
}

/// Write a pretty-printed JSON report to a file.
pub fn write_json_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let doc = generate_json(report)?;
    let json = serde_json::to_string_pretty(&doc)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}
