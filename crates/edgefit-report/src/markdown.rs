//! Markdown report generator.

use std::path::Path;

use anyhow::{Context, Result};

use edgefit_core::model::{Section, WiscarDimension};
use edgefit_core::report::AssessmentReport;

/// Generate a Markdown report from a finished assessment.
pub fn generate_markdown(report: &AssessmentReport) -> String {
    let b = &report.breakdown;
    let mut md = String::new();

    md.push_str(&format!("# {} Results\n\n", report.catalog.name));
    md.push_str(&format!(
        "_Report {} | {}_\n\n",
        report.id,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str(&format!(
        "## Overall: {}/100 ({})\n\n",
        b.overall_score, b.recommendation
    ));
    if !report.guidance.summary.is_empty() {
        md.push_str(&format!("{}\n\n", report.guidance.summary));
    }

    md.push_str("| Score | Value |\n");
    md.push_str("|-------|-------|\n");
    md.push_str(&format!("| Psychometric Fit | {}% |\n", b.psychometric_fit));
    md.push_str(&format!(
        "| Technical Readiness | {}% |\n",
        b.technical_readiness
    ));
    md.push_str(&format!(
        "| WISCAR Average | {:.2} / {} |\n\n",
        b.wiscar_average, report.catalog.scale_max
    ));

    md.push_str("### WISCAR Dimensions\n\n");
    md.push_str("| Dimension | Score |\n");
    md.push_str("|-----------|-------|\n");
    for dimension in WiscarDimension::ALL {
        md.push_str(&format!(
            "| {} | {}% |\n",
            dimension.title(),
            b.wiscar_scores.get(dimension)
        ));
    }
    md.push('\n');

    md.push_str("## Next Steps\n\n");
    for (i, step) in report.guidance.next_steps.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", i + 1, step));
    }
    md.push('\n');

    md.push_str("## Suggested Roles\n\n");
    for role in &report.guidance.career_roles {
        md.push_str(&format!("- {role}\n"));
    }
    md.push('\n');

    if !report.demographics.is_empty() {
        md.push_str("## About You\n\n");
        for (key, value) in &report.demographics {
            md.push_str(&format!("- **{key}:** {value}\n"));
        }
        md.push('\n');
    }

    md.push_str("## Answers\n");
    for section in Section::ALL {
        md.push_str(&format!("\n### {}\n\n", section.title()));
        md.push_str("| Question | Answer | Points |\n");
        md.push_str("|----------|--------|--------|\n");
        for a in report.answers_for(section) {
            md.push_str(&format!(
                "| {} | {} | {}/{} |\n",
                table_cell(&a.prompt),
                table_cell(&a.label),
                a.points,
                a.max_points
            ));
        }
    }

    md
}

/// Write a Markdown report to a file.
pub fn write_markdown_report(report: &AssessmentReport, path: &Path) -> Result<()> {
    let md = generate_markdown(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, md)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(())
}

fn table_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
