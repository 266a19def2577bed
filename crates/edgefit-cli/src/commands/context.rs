//! Config, catalog, and guidance resolution shared by the commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use edgefit_core::config::{load_config_from, EdgefitConfig};
use edgefit_core::model::WiscarDimension;
use edgefit_core::parser;
use edgefit_core::report::AssessmentReport;
use edgefit_core::{Catalog, GuidanceTable};
use edgefit_report::{parse_formats, write_reports, ReportFormat};

/// Everything a command needs to run an assessment.
pub struct AssessmentContext {
    pub config: EdgefitConfig,
    pub catalog: Catalog,
    pub guidance: GuidanceTable,
}

impl AssessmentContext {
    /// Load config, then the catalog (`--catalog` beats config beats
    /// built-in) and guidance (config beats built-in).
    pub fn load(config_path: Option<&Path>, catalog_override: Option<&Path>) -> Result<Self> {
        let config = load_config_from(config_path)?;

        let catalog = match catalog_override.or(config.catalog.as_deref()) {
            Some(path) => parser::parse_catalog(path)?,
            None => Catalog::builtin()?,
        };
        let guidance = match config.guidance.as_deref() {
            Some(path) => GuidanceTable::load(path)?,
            None => GuidanceTable::builtin()?,
        };

        tracing::debug!(catalog = %catalog.id, "assessment context ready");
        Ok(Self {
            config,
            catalog,
            guidance,
        })
    }

    /// Formats from `--format`, falling back to the config.
    pub fn formats(&self, flag: Option<&str>) -> Result<Vec<ReportFormat>> {
        let parsed = match flag {
            Some(flag) => parse_formats(&[flag]),
            None => parse_formats(self.config.formats.as_slice()),
        };
        parsed.map_err(|e| anyhow::anyhow!(e))
    }

    /// Output directory from `--output`, falling back to the config.
    pub fn output_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.unwrap_or_else(|| self.config.output_dir.clone())
    }
}

/// Write the report in each format and announce the paths on stderr.
pub fn export(report: &AssessmentReport, dir: &Path, formats: &[ReportFormat]) -> Result<()> {
    if formats.is_empty() {
        return Ok(());
    }
    let paths = write_reports(report, dir, formats)
        .with_context(|| format!("failed to export report to {}", dir.display()))?;
    for path in paths {
        eprintln!("Report saved to: {}", path.display());
    }
    Ok(())
}

/// Score table plus guidance, as printed after an assessment.
pub fn render_summary(report: &AssessmentReport) -> String {
    let b = &report.breakdown;

    let mut table = Table::new();
    table.set_header(vec!["Score", "Value"]);
    table.add_row(vec![
        Cell::new("Overall"),
        Cell::new(format!("{}/100 ({})", b.overall_score, b.recommendation)),
    ]);
    table.add_row(vec![
        Cell::new("Psychometric Fit"),
        Cell::new(format!("{}%", b.psychometric_fit)),
    ]);
    table.add_row(vec![
        Cell::new("Technical Readiness"),
        Cell::new(format!("{}%", b.technical_readiness)),
    ]);
    for dimension in WiscarDimension::ALL {
        table.add_row(vec![
            Cell::new(format!("WISCAR {}", dimension.title())),
            Cell::new(format!("{}%", b.wiscar_scores.get(dimension))),
        ]);
    }

    let mut out = format!("{table}\n");
    if !report.guidance.summary.is_empty() {
        out.push_str(&format!("\n{}\n", report.guidance.summary));
    }
    out.push_str("\nNext steps:\n");
    for (i, step) in report.guidance.next_steps.iter().enumerate() {
        out.push_str(&format!("  {}. {step}\n", i + 1));
    }
    out.push_str("\nSuggested roles:\n");
    for role in &report.guidance.career_roles {
        out.push_str(&format!("  - {role}\n"));
    }
    out
}
