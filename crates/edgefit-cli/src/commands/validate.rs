//! The `edgefit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use edgefit_core::parser::{parse_catalog, validate_catalog};
use edgefit_core::GuidanceTable;

pub fn execute(catalog_path: PathBuf, guidance_path: Option<PathBuf>) -> Result<()> {
    let catalog = parse_catalog(&catalog_path)?;
    let summary = catalog.summary();
    println!(
        "Catalog: {} ({} psychometric, {} technical, {} wiscar)",
        summary.name,
        summary.psychometric_count,
        summary.technical_count,
        summary.wiscar_count
    );

    let warnings = validate_catalog(&catalog);
    for w in &warnings {
        let prefix = match (&w.section, &w.question_id) {
            (_, Some(id)) => format!("  [{id}]"),
            (Some(section), None) => format!("  [{section}]"),
            (None, None) => "  ".to_string(),
        };
        println!("{prefix} WARNING: {}", w.message);
    }

    if let Some(path) = guidance_path {
        GuidanceTable::load(&path)?;
        println!("Guidance: {} OK", path.display());
    }

    if warnings.is_empty() {
        println!("Catalog valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
