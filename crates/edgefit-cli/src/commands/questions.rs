//! The `edgefit questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, ContentArrangement, Table};

use edgefit_core::model::Section;
use edgefit_core::Catalog;

use super::context::AssessmentContext;

pub fn execute(
    section: Option<Section>,
    catalog: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let ctx = AssessmentContext::load(config_path.as_deref(), catalog.as_deref())?;
    let sections = match section {
        Some(section) => vec![section],
        None => Section::ALL.to_vec(),
    };

    println!("Catalog: {} ({})", ctx.catalog.name, ctx.catalog.id);
    for section in sections {
        println!("\n{}", render_section(&ctx.catalog, section));
    }
    Ok(())
}

fn render_section(catalog: &Catalog, section: Section) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Kind", "Category", "Prompt", "Options"]);

    for q in catalog.questions_for(section) {
        let category = match q.dimension {
            Some(dimension) => format!("{} ({})", q.category, dimension.title()),
            None => q.category.clone(),
        };
        let options = q
            .options
            .iter()
            .map(|o| format!("{}={}", o.value, o.points))
            .collect::<Vec<_>>()
            .join(" ");
        table.add_row(vec![
            Cell::new(&q.id),
            Cell::new(q.kind),
            Cell::new(category),
            Cell::new(&q.prompt),
            Cell::new(options),
        ]);
    }

    format!(
        "{} ({} questions)\n{table}",
        section.title(),
        catalog.len(section)
    )
}
