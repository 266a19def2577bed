//! The `edgefit init` command.

use std::path::Path;

use anyhow::{Context, Result};

use edgefit_core::model::Section;
use edgefit_core::Catalog;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("edgefit.toml"), SAMPLE_CONFIG)?;

    let catalog = Catalog::builtin()?;
    write_if_missing(Path::new("answers.toml"), &answer_sheet_template(&catalog))?;

    println!("\nNext steps:");
    println!("  1. Edit answers.toml with your own answers");
    println!("  2. Run: edgefit score --answers answers.toml");
    println!("  3. Or take the quiz interactively: edgefit take");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Created {}", path.display());
    }
    Ok(())
}

/// An answer sheet covering every question, pre-filled with the middle
/// option and listing all options as comments.
fn answer_sheet_template(catalog: &Catalog) -> String {
    let mut s = format!("# Answers for {}\n", catalog.name);
    s.push_str("# Replace each value with the option that fits you best.\n");
    s.push_str("\n[demographics]\n# experience = \"2 years\"\n");

    for section in Section::ALL {
        s.push_str(&format!("\n# {}\n[{section}]\n", section.title()));
        for q in catalog.questions_for(section) {
            let options = q
                .options
                .iter()
                .map(|o| format!("{}={}", o.value, o.label))
                .collect::<Vec<_>>()
                .join(", ");
            let middle = &q.options[(q.options.len() - 1) / 2].value;
            s.push_str(&format!("# {}\n# {options}\n", q.prompt));
            s.push_str(&format!("{} = \"{middle}\"\n", q.id));
        }
    }
    s
}

const SAMPLE_CONFIG: &str = r#"# edgefit configuration

# catalog = "my-catalog.toml"
# guidance = "my-guidance.toml"
output_dir = "./edgefit-reports"
formats = ["markdown"]

[scoring]
# per_dimension scores each WISCAR dimension from its own questions;
# section_mean gives every dimension the whole-section mean.
wiscar_mode = "per_dimension"
yes_threshold = 80
maybe_threshold = 60
"#;
