//! The `edgefit score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use edgefit_core::model::Section;
use edgefit_core::parser::{parse_answer_sheet, AnswerSheet};
use edgefit_core::session::{Session, Transition};

use super::context::{export, render_summary, AssessmentContext};

pub fn execute(
    answers_path: PathBuf,
    catalog: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let ctx = AssessmentContext::load(config_path.as_deref(), catalog.as_deref())?;
    let formats = ctx.formats(Some(&format))?;
    let output = ctx.output_dir(output);

    let sheet = parse_answer_sheet(&answers_path)?;
    let mut session = Session::new(ctx.catalog.clone());
    replay(&mut session, &sheet)
        .with_context(|| format!("invalid answer sheet: {}", answers_path.display()))?;

    let report = session.report(&ctx.guidance, &ctx.config.scoring)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report.breakdown)?);
    } else {
        println!("{}", render_summary(&report));
    }
    export(&report, &output, &formats)?;
    Ok(())
}

/// Feed an answer sheet through the same gated flow an interactive run uses.
fn replay(session: &mut Session, sheet: &AnswerSheet) -> Result<()> {
    for (key, value) in &sheet.demographics {
        session.set_demographic(key.as_str(), value.as_str())?;
    }

    session.start();
    for section in Section::ALL {
        for (question_id, value) in sheet.answers_for(section) {
            session.record_answer(section, question_id, value)?;
        }
        if let Transition::Rejected { reason, .. } = session.submit(section) {
            anyhow::bail!("{section} section: {reason}");
        }
    }
    Ok(())
}
