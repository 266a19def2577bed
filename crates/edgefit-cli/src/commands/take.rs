//! The `edgefit take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use edgefit_core::model::{Question, Section};
use edgefit_core::session::{Session, Stage, Transition};

use super::context::{export, render_summary, AssessmentContext};

pub fn execute(
    catalog: Option<PathBuf>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let ctx = AssessmentContext::load(config_path.as_deref(), catalog.as_deref())?;
    let formats = ctx.formats(format.as_deref())?;
    let output = ctx.output_dir(output);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(ctx.catalog.clone());
    run_session(&mut session, &mut stdin.lock(), &mut stdout.lock())?;

    let report = session.report(&ctx.guidance, &ctx.config.scoring)?;
    println!("\n{}", render_summary(&report));
    export(&report, &output, &formats)?;
    Ok(())
}

/// Drive `session` from intro to results over a line-oriented terminal.
///
/// Invalid choices are reported and the question is asked again. Typing `q`
/// aborts.
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    print_intro(session, out)?;
    prompt_line(input, out, "Press Enter to begin...")?;
    session.start();

    for section in Section::ALL {
        run_section(session, section, input, out)?;
        match session.submit(section) {
            Transition::Advanced { .. } => {}
            Transition::Rejected { reason, .. } => {
                anyhow::bail!("could not submit {section} section: {reason}")
            }
        }
    }

    debug_assert_eq!(session.current_stage(), Stage::Results);
    Ok(())
}

fn print_intro<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let catalog = session.catalog();
    writeln!(out, "{}", catalog.name)?;
    if !catalog.description.is_empty() {
        writeln!(out, "{}", catalog.description)?;
    }
    writeln!(out)?;
    for section in Section::ALL {
        writeln!(
            out,
            "  {} ({} questions)",
            section.title(),
            catalog.len(section)
        )?;
    }
    writeln!(out)?;
    Ok(())
}

fn run_section<R: BufRead, W: Write>(
    session: &mut Session,
    section: Section,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(
        out,
        "\n== {} == [overall {:.0}%]",
        section.title(),
        session.progress_fraction() * 100.0
    )?;

    let questions: Vec<Question> = session.questions_for(section).to_vec();
    let total = questions.len();
    for (i, question) in questions.iter().enumerate() {
        writeln!(out, "\n[{}/{}] {}", i + 1, total, question.prompt)?;
        for option in &question.options {
            writeln!(out, "  {}) {}", option.value, option.label)?;
        }

        loop {
            let choice = prompt_line(input, out, "> ")?;
            match session.record_answer(section, &question.id, &choice) {
                Ok(()) => break,
                Err(e) if e.is_invalid_reference() => {
                    writeln!(
                        out,
                        "Invalid choice '{choice}', pick one of the listed options."
                    )?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    writeln!(
        out,
        "{} complete ({}/{} answered)",
        section.title(),
        session.answered_count(section),
        total
    )?;
    Ok(())
}

fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<String> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read input")?;
    anyhow::ensure!(read > 0, "input ended before the assessment was finished");

    let line = line.trim().to_string();
    anyhow::ensure!(!line.eq_ignore_ascii_case("q"), "assessment aborted");
    Ok(line)
}
