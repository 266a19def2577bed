//! CLI integration tests using assert_cmd.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn builtin_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../edgefit-core/data/edge-ai.toml")
}

/// An `edgefit` command isolated from any config in the real home or cwd.
fn edgefit(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("edgefit").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("EDGEFIT_OUTPUT_DIR")
        .env_remove("EDGEFIT_WISCAR_MODE");
    cmd
}

/// Best-option answers with the given WISCAR value everywhere.
const STRONG_ANSWERS: &str = r#"
[psychometric]
debugging_complex = "4"
optimization_excitement = "4"
hands_on_learning = "4"
bottleneck_persistence = "4"
detail_oriented = "4"
systems_thinking = "4"
real_time_pressure = "4"
emerging_tech = "4"
iterative_improvement = "4"
autonomous_systems = "4"

[technical]
quantization_knowledge = "2"
edge_optimization = "2"
bottleneck_identification = "2"
programming_confidence = "5"
embedded_experience = "5"
ml_frameworks = "5"
performance_debugging = "2"
latency_accuracy_tradeoff = "5"

[wiscar]
will_troubleshooting = "4"
will_optimization = "4"
interest_innovations = "4"
interest_constraints = "4"
skill_compression = "4"
skill_embedded = "4"
cognitive_systems = "4"
cognitive_tradeoffs = "4"
ability_iteration = "4"
ability_new_tools = "4"
reality_constraints = 2
reality_deadlines = 4
"#;

#[test]
fn validate_builtin_catalog() {
    let dir = TempDir::new().unwrap();
    edgefit(&dir)
        .arg("validate")
        .arg("--catalog")
        .arg(builtin_catalog())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "10 psychometric, 8 technical, 12 wiscar",
        ))
        .stdout(predicate::str::contains("Catalog valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("thin.toml");
    std::fs::write(
        &path,
        r#"
[catalog]
id = "thin"
name = "Thin"

[[psychometric]]
id = "p1"
prompt = "I like puzzles."
kind = "likert"

[[wiscar]]
id = "w1"
prompt = "I keep going."
dimension = "will"
kind = "likert"
"#,
    )
    .unwrap();

    edgefit(&dir)
        .arg("validate")
        .arg("--catalog")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("[technical] WARNING"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    edgefit(&dir)
        .arg("validate")
        .arg("--catalog")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn questions_lists_one_section() {
    let dir = TempDir::new().unwrap();
    edgefit(&dir)
        .arg("questions")
        .arg("--section")
        .arg("technical")
        .assert()
        .success()
        .stdout(predicate::str::contains("Technical & Aptitude Assessment (8 questions)"))
        .stdout(predicate::str::contains("quantization_knowledge"))
        .stdout(predicate::str::contains("debugging_complex").not());
}

#[test]
fn questions_rejects_unknown_section() {
    let dir = TempDir::new().unwrap();
    edgefit(&dir)
        .arg("questions")
        .arg("--section")
        .arg("personality")
        .assert()
        .failure();
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    edgefit(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created edgefit.toml"))
        .stdout(predicate::str::contains("Created answers.toml"));

    assert!(dir.path().join("edgefit.toml").exists());
    assert!(dir.path().join("answers.toml").exists());
}

#[test]
fn init_skips_existing_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("edgefit.toml"), "formats = []\n").unwrap();

    edgefit(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("edgefit.toml already exists, skipping."))
        .stdout(predicate::str::contains("Created answers.toml"));

    let kept = std::fs::read_to_string(dir.path().join("edgefit.toml")).unwrap();
    assert_eq!(kept, "formats = []\n");
}

#[test]
fn init_then_score_template() {
    let dir = TempDir::new().unwrap();
    edgefit(&dir).arg("init").assert().success();

    edgefit(&dir)
        .arg("score")
        .arg("--answers")
        .arg("answers.toml")
        .assert()
        .success()
        .stdout(predicate::str::contains("Psychometric Fit"))
        .stdout(predicate::str::contains("Suggested roles:"));
}

#[test]
fn score_prints_yes_band() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.toml");
    std::fs::write(&answers, STRONG_ANSWERS).unwrap();

    edgefit(&dir)
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("87/100 (Yes)"))
        .stdout(predicate::str::contains("Edge AI Developer / Engineer"));
}

#[test]
fn score_json_output() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.toml");
    std::fs::write(&answers, STRONG_ANSWERS).unwrap();

    let output = edgefit(&dir)
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let breakdown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(breakdown["psychometric_fit"], 80);
    assert_eq!(breakdown["technical_readiness"], 100);
    assert_eq!(breakdown["overall_score"], 87);
    assert_eq!(breakdown["recommendation"], "Yes");
}

#[test]
fn score_exports_requested_formats() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.toml");
    std::fs::write(&answers, STRONG_ANSWERS).unwrap();
    let out = dir.path().join("reports");

    edgefit(&dir)
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .arg("--format")
        .arg("markdown,json")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved to"));

    let mut extensions: Vec<String> = std::fs::read_dir(&out)
        .unwrap()
        .map(|e| {
            e.unwrap()
                .path()
                .extension()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    extensions.sort();
    assert_eq!(extensions, vec!["json", "md"]);
}

#[test]
fn score_rejects_incomplete_sheet() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.toml");
    std::fs::write(
        &answers,
        STRONG_ANSWERS.replace("autonomous_systems = \"4\"\n", ""),
    )
    .unwrap();

    edgefit(&dir)
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "psychometric section: 9 of 10 questions answered",
        ));
}

#[test]
fn score_rejects_unknown_option() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.toml");
    std::fs::write(
        &answers,
        STRONG_ANSWERS.replace("quantization_knowledge = \"2\"", "quantization_knowledge = \"9\""),
    )
    .unwrap();

    edgefit(&dir)
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "question 'quantization_knowledge' has no option '9'",
        ));
}

#[test]
fn config_thresholds_change_the_band() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.toml");
    std::fs::write(&answers, STRONG_ANSWERS).unwrap();
    std::fs::write(
        dir.path().join("edgefit.toml"),
        "[scoring]\nyes_threshold = 90\nmaybe_threshold = 70\n",
    )
    .unwrap();

    edgefit(&dir)
        .arg("score")
        .arg("--answers")
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("87/100 (Maybe)"));
}

#[test]
fn take_interactive_run() {
    let dir = TempDir::new().unwrap();
    let mut input = String::from("\n");
    for _ in 0..30 {
        input.push_str("3\n");
    }

    edgefit(&dir)
        .arg("take")
        .arg("--format")
        .arg("html")
        .arg("--output")
        .arg("out")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Edge AI Developer Assessment"))
        .stdout(predicate::str::contains("[12/12]"))
        .stdout(predicate::str::contains("Next steps:"))
        .stderr(predicate::str::contains(".html"));

    let written = std::fs::read_dir(dir.path().join("out")).unwrap().count();
    assert_eq!(written, 1);
}

#[test]
fn take_fails_when_input_runs_out() {
    let dir = TempDir::new().unwrap();

    edgefit(&dir)
        .arg("take")
        .arg("--format")
        .arg("none")
        .write_stdin("\n4\n4\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input ended"));
}
