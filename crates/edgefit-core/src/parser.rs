//! TOML catalog and answer-sheet parser.
//!
//! Loads question catalogs and pre-filled answer sheets from TOML files, and
//! validates catalogs for issues that don't break scoring but skew it.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::model::{AnswerOption, Question, QuestionKind, Section, WiscarDimension};

/// Intermediate TOML structure for parsing catalog files.
#[derive(Debug, Deserialize)]
struct TomlCatalogFile {
    catalog: TomlCatalogHeader,
    #[serde(default)]
    psychometric: Vec<TomlQuestion>,
    #[serde(default)]
    technical: Vec<TomlQuestion>,
    #[serde(default)]
    wiscar: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlCatalogHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_scale_max")]
    scale_max: u8,
}

fn default_scale_max() -> u8 {
    5
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    prompt: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    dimension: Option<String>,
    kind: String,
    #[serde(default)]
    options: Vec<TomlOption>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    value: String,
    label: String,
    points: u8,
}

/// Parse a single TOML file into a `Catalog`.
pub fn parse_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_catalog_str(&content, path)
}

/// Parse a TOML string into a `Catalog` (useful for testing).
pub fn parse_catalog_str(content: &str, source_path: &Path) -> Result<Catalog> {
    let parsed: TomlCatalogFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let scale_max = parsed.catalog.scale_max;
    let convert = |questions: Vec<TomlQuestion>| -> Result<Vec<Question>> {
        questions
            .into_iter()
            .map(|q| convert_question(q, scale_max))
            .collect()
    };

    let psychometric = convert(parsed.psychometric)?;
    let technical = convert(parsed.technical)?;
    let wiscar = convert(parsed.wiscar)?;

    let catalog = Catalog::new(
        parsed.catalog.id,
        parsed.catalog.name,
        scale_max,
        psychometric,
        technical,
        wiscar,
    )
    .with_context(|| format!("invalid catalog: {}", source_path.display()))?
    .with_description(parsed.catalog.description);

    Ok(catalog)
}

fn convert_question(q: TomlQuestion, scale_max: u8) -> Result<Question> {
    let kind: QuestionKind = q
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("question '{}': {}", q.id, e))?;

    let dimension = q
        .dimension
        .map(|d| {
            d.parse::<WiscarDimension>()
                .map_err(|e| anyhow::anyhow!("question '{}': {}", q.id, e))
        })
        .transpose()?;

    let options = if q.options.is_empty() {
        match kind.standard_labels() {
            Some(labels) if labels.len() == scale_max as usize => AnswerOption::scale(labels),
            Some(labels) => anyhow::bail!(
                "question '{}': standard {kind} labels only cover a 1..={} scale, define options",
                q.id,
                labels.len()
            ),
            None => anyhow::bail!("question '{}': {kind} questions need explicit options", q.id),
        }
    } else {
        q.options
            .into_iter()
            .map(|o| AnswerOption::new(o.value, o.label, o.points))
            .collect()
    };

    Ok(Question {
        id: q.id,
        prompt: q.prompt,
        category: q.category,
        dimension,
        kind,
        options,
    })
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Section the warning applies to (if applicable).
    pub section: Option<Section>,
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a catalog for issues that skew scoring without breaking it.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for section in Section::ALL {
        if catalog.len(section) == 0 {
            warnings.push(ValidationWarning {
                section: Some(section),
                question_id: None,
                message: format!("{section} section has no questions; its score is always 0"),
            });
        }
    }

    let covered: HashSet<WiscarDimension> = catalog
        .questions_for(Section::Wiscar)
        .iter()
        .filter_map(|q| q.dimension)
        .collect();
    for dimension in WiscarDimension::ALL {
        if !covered.contains(&dimension) {
            warnings.push(ValidationWarning {
                section: Some(Section::Wiscar),
                question_id: None,
                message: format!(
                    "no question covers the {dimension} dimension; it will fall back to the section mean"
                ),
            });
        }
    }

    // Readiness is normalized against scale_max per question
    for q in catalog.questions_for(Section::Technical) {
        if q.max_points() < catalog.scale_max {
            warnings.push(ValidationWarning {
                section: Some(Section::Technical),
                question_id: Some(q.id.clone()),
                message: format!(
                    "best option awards {} of {} points; technical readiness can never reach 100",
                    q.max_points(),
                    catalog.scale_max
                ),
            });
        }
    }

    for section in Section::ALL {
        for q in catalog.questions_for(section) {
            if q.prompt.trim().is_empty() {
                warnings.push(ValidationWarning {
                    section: Some(section),
                    question_id: Some(q.id.clone()),
                    message: "prompt is empty".into(),
                });
            }
        }
    }

    warnings
}

/// A pre-filled set of answers, keyed by section then question id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerSheet {
    #[serde(default)]
    pub psychometric: BTreeMap<String, String>,
    #[serde(default)]
    pub technical: BTreeMap<String, String>,
    #[serde(default)]
    pub wiscar: BTreeMap<String, String>,
    #[serde(default)]
    pub demographics: BTreeMap<String, String>,
}

impl AnswerSheet {
    /// Selected option values for a section, in question-id order.
    pub fn answers_for(&self, section: Section) -> &BTreeMap<String, String> {
        match section {
            Section::Psychometric => &self.psychometric,
            Section::Technical => &self.technical,
            Section::Wiscar => &self.wiscar,
        }
    }
}

/// Parse an answer sheet TOML file.
pub fn parse_answer_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;

    parse_answer_sheet_str(&content, path)
}

/// Parse an answer sheet from a TOML string.
///
/// Option values may be written as strings or bare integers.
pub fn parse_answer_sheet_str(content: &str, source_path: &Path) -> Result<AnswerSheet> {
    let raw: toml::Table = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut sheet = AnswerSheet::default();
    let mut filled = HashSet::new();
    for (key, value) in raw {
        let toml::Value::Table(table) = value else {
            anyhow::bail!("{}: `{key}` must be a table", source_path.display());
        };
        let entries = table
            .into_iter()
            .map(|(k, v)| {
                let v = match v {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    other => anyhow::bail!(
                        "{}: {key}.{k} must be a string or integer, got {}",
                        source_path.display(),
                        other.type_str()
                    ),
                };
                Ok((k, v))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        match key.as_str() {
            "demographics" => sheet.demographics = entries,
            other => match other.parse::<Section>() {
                Ok(section) => {
                    anyhow::ensure!(
                        filled.insert(section),
                        "{}: `{other}` repeats the {section} section",
                        source_path.display()
                    );
                    match section {
                        Section::Psychometric => sheet.psychometric = entries,
                        Section::Technical => sheet.technical = entries,
                        Section::Wiscar => sheet.wiscar = entries,
                    }
                }
                Err(_) => {
                    tracing::warn!("ignoring unknown table `{other}` in {}", source_path.display());
                }
            },
        }
    }

    Ok(sheet)
}
