//! The question catalog: immutable, ordered question definitions per section.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Question, Section, WiscarDimension};
use crate::parser::parse_catalog_str;

const BUILTIN_CATALOG: &str = include_str!("../data/edge-ai.toml");

/// A complete question instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "CatalogData")]
pub struct Catalog {
    /// Unique identifier for this instrument.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    pub description: String,
    /// Highest points an option may award; the lowest is always 1.
    pub scale_max: u8,
    psychometric: Vec<Question>,
    technical: Vec<Question>,
    wiscar: Vec<Question>,
}

/// Deserialized catalog fields before the invariants are checked.
#[derive(Deserialize)]
struct CatalogData {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    scale_max: u8,
    psychometric: Vec<Question>,
    technical: Vec<Question>,
    wiscar: Vec<Question>,
}

impl TryFrom<CatalogData> for Catalog {
    type Error = anyhow::Error;

    fn try_from(data: CatalogData) -> Result<Self> {
        Ok(Catalog::new(
            data.id,
            data.name,
            data.scale_max,
            data.psychometric,
            data.technical,
            data.wiscar,
        )?
        .with_description(data.description))
    }
}

/// Summary of a catalog (without the question bodies).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub id: String,
    pub name: String,
    /// Highest points an option may award.
    pub scale_max: u8,
    pub psychometric_count: usize,
    pub technical_count: usize,
    pub wiscar_count: usize,
}

impl Catalog {
    /// Build a catalog, enforcing the structural invariants every instrument
    /// must satisfy.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        scale_max: u8,
        psychometric: Vec<Question>,
        technical: Vec<Question>,
        wiscar: Vec<Question>,
    ) -> Result<Self> {
        let catalog = Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            scale_max,
            psychometric,
            technical,
            wiscar,
        };
        catalog.check()?;
        Ok(catalog)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The Edge AI Developer instrument shipped with edgefit.
    pub fn builtin() -> Result<Self> {
        parse_catalog_str(BUILTIN_CATALOG, Path::new("<builtin>"))
            .context("built-in catalog is invalid")
    }

    /// Ordered questions of a section.
    pub fn questions_for(&self, section: Section) -> &[Question] {
        match section {
            Section::Psychometric => &self.psychometric,
            Section::Technical => &self.technical,
            Section::Wiscar => &self.wiscar,
        }
    }

    /// Look up a question by id within a section.
    pub fn question(&self, section: Section, id: &str) -> Option<&Question> {
        self.questions_for(section).iter().find(|q| q.id == id)
    }

    /// Number of questions in a section.
    pub fn len(&self, section: Section) -> usize {
        self.questions_for(section).len()
    }

    pub fn is_empty(&self) -> bool {
        Section::ALL.iter().all(|s| self.len(*s) == 0)
    }

    /// WISCAR questions tagged with the given dimension.
    pub fn wiscar_questions(&self, dimension: WiscarDimension) -> impl Iterator<Item = &Question> {
        self.wiscar
            .iter()
            .filter(move |q| q.dimension == Some(dimension))
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            scale_max: self.scale_max,
            psychometric_count: self.psychometric.len(),
            technical_count: self.technical.len(),
            wiscar_count: self.wiscar.len(),
        }
    }

    fn check(&self) -> Result<()> {
        anyhow::ensure!(self.scale_max >= 2, "scale_max must be at least 2");

        for section in Section::ALL {
            let mut seen_ids = HashSet::new();
            for q in self.questions_for(section) {
                let at = || format!("{section}/{}", q.id);

                anyhow::ensure!(!q.id.trim().is_empty(), "{section}: question id is empty");
                anyhow::ensure!(seen_ids.insert(q.id.as_str()), "duplicate question id: {}", at());
                anyhow::ensure!(
                    q.options.len() >= 2,
                    "{}: needs at least 2 options, has {}",
                    at(),
                    q.options.len()
                );

                let mut seen_values = HashSet::new();
                for opt in &q.options {
                    anyhow::ensure!(
                        seen_values.insert(opt.value.as_str()),
                        "{}: duplicate option value '{}'",
                        at(),
                        opt.value
                    );
                    anyhow::ensure!(
                        (1..=self.scale_max).contains(&opt.points),
                        "{}: option '{}' awards {} points, outside 1..={}",
                        at(),
                        opt.value,
                        opt.points,
                        self.scale_max
                    );
                }

                if q.kind.is_fixed_scale() {
                    let ascending = q
                        .options
                        .iter()
                        .map(|o| o.points)
                        .eq(1..=self.scale_max);
                    anyhow::ensure!(
                        ascending,
                        "{}: {} options must award 1..={} in ascending order",
                        at(),
                        q.kind,
                        self.scale_max
                    );
                }

                match (section, q.dimension) {
                    (Section::Wiscar, None) => {
                        anyhow::bail!("{}: WISCAR question has no dimension", at())
                    }
                    (Section::Psychometric | Section::Technical, Some(d)) => {
                        anyhow::bail!("{}: only WISCAR questions take a dimension (got {d})", at())
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerOption, QuestionKind};

    fn likert(id: &str) -> Question {
        Question {
            id: id.into(),
            prompt: format!("Statement {id}"),
            category: "Test".into(),
            dimension: None,
            kind: QuestionKind::Likert,
            options: AnswerOption::scale(QuestionKind::Likert.standard_labels().unwrap()),
        }
    }

    #[test]
    fn builtin_catalog_shape() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.id, "edge-ai-developer");
        assert_eq!(catalog.scale_max, 5);
        assert_eq!(catalog.len(Section::Psychometric), 10);
        assert_eq!(catalog.len(Section::Technical), 8);
        assert_eq!(catalog.len(Section::Wiscar), 12);
        for dimension in WiscarDimension::ALL {
            assert_eq!(catalog.wiscar_questions(dimension).count(), 2, "{dimension}");
        }
    }

    #[test]
    fn builtin_catalog_keeps_declared_order() {
        let catalog = Catalog::builtin().unwrap();
        let psych = catalog.questions_for(Section::Psychometric);
        assert_eq!(psych[0].id, "debugging_complex");
        assert_eq!(psych[9].id, "autonomous_systems");
        let tech = catalog.question(Section::Technical, "edge_optimization").unwrap();
        assert_eq!(tech.kind, QuestionKind::MultipleChoice);
        assert_eq!(tech.option("4").unwrap().points, 3);
        assert_eq!(tech.max_points(), 5);
    }

    #[test]
    fn builtin_fixed_scales_use_standard_labels() {
        let catalog = Catalog::builtin().unwrap();
        let skill = catalog.question(Section::Wiscar, "skill_embedded").unwrap();
        assert_eq!(skill.kind, QuestionKind::SkillRating);
        assert_eq!(skill.options[4].label, "Expert level");
        let psych = catalog
            .question(Section::Psychometric, "systems_thinking")
            .unwrap();
        assert_eq!(psych.options[0].label, "Strongly Disagree");
    }

    #[test]
    fn rejects_duplicate_question_ids() {
        let err = Catalog::new("c", "C", 5, vec![likert("a"), likert("a")], vec![], vec![])
            .unwrap_err();
        assert!(err.to_string().contains("duplicate question id"));
    }

    #[test]
    fn rejects_single_option_question() {
        let mut q = likert("a");
        q.kind = QuestionKind::MultipleChoice;
        q.options.truncate(1);
        let err = Catalog::new("c", "C", 5, vec![], vec![q], vec![]).unwrap_err();
        assert!(err.to_string().contains("at least 2 options"));
    }

    #[test]
    fn rejects_points_outside_scale() {
        let mut q = likert("a");
        q.kind = QuestionKind::Scenario;
        q.options[0].points = 7;
        let err = Catalog::new("c", "C", 5, vec![q], vec![], vec![]).unwrap_err();
        assert!(err.to_string().contains("outside 1..=5"));
    }

    #[test]
    fn rejects_reordered_fixed_scale() {
        let mut q = likert("a");
        q.options.swap(0, 1);
        let err = Catalog::new("c", "C", 5, vec![q], vec![], vec![]).unwrap_err();
        assert!(err.to_string().contains("ascending"));
    }

    #[test]
    fn wiscar_questions_require_a_dimension() {
        let err = Catalog::new("c", "C", 5, vec![], vec![], vec![likert("w")]).unwrap_err();
        assert!(err.to_string().contains("no dimension"));

        let mut q = likert("p");
        q.dimension = Some(WiscarDimension::Will);
        let err = Catalog::new("c", "C", 5, vec![q], vec![], vec![]).unwrap_err();
        assert!(err.to_string().contains("only WISCAR"));
    }

    #[test]
    fn deserializing_runs_the_same_checks() {
        let catalog = Catalog::builtin().unwrap();
        let json = serde_json::to_value(&catalog).unwrap();
        let back: Catalog = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back.len(Section::Wiscar), 12);
        assert_eq!(back.description, catalog.description);

        let mut broken = json;
        broken["scale_max"] = serde_json::json!(1);
        let err = serde_json::from_value::<Catalog>(broken).unwrap_err();
        assert!(err.to_string().contains("scale_max must be at least 2"));
    }

    #[test]
    fn summary_carries_scale() {
        let summary = Catalog::builtin().unwrap().summary();
        assert_eq!(summary.scale_max, 5);
        assert_eq!(summary.wiscar_count, 12);
    }
}
