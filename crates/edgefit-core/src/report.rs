//! The finished assessment: scores, guidance, and the answers behind them.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogSummary};
use crate::guidance::Guidance;
use crate::model::{Section, WiscarDimension};
use crate::responses::AssessmentRecord;
use crate::scoring::ScoreBreakdown;

/// A complete assessment report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// The catalog that was answered.
    pub catalog: CatalogSummary,
    pub breakdown: ScoreBreakdown,
    /// Guidance for the recommendation band.
    pub guidance: Guidance,
    /// Every answered question in catalog order.
    pub answers: Vec<AnsweredQuestion>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub demographics: BTreeMap<String, String>,
}

/// One answered question, denormalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredQuestion {
    pub section: Section,
    pub question_id: String,
    pub prompt: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<WiscarDimension>,
    /// The selected option value.
    pub value: String,
    /// The selected option label.
    pub label: String,
    pub points: u8,
    pub max_points: u8,
}

impl AssessmentReport {
    pub fn new(
        catalog: &Catalog,
        record: &AssessmentRecord,
        breakdown: ScoreBreakdown,
        guidance: Guidance,
    ) -> Self {
        let answers = Section::ALL
            .into_iter()
            .flat_map(|section| {
                let store = record.store(section);
                catalog
                    .questions_for(section)
                    .iter()
                    .filter_map(move |q| {
                        let answer = store.get(&q.id)?;
                        let label = q
                            .option(&answer.value)
                            .map(|o| o.label.clone())
                            .unwrap_or_default();
                        Some(AnsweredQuestion {
                            section,
                            question_id: q.id.clone(),
                            prompt: q.prompt.clone(),
                            category: q.category.clone(),
                            dimension: q.dimension,
                            value: answer.value.clone(),
                            label,
                            points: answer.points,
                            max_points: q.max_points(),
                        })
                    })
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            catalog: catalog.summary(),
            breakdown,
            guidance,
            answers,
            demographics: record.demographics.clone(),
        }
    }

    /// Answered questions of one section.
    pub fn answers_for(&self, section: Section) -> impl Iterator<Item = &AnsweredQuestion> {
        self.answers.iter().filter(move |a| a.section == section)
    }

    /// File stem used when the report is written to disk.
    pub fn file_stem(&self) -> String {
        format!(
            "edgefit-{}-{}",
            self.created_at.format("%Y%m%d-%H%M%S"),
            &self.id.simple().to_string()[..8]
        )
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize report")
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::GuidanceTable;
    use crate::model::Recommendation;
    use crate::scoring::{score, ScoringConfig};

    fn sample_report() -> AssessmentReport {
        let catalog = Catalog::builtin().unwrap();
        let mut record = AssessmentRecord::new();
        for section in Section::ALL {
            for q in catalog.questions_for(section) {
                record
                    .record_answer(&catalog, section, &q.id, "2")
                    .unwrap();
            }
        }
        record
            .demographics
            .insert("experience".into(), "3 years".into());
        let breakdown = score(&catalog, &record, &ScoringConfig::default()).unwrap();
        let guidance = GuidanceTable::builtin().unwrap();
        let band = guidance.guidance_for(breakdown.recommendation).clone();
        AssessmentReport::new(&catalog, &record, breakdown, band)
    }

    #[test]
    fn answers_follow_catalog_order() {
        let report = sample_report();
        assert_eq!(report.answers.len(), 30);
        assert_eq!(report.answers[0].question_id, "debugging_complex");
        assert_eq!(report.answers[0].label, "Disagree");
        assert_eq!(report.answers_for(Section::Technical).count(), 8);

        let quant = report
            .answers_for(Section::Technical)
            .find(|a| a.question_id == "quantization_knowledge")
            .unwrap();
        assert_eq!(quant.points, 5);
        assert_eq!(quant.max_points, 5);

        let wiscar: Vec<_> = report.answers_for(Section::Wiscar).collect();
        assert_eq!(wiscar[0].dimension, Some(WiscarDimension::Will));
    }

    #[test]
    fn json_roundtrip() {
        let report = sample_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        report.save_json(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: AssessmentReport = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded.id, report.id);
        assert_eq!(
            loaded.breakdown.overall_score,
            report.breakdown.overall_score
        );
        assert_eq!(loaded.breakdown.wiscar_scores, report.breakdown.wiscar_scores);
        assert_eq!(loaded.demographics.get("experience").unwrap(), "3 years");
        assert_eq!(loaded.answers, report.answers);
    }

    #[test]
    fn recommendation_serializes_as_variant_name() {
        let report = sample_report();
        assert_eq!(report.breakdown.recommendation, Recommendation::NotYet);
        let json = report.to_json().unwrap();
        assert!(json.contains("\"recommendation\": \"NotYet\""));
    }

    #[test]
    fn file_stem_is_stable_shape() {
        let report = sample_report();
        let stem = report.file_stem();
        assert!(stem.starts_with("edgefit-"));
        assert_eq!(stem.len(), "edgefit-".len() + 15 + 1 + 8);
    }
}
