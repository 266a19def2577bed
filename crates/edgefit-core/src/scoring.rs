//! Scoring engine: reduces a completed assessment record to sub-scores, an
//! overall score, and a recommendation band.
//!
//! Every score is on a 0–100 basis, rounded half-up:
//!
//! - psychometric fit = 100 · mean(points) / scale_max
//! - technical readiness = 100 · sum(points) / (questions · scale_max)
//! - each WISCAR dimension = 100 · mean(points of that dimension) / scale_max
//! - overall = (psychometric + technical + 100 · mean(WISCAR points) / scale_max) / 3

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::AssessmentError;
use crate::model::{Recommendation, Section, WiscarDimension};
use crate::responses::{AssessmentRecord, ResponseStore};

/// How the six WISCAR sub-scores are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WiscarMode {
    /// Each dimension averages only the questions tagged with it.
    #[default]
    PerDimension,
    /// Every dimension reports the whole-section mean.
    SectionMean,
}

impl std::str::FromStr for WiscarMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "per_dimension" | "dimension" => Ok(WiscarMode::PerDimension),
            "section_mean" | "section" => Ok(WiscarMode::SectionMean),
            other => Err(format!("unknown WISCAR mode: {other}")),
        }
    }
}

/// Tunables for the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub wiscar_mode: WiscarMode,
    /// Lowest overall score that earns `Yes`.
    #[serde(default = "default_yes_threshold")]
    pub yes_threshold: u8,
    /// Lowest overall score that earns `Maybe`.
    #[serde(default = "default_maybe_threshold")]
    pub maybe_threshold: u8,
}

fn default_yes_threshold() -> u8 {
    80
}

fn default_maybe_threshold() -> u8 {
    60
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            wiscar_mode: WiscarMode::default(),
            yes_threshold: default_yes_threshold(),
            maybe_threshold: default_maybe_threshold(),
        }
    }
}

impl ScoringConfig {
    /// Check that the thresholds describe three non-empty bands.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.yes_threshold <= 100,
            "yes_threshold must be at most 100, got {}",
            self.yes_threshold
        );
        anyhow::ensure!(
            self.maybe_threshold < self.yes_threshold,
            "maybe_threshold ({}) must be below yes_threshold ({})",
            self.maybe_threshold,
            self.yes_threshold
        );
        Ok(())
    }

    /// Map an overall score to its band. Lower bounds are inclusive.
    pub fn recommend(&self, overall_score: u8) -> Recommendation {
        if overall_score >= self.yes_threshold {
            Recommendation::Yes
        } else if overall_score >= self.maybe_threshold {
            Recommendation::Maybe
        } else {
            Recommendation::NotYet
        }
    }
}

/// Per-dimension WISCAR scores, each 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WiscarScores {
    pub will: u8,
    pub interest: u8,
    pub skill: u8,
    pub cognitive: u8,
    pub ability: u8,
    pub reality: u8,
}

impl WiscarScores {
    fn uniform(score: u8) -> Self {
        Self {
            will: score,
            interest: score,
            skill: score,
            cognitive: score,
            ability: score,
            reality: score,
        }
    }

    pub fn get(&self, dimension: WiscarDimension) -> u8 {
        match dimension {
            WiscarDimension::Will => self.will,
            WiscarDimension::Interest => self.interest,
            WiscarDimension::Skill => self.skill,
            WiscarDimension::Cognitive => self.cognitive,
            WiscarDimension::Ability => self.ability,
            WiscarDimension::Reality => self.reality,
        }
    }

    fn set(&mut self, dimension: WiscarDimension, score: u8) {
        let slot = match dimension {
            WiscarDimension::Will => &mut self.will,
            WiscarDimension::Interest => &mut self.interest,
            WiscarDimension::Skill => &mut self.skill,
            WiscarDimension::Cognitive => &mut self.cognitive,
            WiscarDimension::Ability => &mut self.ability,
            WiscarDimension::Reality => &mut self.reality,
        };
        *slot = score;
    }

    /// Scores in WISCAR order.
    pub fn iter(&self) -> impl Iterator<Item = (WiscarDimension, u8)> + '_ {
        WiscarDimension::ALL.into_iter().map(|d| (d, self.get(d)))
    }
}

/// Everything derived from a completed assessment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub psychometric_fit: u8,
    pub technical_readiness: u8,
    pub wiscar_scores: WiscarScores,
    /// Mean raw WISCAR points (1..=scale_max).
    pub wiscar_average: f64,
    pub overall_score: u8,
    pub recommendation: Recommendation,
}

/// Score a completed assessment record.
///
/// Fails with `IncompleteSection` if any section has unanswered questions;
/// scoring never degrades silently on partial input.
pub fn score(
    catalog: &Catalog,
    record: &AssessmentRecord,
    config: &ScoringConfig,
) -> Result<ScoreBreakdown, AssessmentError> {
    for section in Section::ALL {
        record.store(section).ensure_complete(catalog, section)?;
    }

    let scale = f64::from(catalog.scale_max);

    let psych_mean = mean_points(catalog, &record.psychometric, Section::Psychometric);
    let psychometric_fit = percent(psych_mean / scale);

    let tech_count = catalog.len(Section::Technical);
    let technical_readiness = if tech_count == 0 {
        0
    } else {
        let sum: u32 = section_points(catalog, &record.technical, Section::Technical)
            .map(u32::from)
            .sum();
        percent(f64::from(sum) / (tech_count as f64 * scale))
    };

    let wiscar_average = mean_points(catalog, &record.wiscar, Section::Wiscar);
    let section_score = percent(wiscar_average / scale);
    let wiscar_scores = match config.wiscar_mode {
        WiscarMode::SectionMean => WiscarScores::uniform(section_score),
        WiscarMode::PerDimension => {
            let mut scores = WiscarScores::uniform(section_score);
            for dimension in WiscarDimension::ALL {
                let points: Vec<u8> = catalog
                    .wiscar_questions(dimension)
                    .filter_map(|q| record.wiscar.points(&q.id))
                    .collect();
                if !points.is_empty() {
                    scores.set(dimension, percent(mean(&points) / scale));
                }
            }
            scores
        }
    };

    let blended = (f64::from(psychometric_fit)
        + f64::from(technical_readiness)
        + 100.0 * wiscar_average / scale)
        / 3.0;
    let overall_score = round_score(blended);
    let recommendation = config.recommend(overall_score);

    tracing::debug!(
        psychometric_fit,
        technical_readiness,
        wiscar_average,
        overall_score,
        %recommendation,
        "assessment scored"
    );

    Ok(ScoreBreakdown {
        psychometric_fit,
        technical_readiness,
        wiscar_scores,
        wiscar_average,
        overall_score,
        recommendation,
    })
}

/// Points of the catalog's questions in `section`, in catalog order.
fn section_points<'a>(
    catalog: &'a Catalog,
    store: &'a ResponseStore,
    section: Section,
) -> impl Iterator<Item = u8> + 'a {
    catalog
        .questions_for(section)
        .iter()
        .filter_map(move |q| store.points(&q.id))
}

fn mean_points(catalog: &Catalog, store: &ResponseStore, section: Section) -> f64 {
    let points: Vec<u8> = section_points(catalog, store, section).collect();
    mean(&points)
}

fn mean(points: &[u8]) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let sum: u32 = points.iter().copied().map(u32::from).sum();
    f64::from(sum) / points.len() as f64
}

/// Convert a `0.0..=1.0` ratio to a rounded 0–100 score.
fn percent(ratio: f64) -> u8 {
    round_score(ratio * 100.0)
}

fn round_score(value: f64) -> u8 {
    // Guard against representation error pushing x.5 just below the midpoint
    let rounded = (value + 1e-9).round();
    rounded.clamp(0.0, 100.0) as u8
}
