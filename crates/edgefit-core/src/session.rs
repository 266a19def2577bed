//! The section state machine that drives a quiz from intro to results.
//!
//! Stages advance linearly:
//!
//! ```text
//! Intro -> Psychometric -> Technical -> Wiscar -> Results
//! ```
//!
//! Each section stage collects answers into a draft store. `submit` moves
//! the draft into the assessment record and advances, but only once every
//! question of the section has an answer. `Results` is terminal apart from
//! `restart`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::AssessmentError;
use crate::guidance::GuidanceTable;
use crate::model::{Question, Section};
use crate::report::AssessmentReport;
use crate::responses::{Answer, AssessmentRecord, ResponseStore};
use crate::scoring::{score, ScoreBreakdown, ScoringConfig};

/// A position in the quiz flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Intro,
    Psychometric,
    Technical,
    Wiscar,
    Results,
}

impl Stage {
    /// All stages in flow order.
    pub const ALL: [Stage; 5] = [
        Stage::Intro,
        Stage::Psychometric,
        Stage::Technical,
        Stage::Wiscar,
        Stage::Results,
    ];

    /// Zero-based position in the flow.
    pub fn index(self) -> usize {
        match self {
            Stage::Intro => 0,
            Stage::Psychometric => 1,
            Stage::Technical => 2,
            Stage::Wiscar => 3,
            Stage::Results => 4,
        }
    }

    /// The question section collected in this stage, if any.
    pub fn section(self) -> Option<Section> {
        match self {
            Stage::Psychometric => Some(Section::Psychometric),
            Stage::Technical => Some(Section::Technical),
            Stage::Wiscar => Some(Section::Wiscar),
            Stage::Intro | Stage::Results => None,
        }
    }

    fn next(self) -> Stage {
        match self {
            Stage::Intro => Stage::Psychometric,
            Stage::Psychometric => Stage::Technical,
            Stage::Technical => Stage::Wiscar,
            Stage::Wiscar | Stage::Results => Stage::Results,
        }
    }
}

impl From<Section> for Stage {
    fn from(section: Section) -> Self {
        match section {
            Section::Psychometric => Stage::Psychometric,
            Section::Technical => Stage::Technical,
            Section::Wiscar => Stage::Wiscar,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Intro => write!(f, "intro"),
            Stage::Psychometric => write!(f, "psychometric"),
            Stage::Technical => write!(f, "technical"),
            Stage::Wiscar => write!(f, "wiscar"),
            Stage::Results => write!(f, "results"),
        }
    }
}

/// Why a start or submit signal did not move the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// `start` outside the intro stage.
    AlreadyStarted,
    /// `submit` for a section other than the active one.
    NotActive,
    /// `submit` before every question of the section was answered.
    Incomplete { answered: usize, expected: usize },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::AlreadyStarted => write!(f, "assessment already started"),
            RejectReason::NotActive => write!(f, "section is not active"),
            RejectReason::Incomplete { answered, expected } => {
                write!(f, "{answered} of {expected} questions answered")
            }
        }
    }
}

/// Outcome of a start or submit signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advanced { from: Stage, to: Stage },
    Rejected { stage: Stage, reason: RejectReason },
}

impl Transition {
    pub fn is_advanced(&self) -> bool {
        matches!(self, Transition::Advanced { .. })
    }
}

/// One respondent's pass through a catalog.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    stage: Stage,
    draft: ResponseStore,
    record: AssessmentRecord,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            stage: Stage::Intro,
            draft: ResponseStore::new(),
            record: AssessmentRecord::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn current_stage(&self) -> Stage {
        self.stage
    }

    /// Position in the flow as `index / (stages - 1)`, for display only.
    pub fn progress_fraction(&self) -> f64 {
        self.stage.index() as f64 / (Stage::ALL.len() - 1) as f64
    }

    pub fn questions_for(&self, section: Section) -> &[Question] {
        self.catalog.questions_for(section)
    }

    /// The committed record. Sections still in progress are not in it yet.
    pub fn record(&self) -> &AssessmentRecord {
        &self.record
    }

    /// Leave the intro and open the psychometric section.
    pub fn start(&mut self) -> Transition {
        if self.stage != Stage::Intro {
            return self.reject(RejectReason::AlreadyStarted);
        }
        self.advance()
    }

    /// Record an answer for the active section.
    pub fn record_answer(
        &mut self,
        section: Section,
        question_id: &str,
        value: &str,
    ) -> Result<(), AssessmentError> {
        if self.stage == Stage::Results {
            return Err(AssessmentError::AlreadyFinished);
        }
        if self.stage.section() != Some(section) {
            return Err(AssessmentError::SectionNotActive { section });
        }
        self.draft
            .record(&self.catalog, section, question_id, value)
            .map(|_| ())
    }

    /// The answer currently held for a question, committed or draft.
    pub fn answer(&self, section: Section, question_id: &str) -> Option<&Answer> {
        self.store_for(section).and_then(|s| s.get(question_id))
    }

    /// Whether every question of `section` has an answer.
    pub fn is_section_complete(&self, section: Section) -> bool {
        self.store_for(section)
            .is_some_and(|s| s.is_complete(&self.catalog, section))
    }

    pub fn answered_count(&self, section: Section) -> usize {
        self.store_for(section).map_or(0, ResponseStore::len)
    }

    /// Fraction of `section` answered, in `0.0..=1.0`.
    pub fn section_progress(&self, section: Section) -> f64 {
        self.store_for(section)
            .map_or(0.0, |s| s.progress(&self.catalog, section))
    }

    /// Submit the active section. Advances only if it is complete.
    pub fn submit(&mut self, section: Section) -> Transition {
        if self.stage.section() != Some(section) {
            return self.reject(RejectReason::NotActive);
        }
        if !self.draft.is_complete(&self.catalog, section) {
            return self.reject(RejectReason::Incomplete {
                answered: self.draft.len(),
                expected: self.catalog.len(section),
            });
        }

        *self.record.store_mut(section) = std::mem::take(&mut self.draft);
        self.advance()
    }

    /// Attach a free-form demographic detail to the record.
    pub fn set_demographic(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), AssessmentError> {
        if self.stage == Stage::Results {
            return Err(AssessmentError::AlreadyFinished);
        }
        self.record.demographics.insert(key.into(), value.into());
        Ok(())
    }

    /// Score the finished record.
    pub fn score(&self, config: &ScoringConfig) -> Result<ScoreBreakdown, AssessmentError> {
        self.ensure_finished()?;
        score(&self.catalog, &self.record, config)
    }

    /// Score the finished record and attach the band's guidance.
    pub fn report(
        &self,
        guidance: &GuidanceTable,
        config: &ScoringConfig,
    ) -> Result<AssessmentReport, AssessmentError> {
        let breakdown = self.score(config)?;
        let band = guidance.guidance_for(breakdown.recommendation).clone();
        Ok(AssessmentReport::new(
            &self.catalog,
            &self.record,
            breakdown,
            band,
        ))
    }

    /// Discard every answer and return to the intro.
    pub fn restart(&mut self) {
        tracing::debug!(from = %self.stage, "assessment restarted");
        self.stage = Stage::Intro;
        self.draft = ResponseStore::new();
        self.record = AssessmentRecord::new();
    }

    fn store_for(&self, section: Section) -> Option<&ResponseStore> {
        let target = Stage::from(section);
        if target == self.stage {
            Some(&self.draft)
        } else if target.index() < self.stage.index() {
            Some(self.record.store(section))
        } else {
            None
        }
    }

    fn ensure_finished(&self) -> Result<(), AssessmentError> {
        if self.stage == Stage::Results {
            Ok(())
        } else {
            Err(AssessmentError::NotFinished { stage: self.stage })
        }
    }

    fn advance(&mut self) -> Transition {
        let from = self.stage;
        let to = from.next();
        self.stage = to;
        tracing::debug!(%from, %to, "stage advanced");
        Transition::Advanced { from, to }
    }

    fn reject(&self, reason: RejectReason) -> Transition {
        tracing::debug!(stage = %self.stage, %reason, "transition rejected");
        Transition::Rejected {
            stage: self.stage,
            reason,
        }
    }
}
