//! Assessment contract errors.
//!
//! These represent a caller asking the core to do something the quiz
//! contract forbids. They are surfaced immediately; nothing here is retried.

use thiserror::Error;

use crate::model::Section;
use crate::session::Stage;

/// Errors raised by the response store, session, and scoring engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessmentError {
    /// The question id does not exist in the section's catalog.
    #[error("unknown question '{question_id}' in {section} section")]
    UnknownQuestion {
        section: Section,
        question_id: String,
    },

    /// The option value is not one of the question's options.
    #[error("question '{question_id}' has no option '{value}'")]
    UnknownOption { question_id: String, value: String },

    /// An answer was recorded for a section that is not currently shown.
    #[error("{section} section is not active")]
    SectionNotActive { section: Section },

    /// Scoring was requested before every question of a section was answered.
    #[error("{section} section is incomplete: {answered} of {expected} answered")]
    IncompleteSection {
        section: Section,
        answered: usize,
        expected: usize,
    },

    /// Results were requested before the quiz reached the results stage.
    #[error("assessment is not finished (current stage: {stage})")]
    NotFinished { stage: Stage },

    /// The record was changed after results were produced.
    #[error("assessment is finished; restart to change answers")]
    AlreadyFinished,
}

impl AssessmentError {
    /// Returns `true` if the error stems from a reference to something the
    /// catalog doesn't define.
    pub fn is_invalid_reference(&self) -> bool {
        matches!(
            self,
            AssessmentError::UnknownQuestion { .. } | AssessmentError::UnknownOption { .. }
        )
    }
}
