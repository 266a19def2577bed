//! Per-section response stores and the assessment record they feed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::AssessmentError;
use crate::model::Section;

/// A recorded answer: the selected option and the points it awards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub value: String,
    pub points: u8,
}

/// Answers for one section, keyed by question id.
///
/// An entry exists iff an option has been selected for that question.
/// Entries are only ever set or overwritten, never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStore {
    answers: BTreeMap<String, Answer>,
}

impl ResponseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the option `value` for `question_id`, resolving its points from
    /// the catalog. Unknown questions or options are rejected and leave the
    /// store untouched.
    pub fn record(
        &mut self,
        catalog: &Catalog,
        section: Section,
        question_id: &str,
        value: &str,
    ) -> Result<&Answer, AssessmentError> {
        let question =
            catalog
                .question(section, question_id)
                .ok_or_else(|| AssessmentError::UnknownQuestion {
                    section,
                    question_id: question_id.to_string(),
                })?;
        let option = question
            .option(value)
            .ok_or_else(|| AssessmentError::UnknownOption {
                question_id: question_id.to_string(),
                value: value.to_string(),
            })?;

        tracing::debug!(
            %section,
            question_id,
            value,
            points = option.points,
            "answer recorded"
        );

        self.answers.insert(
            question_id.to_string(),
            Answer {
                value: option.value.clone(),
                points: option.points,
            },
        );
        Ok(&self.answers[question_id])
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.answers.get(question_id)
    }

    /// Awarded points for a question, if answered.
    pub fn points(&self, question_id: &str) -> Option<u8> {
        self.answers.get(question_id).map(|a| a.points)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.answers.iter().map(|(id, a)| (id.as_str(), a))
    }

    /// True iff every question of `section` in the catalog has an answer.
    pub fn is_complete(&self, catalog: &Catalog, section: Section) -> bool {
        catalog
            .questions_for(section)
            .iter()
            .all(|q| self.answers.contains_key(&q.id))
    }

    /// Fraction of the section answered, in `0.0..=1.0`.
    pub fn progress(&self, catalog: &Catalog, section: Section) -> f64 {
        let total = catalog.len(section);
        if total == 0 {
            return 1.0;
        }
        let answered = catalog
            .questions_for(section)
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count();
        answered as f64 / total as f64
    }

    /// Fail with `IncompleteSection` unless the store covers the section.
    pub fn ensure_complete(
        &self,
        catalog: &Catalog,
        section: Section,
    ) -> Result<(), AssessmentError> {
        if self.is_complete(catalog, section) {
            Ok(())
        } else {
            Err(AssessmentError::IncompleteSection {
                section,
                answered: self.len(),
                expected: catalog.len(section),
            })
        }
    }
}

/// The three section stores plus optional demographics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub psychometric: ResponseStore,
    pub technical: ResponseStore,
    pub wiscar: ResponseStore,
    #[serde(default)]
    pub demographics: BTreeMap<String, String>,
}

impl AssessmentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self, section: Section) -> &ResponseStore {
        match section {
            Section::Psychometric => &self.psychometric,
            Section::Technical => &self.technical,
            Section::Wiscar => &self.wiscar,
        }
    }

    pub(crate) fn store_mut(&mut self, section: Section) -> &mut ResponseStore {
        match section {
            Section::Psychometric => &mut self.psychometric,
            Section::Technical => &mut self.technical,
            Section::Wiscar => &mut self.wiscar,
        }
    }

    /// Record an answer directly into a section store.
    pub fn record_answer(
        &mut self,
        catalog: &Catalog,
        section: Section,
        question_id: &str,
        value: &str,
    ) -> Result<(), AssessmentError> {
        self.store_mut(section)
            .record(catalog, section, question_id, value)
            .map(|_| ())
    }

    pub fn is_section_complete(&self, catalog: &Catalog, section: Section) -> bool {
        self.store(section).is_complete(catalog, section)
    }

    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        Section::ALL
            .iter()
            .all(|s| self.is_section_complete(catalog, *s))
    }
}
