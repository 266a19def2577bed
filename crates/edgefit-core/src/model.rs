//! Core data model types for edgefit.
//!
//! These are the fundamental types the rest of the system uses to describe
//! questions, their options, the quiz sections and the recommendation bands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three answered question groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Psychometric,
    Technical,
    Wiscar,
}

impl Section {
    /// All sections in quiz order.
    pub const ALL: [Section; 3] = [Section::Psychometric, Section::Technical, Section::Wiscar];

    /// Human-readable title.
    pub fn title(self) -> &'static str {
        match self {
            Section::Psychometric => "Psychometric Analysis",
            Section::Technical => "Technical & Aptitude Assessment",
            Section::Wiscar => "WISCAR Framework Analysis",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Psychometric => write!(f, "psychometric"),
            Section::Technical => write!(f, "technical"),
            Section::Wiscar => write!(f, "wiscar"),
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "psychometric" | "psych" => Ok(Section::Psychometric),
            "technical" | "tech" => Ok(Section::Technical),
            "wiscar" => Ok(Section::Wiscar),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// The six WISCAR readiness dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WiscarDimension {
    Will,
    Interest,
    Skill,
    Cognitive,
    Ability,
    Reality,
}

impl WiscarDimension {
    pub const ALL: [WiscarDimension; 6] = [
        WiscarDimension::Will,
        WiscarDimension::Interest,
        WiscarDimension::Skill,
        WiscarDimension::Cognitive,
        WiscarDimension::Ability,
        WiscarDimension::Reality,
    ];

    /// Capitalized name for report headings.
    pub fn title(self) -> &'static str {
        match self {
            WiscarDimension::Will => "Will",
            WiscarDimension::Interest => "Interest",
            WiscarDimension::Skill => "Skill",
            WiscarDimension::Cognitive => "Cognitive",
            WiscarDimension::Ability => "Ability",
            WiscarDimension::Reality => "Reality",
        }
    }
}

impl fmt::Display for WiscarDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WiscarDimension::Will => "will",
            WiscarDimension::Interest => "interest",
            WiscarDimension::Skill => "skill",
            WiscarDimension::Cognitive => "cognitive",
            WiscarDimension::Ability => "ability",
            WiscarDimension::Reality => "reality",
        };
        f.write_str(name)
    }
}

impl FromStr for WiscarDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "will" => Ok(WiscarDimension::Will),
            "interest" => Ok(WiscarDimension::Interest),
            "skill" => Ok(WiscarDimension::Skill),
            "cognitive" => Ok(WiscarDimension::Cognitive),
            "ability" => Ok(WiscarDimension::Ability),
            "reality" => Ok(WiscarDimension::Reality),
            other => Err(format!("unknown WISCAR dimension: {other}")),
        }
    }
}

/// How a question is presented and what shape its option list has.
///
/// `Likert` and `SkillRating` are fixed scales: one option per point,
/// ascending from 1 to the catalog's `scale_max`. The other kinds carry
/// free-form option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Likert,
    MultipleChoice,
    SkillRating,
    Scenario,
}

impl QuestionKind {
    /// Whether the option list must be the ascending `1..=scale_max` scale.
    pub fn is_fixed_scale(self) -> bool {
        matches!(self, QuestionKind::Likert | QuestionKind::SkillRating)
    }

    /// Labels used when a fixed-scale question doesn't define its own.
    pub fn standard_labels(self) -> Option<&'static [&'static str]> {
        match self {
            QuestionKind::Likert => Some(&LIKERT_LABELS),
            QuestionKind::SkillRating => Some(&SKILL_RATING_LABELS),
            QuestionKind::MultipleChoice | QuestionKind::Scenario => None,
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::Likert => write!(f, "likert"),
            QuestionKind::MultipleChoice => write!(f, "multiple_choice"),
            QuestionKind::SkillRating => write!(f, "skill_rating"),
            QuestionKind::Scenario => write!(f, "scenario"),
        }
    }
}

impl FromStr for QuestionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "likert" => Ok(QuestionKind::Likert),
            "multiple_choice" | "choice" => Ok(QuestionKind::MultipleChoice),
            "skill_rating" | "skill" => Ok(QuestionKind::SkillRating),
            "scenario" => Ok(QuestionKind::Scenario),
            other => Err(format!("unknown question kind: {other}")),
        }
    }
}

const LIKERT_LABELS: [&str; 5] = [
    "Strongly Disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly Agree",
];

const SKILL_RATING_LABELS: [&str; 5] = [
    "No knowledge",
    "Basic awareness",
    "Some experience",
    "Confident application",
    "Expert level",
];

/// A selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Key the respondent selects (e.g. "3").
    pub value: String,
    /// Text shown next to the option.
    pub label: String,
    /// Points awarded when selected. Higher means closer alignment.
    pub points: u8,
}

impl AnswerOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, points: u8) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            points,
        }
    }

    /// Build the `1..=labels.len()` scale with values equal to the points.
    pub fn scale(labels: &[&str]) -> Vec<AnswerOption> {
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let points = (i + 1) as u8;
                AnswerOption::new(points.to_string(), *label, points)
            })
            .collect()
    }
}

/// A single quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Identifier, unique within its section.
    pub id: String,
    /// The statement or question shown to the respondent.
    pub prompt: String,
    /// Trait or skill area this question probes (e.g. "Systems Thinking").
    pub category: String,
    /// WISCAR dimension; set for WISCAR questions only.
    #[serde(default)]
    pub dimension: Option<WiscarDimension>,
    pub kind: QuestionKind,
    pub options: Vec<AnswerOption>,
}

impl Question {
    /// Look up an option by its selectable value.
    pub fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Highest points any option awards.
    pub fn max_points(&self) -> u8 {
        self.options.iter().map(|o| o.points).max().unwrap_or(0)
    }
}

/// The categorical outcome of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Yes,
    Maybe,
    NotYet,
}

impl Recommendation {
    pub const ALL: [Recommendation; 3] = [
        Recommendation::Yes,
        Recommendation::Maybe,
        Recommendation::NotYet,
    ];
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Yes => write!(f, "Yes"),
            Recommendation::Maybe => write!(f, "Maybe"),
            Recommendation::NotYet => write!(f, "Not Yet"),
        }
    }
}
