//! edgefit-core — Question catalog, quiz state machine, and scoring.
//!
//! This crate defines the catalog model, the per-section response stores,
//! the stage machine that gates a quiz run, and the pure scoring engine that
//! turns a finished record into a recommendation.

pub mod catalog;
pub mod config;
pub mod error;
pub mod guidance;
pub mod model;
pub mod parser;
pub mod report;
pub mod responses;
pub mod scoring;
pub mod session;

pub use catalog::Catalog;
pub use error::AssessmentError;
pub use guidance::{Guidance, GuidanceTable};
pub use model::{Recommendation, Section, WiscarDimension};
pub use report::AssessmentReport;
pub use scoring::{score, ScoreBreakdown, ScoringConfig, WiscarMode};
pub use session::{Session, Stage, Transition};
