//! Static guidance keyed by recommendation band.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::Recommendation;

const BUILTIN_GUIDANCE: &str = include_str!("../data/guidance.toml");

/// Next steps and suitable roles for one recommendation band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guidance {
    /// One-sentence verdict shown under the overall score.
    #[serde(default)]
    pub summary: String,
    pub next_steps: Vec<String>,
    pub career_roles: Vec<String>,
}

/// The full band → guidance lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidanceTable {
    pub yes: Guidance,
    pub maybe: Guidance,
    pub not_yet: Guidance,
}

impl GuidanceTable {
    /// The guidance shipped with edgefit.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_GUIDANCE).context("built-in guidance table is invalid")
    }

    /// Load a guidance table from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read guidance file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("invalid guidance file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: GuidanceTable = toml::from_str(content).context("failed to parse TOML")?;
        for band in Recommendation::ALL {
            let guidance = table.guidance_for(band);
            anyhow::ensure!(
                !guidance.next_steps.is_empty(),
                "'{band}' guidance has no next steps"
            );
            anyhow::ensure!(
                !guidance.career_roles.is_empty(),
                "'{band}' guidance has no career roles"
            );
        }
        Ok(table)
    }

    pub fn guidance_for(&self, recommendation: Recommendation) -> &Guidance {
        match recommendation {
            Recommendation::Yes => &self.yes,
            Recommendation::Maybe => &self.maybe,
            Recommendation::NotYet => &self.not_yet,
        }
    }
}
