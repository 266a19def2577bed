//! edgefit configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::scoring::{ScoringConfig, WiscarMode};

/// Top-level edgefit configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgefitConfig {
    /// Catalog file to use instead of the built-in one.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Guidance file to use instead of the built-in one.
    #[serde(default)]
    pub guidance: Option<PathBuf>,
    /// Output directory for exported reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report formats written after an assessment.
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./edgefit-reports")
}

fn default_formats() -> Vec<String> {
    vec!["markdown".to_string()]
}

impl Default for EdgefitConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            guidance: None,
            output_dir: default_output_dir(),
            formats: default_formats(),
            scoring: ScoringConfig::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Unset variables resolve to the empty string.
pub fn resolve_env_vars(s: &str) -> String {
    expand_vars(s, |name| std::env::var(name).ok())
}

/// Substituted values are copied through as-is and never rescanned.
fn expand_vars(s: &str, var: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        result.push_str(&var(&rest[start + 2..start + len]).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `edgefit.toml` in the current directory
/// 2. `~/.config/edgefit/config.toml`
///
/// Environment variable overrides: `EDGEFIT_OUTPUT_DIR`, `EDGEFIT_WISCAR_MODE`.
pub fn load_config() -> Result<EdgefitConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EdgefitConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("edgefit.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => EdgefitConfig::default(),
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config.scoring.validate().context("invalid [scoring] section")?;
    Ok(config)
}

/// Parse a config file body and resolve `${VAR}` references in its paths.
pub fn parse_config(content: &str) -> Result<EdgefitConfig> {
    let mut config: EdgefitConfig = toml::from_str(content).context("failed to parse TOML")?;
    config.catalog = config.catalog.as_deref().map(resolve_path);
    config.guidance = config.guidance.as_deref().map(resolve_path);
    config.output_dir = resolve_path(&config.output_dir);
    Ok(config)
}

fn apply_env_overrides(config: &mut EdgefitConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(dir) = var("EDGEFIT_OUTPUT_DIR").filter(|d| !d.is_empty()) {
        config.output_dir = PathBuf::from(dir);
    }

    if let Some(mode) = var("EDGEFIT_WISCAR_MODE") {
        match mode.parse::<WiscarMode>() {
            Ok(mode) => config.scoring.wiscar_mode = mode,
            Err(e) => tracing::warn!("ignoring EDGEFIT_WISCAR_MODE: {e}"),
        }
    }
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("edgefit"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_EDGEFIT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_EDGEFIT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_EDGEFIT_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_EDGEFIT_UNSET_VAR}/x"), "/x");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_EDGEFIT_TEST_VAR");
    }

    #[test]
    fn substituted_values_are_not_expanded_again() {
        let lookup = |name: &str| match name {
            "LOOP" => Some("${LOOP}".to_string()),
            "NESTED" => Some("${INNER}/x".to_string()),
            "INNER" => Some("inner".to_string()),
            _ => None,
        };
        assert_eq!(expand_vars("${LOOP}/reports", lookup), "${LOOP}/reports");
        assert_eq!(expand_vars("${NESTED}-${INNER}", lookup), "${INNER}/x-inner");
        assert_eq!(expand_vars("a}${INNER}b${", lookup), "a}innerb${");
    }

    #[test]
    fn self_referential_env_var_terminates() {
        std::env::set_var("_EDGEFIT_TEST_LOOP", "${_EDGEFIT_TEST_LOOP}");
        let config = parse_config("output_dir = \"${_EDGEFIT_TEST_LOOP}/reports\"\n").unwrap();
        std::env::remove_var("_EDGEFIT_TEST_LOOP");
        assert_eq!(
            config.output_dir,
            PathBuf::from("${_EDGEFIT_TEST_LOOP}/reports")
        );
    }

    #[test]
    fn default_config() {
        let config = EdgefitConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./edgefit-reports"));
        assert_eq!(config.formats, vec!["markdown"]);
        assert_eq!(config.scoring.yes_threshold, 80);
        assert_eq!(config.scoring.wiscar_mode, WiscarMode::PerDimension);
    }

    #[test]
    fn parse_full_config() {
        std::env::set_var("_EDGEFIT_TEST_HOME", "/srv/quiz");
        let config = parse_config(
            r#"
catalog = "${_EDGEFIT_TEST_HOME}/catalog.toml"
output_dir = "reports"
formats = ["markdown", "html"]

[scoring]
wiscar_mode = "section_mean"
yes_threshold = 85
"#,
        )
        .unwrap();
        std::env::remove_var("_EDGEFIT_TEST_HOME");

        assert_eq!(config.catalog, Some(PathBuf::from("/srv/quiz/catalog.toml")));
        assert_eq!(config.guidance, None);
        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert_eq!(config.formats, vec!["markdown", "html"]);
        assert_eq!(config.scoring.wiscar_mode, WiscarMode::SectionMean);
        assert_eq!(config.scoring.yes_threshold, 85);
        assert_eq!(config.scoring.maybe_threshold, 60);
    }

    #[test]
    fn env_overrides_win() {
        let mut config = EdgefitConfig::default();
        apply_env_overrides(&mut config, |name| match name {
            "EDGEFIT_OUTPUT_DIR" => Some("/tmp/out".into()),
            "EDGEFIT_WISCAR_MODE" => Some("section_mean".into()),
            _ => None,
        });
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.scoring.wiscar_mode, WiscarMode::SectionMean);
    }

    #[test]
    fn bad_mode_override_is_ignored() {
        let mut config = EdgefitConfig::default();
        apply_env_overrides(&mut config, |name| {
            (name == "EDGEFIT_WISCAR_MODE").then(|| "median".to_string())
        });
        assert_eq!(config.scoring.wiscar_mode, WiscarMode::PerDimension);
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/nonexistent/edgefit.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edgefit.toml");
        std::fs::write(&path, "[scoring]\nyes_threshold = 50\nmaybe_threshold = 70\n").unwrap();
        let err = load_config_from(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("invalid [scoring] section"));
    }
}
