//! Top-level PKL configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{
    AnalysisConfig, EngineConfig, FacetWeightConfig, FusionConfig, ResolvedConfig, ToggleConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`PKL_*`)
/// 2. Project config (`pkl.toml` in project root)
/// 3. User config (`~/.pkl/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PklConfig {
    pub facets: FacetWeightConfig,
    pub toggles: ToggleConfig,
    pub fusion: FusionConfig,
    pub engine: EngineConfig,
    pub analysis: AnalysisConfig,
}

impl PklConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join("pkl.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: PklConfig = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate values that cannot be repaired.
    ///
    /// Weight and proportion tables are not checked here; `resolve`
    /// normalizes them instead.
    pub fn validate(config: &PklConfig) -> Result<(), ConfigError> {
        if config.engine.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "engine.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(gap) = config.analysis.sequence_gap_secs {
            if gap <= 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.sequence_gap_secs".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if config.analysis.embedding_cache_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.embedding_cache_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Produce the normalized, effective view used by the classifiers.
    pub fn resolve(&self) -> ResolvedConfig {
        ResolvedConfig::from_config(self)
    }

    /// Returns the user config path: `~/.pkl/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut PklConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: PklConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`. Tables replace wholesale when non-empty,
    /// scalars when `Some`.
    fn merge(base: &mut PklConfig, other: &PklConfig) {
        if !other.facets.weights.is_empty() {
            base.facets.weights = other.facets.weights.clone();
        }

        for facet in super::ToggleFacet::ALL {
            let table = other.toggles.table(facet);
            if !table.is_empty() {
                *base.toggles.table_mut(facet) = table.clone();
            }
        }

        if other.fusion.clio.is_some() {
            base.fusion.clio = other.fusion.clio;
        }
        if other.fusion.ast.is_some() {
            base.fusion.ast = other.fusion.ast;
        }
        if other.fusion.auto_adjust.is_some() {
            base.fusion.auto_adjust = other.fusion.auto_adjust;
        }

        if other.engine.enabled.is_some() {
            base.engine.enabled = other.engine.enabled;
        }
        if other.engine.command.is_some() {
            base.engine.command = other.engine.command.clone();
        }
        if !other.engine.args.is_empty() {
            base.engine.args = other.engine.args.clone();
        }
        if other.engine.timeout_secs.is_some() {
            base.engine.timeout_secs = other.engine.timeout_secs;
        }
        if other.engine.reprobe_after_failures.is_some() {
            base.engine.reprobe_after_failures = other.engine.reprobe_after_failures;
        }

        if other.analysis.embedding_cache_size.is_some() {
            base.analysis.embedding_cache_size = other.analysis.embedding_cache_size;
        }
        if other.analysis.sequence_gap_secs.is_some() {
            base.analysis.sequence_gap_secs = other.analysis.sequence_gap_secs;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `PKL_FUSION_CLIO`, `PKL_ENGINE_COMMAND`, etc.
    fn apply_env_overrides(config: &mut PklConfig) {
        if let Ok(val) = std::env::var("PKL_FUSION_CLIO") {
            if let Ok(v) = val.parse::<f64>() {
                config.fusion.clio = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PKL_FUSION_AST") {
            if let Ok(v) = val.parse::<f64>() {
                config.fusion.ast = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PKL_FUSION_AUTO_ADJUST") {
            if let Ok(v) = val.parse::<bool>() {
                config.fusion.auto_adjust = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PKL_ENGINE_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.engine.enabled = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PKL_ENGINE_COMMAND") {
            config.engine.command = Some(val);
        }
        if let Ok(val) = std::env::var("PKL_ENGINE_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.engine.timeout_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PKL_ANALYSIS_SEQUENCE_GAP_SECS") {
            if let Ok(v) = val.parse::<i64>() {
                config.analysis.sequence_gap_secs = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PKL_ANALYSIS_EMBEDDING_CACHE_SIZE") {
            if let Ok(v) = val.parse::<u64>() {
                config.analysis.embedding_cache_size = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level config directory: `~/.pkl/`.
fn dirs_path() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".pkl"))
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
