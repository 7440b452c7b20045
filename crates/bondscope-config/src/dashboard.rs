//! Dashboard configuration file.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use bondscope_portfolio::config::AggregationConfig;
use bondscope_portfolio::risk::{HeatmapConfig, RiskThresholds, ScoreBands, TierLimits};

/// Directory name under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "bondscope";
/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Complete dashboard configuration.
///
/// Every section and field is optional in the file; anything missing takes
/// its default.
///
/// # Example
///
/// ```rust
/// use bondscope_config::{DashboardConfig, Validate};
///
/// let config = DashboardConfig::from_toml_str(r#"
///     [recovery]
///     max_retries = 5
///
///     [aggregation]
///     weighting = "market-value"
/// "#).unwrap();
///
/// assert_eq!(config.recovery.max_retries, 5);
/// assert_eq!(config.recovery.base_delay_ms, 1000);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Allocation grouping.
    pub aggregation: AggregationConfig,

    /// Risk tier thresholds.
    pub risk: RiskThresholds,

    /// Heatmap scoring.
    pub heatmap: HeatmapConfig,

    /// Render recovery.
    pub recovery: RecoveryConfig,

    /// Simulated compliance actions.
    pub compliance: ComplianceConfig,

    /// Data source selection.
    pub data: DataConfig,
}

/// Retry settings for the render recovery boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Retries before giving up.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry, in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Multiplier applied to the delay after each retry.
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: f64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_backoff_factor() -> f64 {
    2.0
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
            backoff_factor: default_backoff_factor(),
        }
    }
}

/// Simulated latency for compliance actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceConfig {
    /// Pause / unpause latency, in milliseconds.
    #[serde(default = "default_pause_delay_ms")]
    pub pause_delay_ms: u64,

    /// Freeze / unfreeze latency, in milliseconds.
    #[serde(default = "default_freeze_delay_ms")]
    pub freeze_delay_ms: u64,

    /// Rule toggle latency, in milliseconds.
    #[serde(default = "default_rule_delay_ms")]
    pub rule_delay_ms: u64,
}

fn default_pause_delay_ms() -> u64 {
    2000
}

fn default_freeze_delay_ms() -> u64 {
    1500
}

fn default_rule_delay_ms() -> u64 {
    1000
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        Self {
            pause_delay_ms: default_pause_delay_ms(),
            freeze_delay_ms: default_freeze_delay_ms(),
            rule_delay_ms: default_rule_delay_ms(),
        }
    }
}

/// Where dashboard data comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON data file; the built-in demo dataset is used when unset.
    pub path: Option<PathBuf>,
}

const MAX_RETRIES: u32 = 10;
const MAX_ACTION_DELAY_MS: u64 = 60_000;

impl DashboardConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Deserialization {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        toml::from_str(&content).map_err(|e| ConfigError::Deserialization {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads `explicit` if given, otherwise the default file if it exists,
    /// otherwise defaults. The result is validated.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_path() {
                Ok(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    tracing::debug!("no configuration file, using defaults");
                    Self::default()
                }
            },
        };
        config.validate_or_error()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Default configuration file location (`<config dir>/bondscope/config.toml`).
pub fn default_path() -> ConfigResult<PathBuf> {
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

// =============================================================================
// VALIDATION
// =============================================================================

fn check_limits(field: &str, limits: &TierLimits, errors: &mut Vec<ValidationError>) {
    if !limits.is_ascending() {
        errors.push(ValidationError::with_rule(
            field,
            format!(
                "Tier bounds must be finite and strictly increasing, got {:?}",
                limits.as_array()
            ),
            "ascending_thresholds",
        ));
    }
}

fn check_bands(field: &str, bands: &ScoreBands, errors: &mut Vec<ValidationError>) {
    if !bands.is_ascending() {
        errors.push(ValidationError::with_rule(
            field,
            "Score bands must be finite with low < medium",
            "ascending_thresholds",
        ));
    } else if bands.low < 0.0 || bands.medium > 100.0 {
        errors.push(ValidationError::with_rule(
            field,
            "Score bands must lie within 0-100",
            "score_range",
        ));
    }
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        check_limits("risk.duration", &self.risk.duration, &mut errors);
        check_limits("risk.rating", &self.risk.rating, &mut errors);
        check_bands("risk.heatmap", &self.risk.heatmap, &mut errors);

        errors.extend(
            self.heatmap
                .validate()
                .into_iter()
                .map(|e| e.in_section("heatmap")),
        );
        errors.extend(
            self.recovery
                .validate()
                .into_iter()
                .map(|e| e.in_section("recovery")),
        );
        errors.extend(
            self.compliance
                .validate()
                .into_iter()
                .map(|e| e.in_section("compliance")),
        );

        if let Some(path) = &self.data.path {
            if path.as_os_str().is_empty() {
                errors.push(ValidationError::new("data.path", "Path cannot be empty"));
            }
        }

        errors
    }
}

impl Validate for HeatmapConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.rating_ladder.is_empty() {
            errors.push(ValidationError::new(
                "rating_ladder",
                "Rating ladder cannot be empty",
            ));
        }
        let unique: HashSet<_> = self.rating_ladder.iter().collect();
        if unique.len() != self.rating_ladder.len() {
            errors.push(ValidationError::with_rule(
                "rating_ladder",
                "Rating ladder contains duplicate ratings",
                "unique_ratings",
            ));
        }

        if !(0.0..=100.0).contains(&self.concentration_threshold) {
            errors.push(ValidationError::with_rule(
                "concentration_threshold",
                "Concentration threshold must be between 0 and 100",
                "percentage_range",
            ));
        }

        if !self.concentration_multiplier.is_finite() || self.concentration_multiplier < 1.0 {
            errors.push(ValidationError::with_rule(
                "concentration_multiplier",
                "Concentration multiplier must be at least 1",
                "min_multiplier",
            ));
        }

        if !self.rating_step.is_finite() || self.rating_step <= 0.0 {
            errors.push(ValidationError::with_rule(
                "rating_step",
                "Rating step must be positive",
                "positive_step",
            ));
        }

        errors
    }
}

impl Validate for RecoveryConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.max_retries > MAX_RETRIES {
            errors.push(ValidationError::with_rule(
                "max_retries",
                format!("Max retries {} exceeds maximum of {MAX_RETRIES}", self.max_retries),
                "max_retries",
            ));
        }

        if self.base_delay_ms == 0 {
            errors.push(ValidationError::new(
                "base_delay_ms",
                "Base delay must be positive",
            ));
        }

        if !self.backoff_factor.is_finite() || self.backoff_factor < 1.0 {
            errors.push(ValidationError::with_rule(
                "backoff_factor",
                "Backoff factor must be at least 1",
                "min_backoff",
            ));
        }

        errors
    }
}

impl Validate for ComplianceConfig {
    fn validate(&self) -> Vec<ValidationError> {
        [
            ("pause_delay_ms", self.pause_delay_ms),
            ("freeze_delay_ms", self.freeze_delay_ms),
            ("rule_delay_ms", self.rule_delay_ms),
        ]
        .into_iter()
        .filter(|(_, delay)| *delay > MAX_ACTION_DELAY_MS)
        .map(|(field, delay)| {
            ValidationError::with_rule(
                field,
                format!("Delay {delay}ms exceeds maximum of {MAX_ACTION_DELAY_MS}ms"),
                "max_delay",
            )
        })
        .collect()
    }
}
