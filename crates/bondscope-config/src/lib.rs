//! # Bondscope Configuration
//!
//! TOML configuration for the dashboard: aggregation weighting, risk
//! thresholds, heatmap scoring, recovery retries, simulated compliance
//! latency and the data source.
//!
//! # File Location
//!
//! Configuration is read from an explicit path (`--config`) or from
//! `<config dir>/bondscope/config.toml` (`$XDG_CONFIG_HOME` on Linux). A
//! missing default file is not an error; every field has a default.
//!
//! # Example
//!
//! ```toml
//! [aggregation]
//! weighting = "equal-weight"
//!
//! [risk.duration]
//! very_low = 2.0
//! low = 4.0
//! medium = 7.0
//! high = 10.0
//!
//! [heatmap]
//! rating_ladder = ["AAA", "AA", "A", "BBB"]
//! concentration_threshold = 15.0
//!
//! [recovery]
//! max_retries = 3
//! base_delay_ms = 1000
//! backoff_factor = 2.0
//!
//! [data]
//! path = "portfolio.json"
//! ```
//!
//! # Validation
//!
//! All sections implement [`Validate`]; [`DashboardConfig::load`] rejects
//! configurations with non-monotonic thresholds, an empty rating ladder or
//! out-of-range retry settings.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod dashboard;
mod error;

pub use dashboard::{
    default_path, ComplianceConfig, DashboardConfig, DataConfig, RecoveryConfig,
    CONFIG_DIR_NAME, CONFIG_FILE_NAME,
};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
