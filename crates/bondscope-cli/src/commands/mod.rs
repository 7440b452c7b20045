//! CLI command implementations.

pub mod allocation;
pub mod classify;
pub mod compliance;
pub mod config;
pub mod heatmap;
pub mod risk;
pub mod summary;

pub use allocation::AllocationArgs;
pub use classify::ClassifyArgs;
pub use compliance::ComplianceArgs;
pub use config::ConfigArgs;
pub use heatmap::HeatmapArgs;
pub use risk::RiskArgs;

use anyhow::{Context, Result};

use crate::cli::GlobalArgs;
use bondscope_config::DashboardConfig;
use bondscope_demo::{open_source, DemoDataSource};

/// Loaded configuration and data for one invocation.
pub struct Session {
    pub config: DashboardConfig,
    pub source: Box<dyn DemoDataSource>,
}

impl Session {
    /// Loads the configuration, then the dataset.
    ///
    /// The dataset path is `--data`, else `data.path` from the configuration,
    /// else the built-in demo.
    pub fn open(global: &GlobalArgs) -> Result<Self> {
        let config = load_config(global)?;
        let data_path = global.data.clone().or_else(|| config.data.path.clone());
        let source = open_source(data_path.as_deref()).context("Failed to load dataset")?;
        tracing::debug!(source = source.name(), "session opened");
        Ok(Self { config, source })
    }
}

/// Loads and validates the configuration named by `--config`, or the default one.
pub fn load_config(global: &GlobalArgs) -> Result<DashboardConfig> {
    DashboardConfig::load(global.config.as_deref()).context("Failed to load configuration")
}
