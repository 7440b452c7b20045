//! # Bondscope Portfolio
//!
//! Allocation and risk views over a [`bondscope_core::Portfolio`].
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every view is computed from explicit inputs, with no
//!   I/O and no caching
//! - **Total**: aggregation and scoring never fail; malformed numbers degrade
//!   to zero through [`bondscope_core::safe`]
//! - **Deterministic colors**: a key always maps to the same chart color
//!
//! ## Module Overview
//!
//! - [`allocation`] - Grouping by sector, rating, duration bucket and issuer
//! - [`risk`] - Risk tiers, heatmap scoring and per-position risk series
//! - [`color`] - Palettes and the `Rgb` color type
//! - [`config`] - Aggregation settings
//!
//! ## Quick Start
//!
//! ```rust
//! use bondscope_core::prelude::*;
//! use bondscope_portfolio::prelude::*;
//!
//! let portfolio = Portfolio::from_positions(vec![
//!     Position::new(
//!         Bond::new("B1", "Long Gilt").with_sector("Government").with_duration(12.0),
//!         dec!(750_000),
//!     ),
//!     Position::new(
//!         Bond::new("B2", "Utility 2027").with_sector("Utilities").with_duration(2.5),
//!         dec!(250_000),
//!     ),
//! ]);
//!
//! let by_duration = aggregate(&portfolio, Dimension::DurationBucket);
//! assert_eq!(by_duration[0].key, "Long (7-15Y)");
//!
//! let tier = classify(12.0, RiskKind::Duration, &RiskThresholds::default());
//! assert_eq!(tier, RiskTier::VeryHigh);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod allocation;
pub mod color;
pub mod config;
pub mod error;
pub mod risk;

pub use error::{PortfolioError, PortfolioResult};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::allocation::{
        aggregate, aggregate_all, aggregate_with, tokenization_split, AllocationBreakdown,
        AllocationGroup, Dimension, DurationBucket,
    };
    pub use crate::color::Rgb;
    pub use crate::config::{AggregationConfig, WeightingMethod};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::risk::{
        classify, color_for_score, duration_risk_profile, risk_heatmap, yield_curve,
        HeatmapConfig, RiskHeatmap, RiskKind, RiskThresholds, RiskTier,
    };
}
