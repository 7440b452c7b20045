//! Risk scoring.
//!
//! - [`classify`] maps a metric value onto a [`RiskTier`] using [`RiskThresholds`]
//! - [`color_for_score`] renders a 0-100 score on a green-amber-red ramp
//! - [`risk_heatmap`] scores every sector x rating cell of a portfolio
//! - [`duration_risk_profile`] and [`yield_curve`] produce per-position series
//!
//! Everything here is total: bad inputs fall back to zero rather than erroring.

mod heatmap;
mod profile;
mod score;
mod thresholds;
mod tier;

pub use heatmap::{risk_heatmap, HeatmapCell, RiskHeatmap};
pub use profile::{
    duration_risk_profile, duration_tier_distribution, yield_curve, DurationRiskPoint,
    TierExposure, YieldPoint,
};
pub use score::{color_for_score, concentration_risk, heatmap_score, rating_risk};
pub use thresholds::{HeatmapConfig, RiskThresholds, ScoreBands, TierLimits};
pub use tier::{classify, duration_tier, rating_tier, RiskKind, RiskTier};
