//! Risk tiers and threshold classification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::thresholds::{RiskThresholds, ScoreBands, TierLimits};
use crate::color::Rgb;
use crate::error::PortfolioError;
use bondscope_core::safe::safe_number;
use bondscope_core::CreditRating;

/// Ordered risk tier, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskTier {
    /// Very low risk.
    VeryLow,
    /// Low risk.
    Low,
    /// Medium risk.
    Medium,
    /// High risk.
    High,
    /// Very high risk.
    VeryHigh,
}

impl RiskTier {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "Very Low",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }

    /// Badge color.
    #[must_use]
    pub fn color(&self) -> Rgb {
        match self {
            Self::VeryLow => Rgb::new(0x22, 0xc5, 0x5e),
            Self::Low => Rgb::new(0x84, 0xcc, 0x16),
            Self::Medium => Rgb::new(0xf5, 0x9e, 0x0b),
            Self::High => Rgb::new(0xf9, 0x73, 0x16),
            Self::VeryHigh => Rgb::new(0xef, 0x44, 0x44),
        }
    }

    /// All tiers, lowest first.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::VeryLow,
            Self::Low,
            Self::Medium,
            Self::High,
            Self::VeryHigh,
        ]
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metric being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskKind {
    /// Modified duration in years (five tiers).
    Duration,
    /// Heatmap cell score 0-100 (Low / Medium / High).
    HeatmapScore,
    /// Credit rating numeric score (five tiers).
    Rating,
}

impl RiskKind {
    /// Short name, as accepted by [`FromStr`].
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Duration => "duration",
            Self::HeatmapScore => "heatmap",
            Self::Rating => "rating",
        }
    }
}

impl fmt::Display for RiskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskKind {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "duration" => Ok(Self::Duration),
            "heatmap" | "heatmap-score" | "score" => Ok(Self::HeatmapScore),
            "rating" | "credit" => Ok(Self::Rating),
            other => Err(PortfolioError::UnknownRiskKind(other.to_string())),
        }
    }
}

/// Maps a metric value to its tier.
///
/// Never fails: non-finite input counts as 0, and heatmap scores are clamped
/// to [0, 100] before lookup.
///
/// # Examples
///
/// ```rust
/// use bondscope_portfolio::risk::{classify, RiskKind, RiskThresholds, RiskTier};
///
/// let t = RiskThresholds::default();
/// assert_eq!(classify(2.0, RiskKind::Duration, &t), RiskTier::VeryLow);
/// assert_eq!(classify(2.01, RiskKind::Duration, &t), RiskTier::Low);
/// assert_eq!(classify(35.0, RiskKind::HeatmapScore, &t), RiskTier::Medium);
/// ```
#[must_use]
pub fn classify(value: f64, kind: RiskKind, thresholds: &RiskThresholds) -> RiskTier {
    let value = safe_number(value);
    match kind {
        RiskKind::Duration => five_tier(value, &thresholds.duration),
        RiskKind::Rating => five_tier(value, &thresholds.rating),
        RiskKind::HeatmapScore => three_band(value.clamp(0.0, 100.0), &thresholds.heatmap),
    }
}

fn five_tier(value: f64, limits: &TierLimits) -> RiskTier {
    if value <= limits.very_low {
        RiskTier::VeryLow
    } else if value <= limits.low {
        RiskTier::Low
    } else if value <= limits.medium {
        RiskTier::Medium
    } else if value <= limits.high {
        RiskTier::High
    } else {
        RiskTier::VeryHigh
    }
}

fn three_band(score: f64, bands: &ScoreBands) -> RiskTier {
    if score < bands.low {
        RiskTier::Low
    } else if score < bands.medium {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

/// Duration tier with default thresholds.
#[must_use]
pub fn duration_tier(years: f64) -> RiskTier {
    classify(years, RiskKind::Duration, &RiskThresholds::default())
}

/// Credit tier of a rating.
#[must_use]
pub fn rating_tier(rating: CreditRating, thresholds: &RiskThresholds) -> RiskTier {
    classify(f64::from(rating.score()), RiskKind::Rating, thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_boundaries() {
        let t = RiskThresholds::default();
        let cases = [
            (0.0, RiskTier::VeryLow),
            (2.0, RiskTier::VeryLow),
            (2.01, RiskTier::Low),
            (4.0, RiskTier::Low),
            (4.01, RiskTier::Medium),
            (7.0, RiskTier::Medium),
            (7.5, RiskTier::High),
            (10.0, RiskTier::High),
            (10.01, RiskTier::VeryHigh),
            (30.0, RiskTier::VeryHigh),
        ];
        for (years, tier) in cases {
            assert_eq!(classify(years, RiskKind::Duration, &t), tier, "{years}");
        }
    }

    #[test]
    fn test_heatmap_bands_and_clamping() {
        let t = RiskThresholds::default();
        assert_eq!(classify(19.99, RiskKind::HeatmapScore, &t), RiskTier::Low);
        assert_eq!(classify(20.0, RiskKind::HeatmapScore, &t), RiskTier::Medium);
        assert_eq!(classify(49.99, RiskKind::HeatmapScore, &t), RiskTier::Medium);
        assert_eq!(classify(50.0, RiskKind::HeatmapScore, &t), RiskTier::High);
        assert_eq!(classify(-40.0, RiskKind::HeatmapScore, &t), RiskTier::Low);
        assert_eq!(classify(250.0, RiskKind::HeatmapScore, &t), RiskTier::High);
    }

    #[test]
    fn test_non_finite_counts_as_zero() {
        let t = RiskThresholds::default();
        assert_eq!(classify(f64::NAN, RiskKind::Duration, &t), RiskTier::VeryLow);
        assert_eq!(classify(f64::INFINITY, RiskKind::HeatmapScore, &t), RiskTier::Low);
    }

    #[test]
    fn test_rating_tiers() {
        let t = RiskThresholds::default();
        assert_eq!(rating_tier(CreditRating::AAA, &t), RiskTier::VeryLow);
        assert_eq!(rating_tier(CreditRating::AAMinus, &t), RiskTier::VeryLow);
        assert_eq!(rating_tier(CreditRating::APlus, &t), RiskTier::Low);
        assert_eq!(rating_tier(CreditRating::BBBMinus, &t), RiskTier::Medium);
        assert_eq!(rating_tier(CreditRating::BB, &t), RiskTier::High);
        assert_eq!(rating_tier(CreditRating::B, &t), RiskTier::VeryHigh);
        assert_eq!(rating_tier(CreditRating::NotRated, &t), RiskTier::VeryHigh);
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("Duration".parse::<RiskKind>().unwrap(), RiskKind::Duration);
        assert_eq!("heatmap".parse::<RiskKind>().unwrap(), RiskKind::HeatmapScore);
        assert!("volatility".parse::<RiskKind>().is_err());
        for kind in [RiskKind::Duration, RiskKind::HeatmapScore, RiskKind::Rating] {
            assert_eq!(kind.to_string().parse::<RiskKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_tier_order_and_serde() {
        assert!(RiskTier::VeryLow < RiskTier::VeryHigh);
        assert_eq!(serde_json::to_string(&RiskTier::VeryLow).unwrap(), r#""very-low""#);
        assert_eq!(RiskTier::VeryHigh.to_string(), "Very High");
    }
}
