//! Per-position risk series: duration risk profile and yield curve.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::thresholds::RiskThresholds;
use super::tier::{classify, rating_tier, RiskKind, RiskTier};
use crate::color::Rgb;
use bondscope_core::safe::{safe_number, safe_percentage};
use bondscope_core::{Bond, CreditRating, Portfolio};

/// Duration risk of one position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationRiskPoint {
    /// Bond identifier.
    pub bond_id: String,
    /// Bond name.
    pub name: String,
    /// Duration in years (sanitized).
    pub duration: f64,
    /// Market value of the position.
    pub market_value: Decimal,
    /// Duration tier.
    pub tier: RiskTier,
    /// Credit tier of the bond's rating.
    pub credit_tier: RiskTier,
    /// Tier color.
    pub color: Rgb,
}

/// Lists every position's duration tier, in portfolio order.
#[must_use]
pub fn duration_risk_profile(
    portfolio: &Portfolio,
    thresholds: &RiskThresholds,
) -> Vec<DurationRiskPoint> {
    portfolio
        .positions
        .iter()
        .map(|p| {
            let duration = safe_number(p.bond.duration).max(0.0);
            let tier = classify(duration, RiskKind::Duration, thresholds);
            DurationRiskPoint {
                bond_id: p.bond.id.clone(),
                name: p.bond.name.clone(),
                duration,
                market_value: p.market_value,
                tier,
                credit_tier: rating_tier(p.bond.rating, thresholds),
                color: tier.color(),
            }
        })
        .collect()
}

/// Position count and value held in one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierExposure {
    /// Tier.
    pub tier: RiskTier,
    /// Positions in the tier.
    pub count: usize,
    /// Summed market value.
    pub value: Decimal,
    /// Share of portfolio total value (0-100).
    pub percentage: f64,
}

/// Exposure per duration tier, lowest tier first. All five tiers are listed.
#[must_use]
pub fn duration_tier_distribution(
    portfolio: &Portfolio,
    thresholds: &RiskThresholds,
) -> Vec<TierExposure> {
    let profile = duration_risk_profile(portfolio, thresholds);
    RiskTier::all()
        .iter()
        .map(|&tier| {
            let (count, value) = profile
                .iter()
                .filter(|point| point.tier == tier)
                .fold((0, Decimal::ZERO), |(n, v), point| (n + 1, v + point.market_value));
            TierExposure {
                tier,
                count,
                value,
                percentage: safe_percentage(value, portfolio.total_value),
            }
        })
        .collect()
}

/// One point of the yield curve scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldPoint {
    /// Bond identifier.
    pub bond_id: String,
    /// Duration in years.
    pub duration: f64,
    /// Yield to maturity in percent.
    pub yield_to_maturity: f64,
    /// Composite rating.
    pub rating: CreditRating,
    /// Tokenized flag.
    pub tokenized: bool,
}

/// (duration, yield) points sorted by duration; equal durations keep input order.
#[must_use]
pub fn yield_curve<'a, I>(bonds: I) -> Vec<YieldPoint>
where
    I: IntoIterator<Item = &'a Bond>,
{
    let mut points: Vec<YieldPoint> = bonds
        .into_iter()
        .map(|bond| YieldPoint {
            bond_id: bond.id.clone(),
            duration: safe_number(bond.duration).max(0.0),
            yield_to_maturity: safe_number(bond.yield_to_maturity),
            rating: bond.rating,
            tokenized: bond.tokenized,
        })
        .collect();
    points.sort_by(|a, b| a.duration.total_cmp(&b.duration));
    points
}
