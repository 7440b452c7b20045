//! Sector x rating risk heatmap.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::score::{color_for_score, concentration_risk, heatmap_score, rating_risk};
use super::thresholds::{HeatmapConfig, RiskThresholds};
use super::tier::{classify, RiskKind, RiskTier};
use crate::allocation::{aggregate, Dimension};
use crate::color::Rgb;
use bondscope_core::safe::safe_percentage;
use bondscope_core::{Portfolio, RatingBucket};

/// One sector x rating cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    /// Sector row key.
    pub sector: String,
    /// Rating column.
    pub rating: RatingBucket,
    /// Summed market value in this cell.
    pub value: Decimal,
    /// Share of the portfolio total value (0-100).
    pub percentage: f64,
    /// Number of positions in this cell.
    pub count: usize,
    /// Combined score (0-100).
    pub score: f64,
    /// Score tier (Low / Medium / High).
    pub tier: RiskTier,
    /// Score color.
    pub color: Rgb,
}

/// Full heatmap grid in row-major order (sectors x ladder).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskHeatmap {
    /// Row keys, largest sector first.
    pub sectors: Vec<String>,
    /// Column keys, best to worst.
    pub ratings: Vec<RatingBucket>,
    /// `sectors.len() * ratings.len()` cells.
    pub cells: Vec<HeatmapCell>,
    /// Positions whose rating is not on the ladder.
    pub excluded: usize,
}

impl RiskHeatmap {
    /// Cell lookup.
    #[must_use]
    pub fn cell(&self, sector: &str, rating: RatingBucket) -> Option<&HeatmapCell> {
        self.cells
            .iter()
            .find(|c| c.sector == sector && c.rating == rating)
    }

    /// Cells of one sector row.
    pub fn row<'a>(&'a self, sector: &'a str) -> impl Iterator<Item = &'a HeatmapCell> + 'a {
        self.cells.iter().filter(move |c| c.sector == sector)
    }

    /// Highest scoring cell that holds at least one position.
    #[must_use]
    pub fn hottest(&self) -> Option<&HeatmapCell> {
        self.cells
            .iter()
            .filter(|c| c.count > 0)
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// Builds the sector x rating heatmap.
///
/// Every sector present in the portfolio gets one row with a cell per ladder
/// rating, including empty cells (their score is rating risk alone).
/// Positions whose rating bucket is not on the ladder are left out of the grid
/// and counted in [`RiskHeatmap::excluded`].
#[must_use]
pub fn risk_heatmap(
    portfolio: &Portfolio,
    config: &HeatmapConfig,
    thresholds: &RiskThresholds,
) -> RiskHeatmap {
    let sectors: Vec<String> = aggregate(portfolio, Dimension::Sector)
        .into_iter()
        .map(|g| g.key)
        .collect();

    let mut cells = Vec::with_capacity(sectors.len() * config.rating_ladder.len());
    for sector in &sectors {
        for (index, bucket) in config.rating_ladder.iter().enumerate() {
            let members: Vec<_> = portfolio
                .positions
                .iter()
                .filter(|p| {
                    Dimension::Sector.key_for(p) == *sector && p.bond.rating.bucket() == *bucket
                })
                .collect();

            let value: Decimal = members.iter().map(|p| p.market_value).sum();
            let percentage = safe_percentage(value, portfolio.total_value);
            let score = heatmap_score(
                rating_risk(index, config.rating_step),
                concentration_risk(
                    percentage,
                    config.concentration_threshold,
                    config.concentration_multiplier,
                ),
            );

            cells.push(HeatmapCell {
                sector: sector.clone(),
                rating: *bucket,
                value,
                percentage,
                count: members.len(),
                score,
                tier: classify(score, RiskKind::HeatmapScore, thresholds),
                color: color_for_score(score),
            });
        }
    }

    let excluded = portfolio
        .positions
        .iter()
        .filter(|p| config.ladder_index(p.bond.rating.bucket()).is_none())
        .count();
    if excluded > 0 {
        tracing::debug!(excluded, "positions rated off the heatmap ladder");
    }

    RiskHeatmap {
        sectors,
        ratings: config.rating_ladder.clone(),
        cells,
        excluded,
    }
}
