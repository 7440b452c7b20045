//! Overview panel figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bondscope_config::DashboardConfig;
use bondscope_core::safe::{round_to, safe_number};
use bondscope_core::CreditRating;
use bondscope_demo::{DemoDataSource, TransferStatus};
use bondscope_portfolio::allocation::{
    aggregate_with, tokenization_split, AllocationGroup, Dimension, TOKENIZED_KEY,
};
use bondscope_portfolio::risk::{risk_heatmap, HeatmapCell};

/// Headline numbers for the overview tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Where the data came from.
    pub source: String,
    /// Total market value.
    pub total_value: Decimal,
    /// Number of positions.
    pub position_count: usize,
    /// Market-value weighted duration, years.
    pub average_duration: f64,
    /// Market-value weighted yield, percent.
    pub average_yield: f64,
    /// Average rating.
    pub average_rating: CreditRating,
    /// Share of value held in tokenized bonds (0-100).
    pub tokenized_percentage: f64,
    /// Largest sector group.
    pub largest_sector: Option<AllocationGroup>,
    /// Highest-scoring occupied heatmap cell.
    pub hottest_cell: Option<HeatmapCell>,
    /// Holders with frozen accounts.
    pub frozen_accounts: usize,
    /// Rules currently enforced.
    pub active_rules: usize,
    /// Transfers awaiting settlement.
    pub pending_transfers: usize,
}

impl PortfolioSummary {
    /// Computes the summary from a data source under `config`.
    #[must_use]
    pub fn compute(source: &dyn DemoDataSource, config: &DashboardConfig) -> Self {
        let portfolio = source.portfolio();

        let tokenized_percentage = tokenization_split(portfolio, &config.aggregation)
            .into_iter()
            .find(|g| g.key == TOKENIZED_KEY)
            .map_or(0.0, |g| g.percentage);

        let largest_sector = aggregate_with(portfolio, Dimension::Sector, &config.aggregation)
            .into_iter()
            .next();

        let heatmap = risk_heatmap(portfolio, &config.heatmap, &config.risk);

        Self {
            source: source.name().to_string(),
            total_value: portfolio.total_value,
            position_count: portfolio.len(),
            average_duration: round_to(safe_number(portfolio.average_duration), 2),
            average_yield: round_to(safe_number(portfolio.average_yield), 2),
            average_rating: portfolio.average_rating,
            tokenized_percentage,
            largest_sector,
            hottest_cell: heatmap.hottest().cloned(),
            frozen_accounts: source.token_holders().iter().filter(|h| h.frozen).count(),
            active_rules: source.compliance_rules().iter().filter(|r| r.active).count(),
            pending_transfers: source
                .transfer_events()
                .iter()
                .filter(|t| t.status == TransferStatus::Pending)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bondscope_demo::{DemoDataset, StaticDemoSource};
    use rust_decimal_macros::dec;

    #[test]
    fn test_demo_summary() {
        let summary =
            PortfolioSummary::compute(&StaticDemoSource::new(), &DashboardConfig::default());
        assert_eq!(summary.source, "built-in demo");
        assert_eq!(summary.position_count, 9);
        assert_eq!(summary.total_value, dec!(14_100_000));
        assert_eq!(summary.largest_sector.as_ref().map(|g| g.key.as_str()), Some("Government"));
        assert!(summary.tokenized_percentage > 50.0 && summary.tokenized_percentage < 100.0);
        assert!(summary.hottest_cell.is_some());
        assert_eq!(summary.frozen_accounts, 2);
        assert_eq!(summary.active_rules, 4);
        assert_eq!(summary.pending_transfers, 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary =
            PortfolioSummary::compute(&DemoDataset::default(), &DashboardConfig::default());
        assert_eq!(summary.position_count, 0);
        assert_eq!(summary.tokenized_percentage, 0.0);
        assert!(summary.largest_sector.is_none());
        assert!(summary.hottest_cell.is_none());
    }
}
