//! Integration tests for bondscope-portfolio.
//!
//! End-to-end checks of allocation and risk views over a realistic book.

use approx::assert_relative_eq;
use bondscope_core::prelude::*;
use bondscope_portfolio::prelude::*;
use bondscope_portfolio::risk::{
    concentration_risk, duration_tier_distribution, heatmap_score, rating_risk,
};

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn position(
    id: &str,
    issuer: &str,
    sector: &str,
    rating: CreditRating,
    duration: f64,
    ytm: f64,
    mv: Decimal,
) -> Position {
    Position::new(
        Bond::new(id, format!("{issuer} {id}"))
            .with_issuer(issuer)
            .with_sector(sector)
            .with_rating(rating)
            .with_duration(duration)
            .with_yield(ytm)
            .tokenized(id.starts_with('T')),
        mv,
    )
}

fn demo_book() -> Portfolio {
    Portfolio::from_positions(vec![
        position("T-UST30", "US Treasury", "Government", CreditRating::AAA, 4.6, 4.15, dec!(4_000_000)),
        position("T-UST50", "US Treasury", "Government", CreditRating::AAA, 14.2, 4.45, dec!(2_500_000)),
        position("C-ACME", "Acme Industrial", "Corporate", CreditRating::A, 3.0, 5.05, dec!(1_500_000)),
        position("C-GLBX", "Globex", "Financial", CreditRating::BBBPlus, 6.1, 5.60, dec!(1_200_000)),
        position("T-UTIL", "Northwind Power", "Utilities", CreditRating::AAMinus, 16.4, 4.90, dec!(800_000)),
    ])
}

// =============================================================================
// ALLOCATION
// =============================================================================

#[test]
fn test_sector_allocation() {
    let book = demo_book();
    let groups = aggregate(&book, Dimension::Sector);

    assert_eq!(groups.len(), 4);
    assert_eq!(groups[0].key, "Government");
    assert_eq!(groups[0].value, dec!(6_500_000));
    assert_eq!(groups[0].count, 2);
    assert_relative_eq!(groups[0].percentage, 65.0, epsilon = 1e-9);
    assert_relative_eq!(groups[0].avg_yield, 4.3, epsilon = 1e-9);
    assert_relative_eq!(groups[0].avg_duration, 9.4, epsilon = 1e-9);
}

#[test]
fn test_duration_boundary_groups() {
    let book = Portfolio::from_positions(vec![
        position("A", "X", "Corporate", CreditRating::A, 3.0, 5.0, dec!(100)),
        position("B", "X", "Corporate", CreditRating::A, 3.01, 5.0, dec!(50)),
    ]);
    let groups = aggregate(&book, Dimension::DurationBucket);
    assert_eq!(groups[0].key, "Short (0-3Y)");
    assert_eq!(groups[0].count, 1);
    assert_eq!(groups[1].key, "Medium (3-7Y)");
    assert_eq!(groups[1].count, 1);
}

#[test]
fn test_aggregate_is_deterministic() {
    let book = demo_book();
    for dimension in Dimension::all() {
        assert_eq!(aggregate(&book, *dimension), aggregate(&book, *dimension));
    }
}

#[test]
fn test_market_value_weighting_changes_averages_only() {
    let book = demo_book();
    let weighted = aggregate_with(
        &book,
        Dimension::Sector,
        &AggregationConfig::new().with_weighting(WeightingMethod::MarketValue),
    );
    let plain = aggregate(&book, Dimension::Sector);

    assert_eq!(weighted[0].value, plain[0].value);
    assert_eq!(weighted[0].percentage, plain[0].percentage);
    // (4.6 * 4.0 + 14.2 * 2.5) / 6.5
    assert_relative_eq!(weighted[0].avg_duration, 53.9 / 6.5, epsilon = 1e-9);
}

#[test]
fn test_breakdown_matches_individual_views() {
    let book = demo_book();
    let breakdown = aggregate_all(&book, &AggregationConfig::default());
    for dimension in Dimension::all() {
        assert_eq!(breakdown.get(*dimension), aggregate(&book, *dimension).as_slice());
    }
    let json = serde_json::to_value(&breakdown).unwrap();
    assert!(json.get("bySector").is_some());
    assert!(json["bySector"][0]["avgYield"].is_f64());
    assert_eq!(json["bySector"][0]["color"], "#3b82f6");
}

#[test]
fn test_tokenized_share() {
    let split = tokenization_split(&demo_book(), &AggregationConfig::default());
    assert_eq!(split[0].key, "Tokenized");
    assert_relative_eq!(split[0].percentage, 73.0, epsilon = 1e-9);
}

// =============================================================================
// RISK
// =============================================================================

#[test]
fn test_duration_classification_boundaries() {
    let t = RiskThresholds::default();
    assert_eq!(classify(2.0, RiskKind::Duration, &t), RiskTier::VeryLow);
    assert_eq!(classify(2.01, RiskKind::Duration, &t), RiskTier::Low);
    assert_eq!(classify(10.0, RiskKind::Duration, &t), RiskTier::High);
    assert_eq!(classify(10.01, RiskKind::Duration, &t), RiskTier::VeryHigh);
}

#[test]
fn test_heatmap_worked_example() {
    let config = HeatmapConfig::default();
    let index = config.ladder_index(RatingBucket::A).unwrap();
    assert_eq!(index, 2);

    let rating = rating_risk(index, config.rating_step);
    let concentration = concentration_risk(
        20.0,
        config.concentration_threshold,
        config.concentration_multiplier,
    );
    assert_relative_eq!(rating, 30.0);
    assert_relative_eq!(concentration, 40.0);

    let score = heatmap_score(rating, concentration);
    assert_relative_eq!(score, 35.0);
    assert_eq!(
        classify(score, RiskKind::HeatmapScore, &RiskThresholds::default()),
        RiskTier::Medium
    );
}

#[test]
fn test_heatmap_over_book() {
    let book = demo_book();
    let map = risk_heatmap(&book, &HeatmapConfig::default(), &RiskThresholds::default());

    assert_eq!(map.sectors.len(), 4);
    assert_eq!(map.cells.len(), 16);
    assert_eq!(map.excluded, 0);

    let gov = map.cell("Government", RatingBucket::AAA).unwrap();
    assert_eq!(gov.count, 2);
    // (10 + 65 * 2) / 2
    assert_relative_eq!(gov.score, 70.0, epsilon = 1e-9);
    assert_eq!(gov.tier, RiskTier::High);
    assert_eq!(gov.color, color_for_score(70.0));

    // AA- counts as AA on the ladder
    let util = map.cell("Utilities", RatingBucket::AA).unwrap();
    assert_eq!(util.count, 1);
    assert_eq!(map.hottest().unwrap().sector, "Government");
}

#[test]
fn test_duration_profile_and_curve() {
    let book = demo_book();
    let t = RiskThresholds::default();

    let profile = duration_risk_profile(&book, &t);
    let tiers: Vec<_> = profile.iter().map(|p| p.tier).collect();
    assert_eq!(
        tiers,
        vec![
            RiskTier::Medium,
            RiskTier::VeryHigh,
            RiskTier::Low,
            RiskTier::Medium,
            RiskTier::VeryHigh,
        ]
    );

    let dist = duration_tier_distribution(&book, &t);
    let very_high = dist.iter().find(|d| d.tier == RiskTier::VeryHigh).unwrap();
    assert_eq!(very_high.value, dec!(3_300_000));

    let curve = yield_curve(book.bonds());
    assert_eq!(curve.first().unwrap().bond_id, "C-ACME");
    assert_eq!(curve.last().unwrap().bond_id, "T-UTIL");
}
