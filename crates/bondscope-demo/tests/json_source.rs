//! JSON data source loading.

use std::io::Write;

use bondscope_demo::{
    open_source, DemoDataError, DemoDataSource, JsonDemoSource, StaticDemoSource, TransferStatus,
};
use bondscope_core::CreditRating;
use bondscope_portfolio::allocation::{aggregate, Dimension};
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

fn write_json(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_document() {
    let file = write_json(
        r#"{
            "portfolio": {
                "positions": [
                    {"bond": {"id": "T1", "name": "Token Gilt", "sector": "Government", "rating": "Aa2", "duration": 5.5, "ytm": 4.1, "isTokenized": true}, "marketValue": 600000},
                    {"bond": {"id": "T2", "name": "Junk", "sector": "Corporate", "rating": "B-", "duration": "n/a", "yield": 9.2}, "marketValue": 400000}
                ],
                "totalValue": 1000000,
                "averageDuration": 3.3,
                "averageYield": 6.1,
                "averageRating": "A"
            },
            "tokenHolders": [{"address": "0x01", "balance": 10, "whitelisted": true, "kycVerified": true}],
            "transferEvents": [{"id": "tx", "status": "blocked", "timestamp": "2024-06-01T12:00:00Z"}]
        }"#,
    );

    let source = JsonDemoSource::from_path(file.path()).unwrap();
    let portfolio = source.portfolio();
    assert_eq!(portfolio.len(), 2);
    assert_eq!(portfolio.average_duration, 3.3);
    assert_eq!(portfolio.positions[1].bond.duration, 0.0);
    assert!(portfolio.positions[0].bond.tokenized);
    assert_eq!(source.bonds().len(), 2);
    assert!(source.token_holders()[0].can_transfer());
    assert_eq!(source.transfer_events()[0].status, TransferStatus::Blocked);
    assert!(source.compliance_rules().is_empty());
    assert!(source.name().starts_with("file:"));

    let groups = aggregate(portfolio, Dimension::Rating);
    let keys: Vec<_> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["AA", "B-"]);
}

#[test]
fn test_explicit_zero_total_is_kept() {
    let file = write_json(
        r#"{
            "portfolio": {
                "positions": [
                    {"bond": {"id": "Z1", "sector": "Energy", "rating": "AAA", "duration": 2, "ytm": 3}, "marketValue": 100}
                ],
                "totalValue": 0,
                "averageDuration": 9.9,
                "averageYield": 7.7,
                "averageRating": "BBB"
            }
        }"#,
    );

    let source = JsonDemoSource::from_path(file.path()).unwrap();
    let portfolio = source.portfolio();
    assert!(portfolio.total_value.is_zero());
    assert_eq!(portfolio.average_duration, 9.9);
    assert_eq!(portfolio.average_yield, 7.7);
    assert_eq!(portfolio.average_rating, CreditRating::BBB);
    assert_eq!(portfolio.positions[0].weight, 0.0);

    let groups = aggregate(portfolio, Dimension::Sector);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].percentage, 0.0);
}

#[test]
fn test_only_absent_aggregates_are_derived() {
    let file = write_json(
        r#"{
            "portfolio": {
                "positions": [
                    {"bond": {"id": "D1", "rating": "AAA", "duration": 2, "ytm": 3}, "marketValue": 300},
                    {"bond": {"id": "D2", "rating": "BBB", "duration": 6, "ytm": 5}, "marketValue": 100}
                ],
                "averageYield": 7.7,
                "averageRating": "BBB"
            }
        }"#,
    );

    let source = JsonDemoSource::from_path(file.path()).unwrap();
    let portfolio = source.portfolio();
    assert_eq!(portfolio.total_value, dec!(400));
    assert_eq!(portfolio.average_duration, 3.0);
    assert_eq!(portfolio.average_yield, 7.7);
    assert_eq!(portfolio.average_rating, CreditRating::BBB);
    assert_eq!(portfolio.positions[0].weight, 75.0);
    assert_eq!(portfolio.positions[1].weight, 25.0);
}

#[test]
fn test_missing_file() {
    let err = JsonDemoSource::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, DemoDataError::Io { .. }));
}

#[test]
fn test_bad_json_names_file() {
    let file = write_json("{ \"portfolio\": ");
    let err = JsonDemoSource::from_path(file.path()).unwrap_err();
    assert!(matches!(err, DemoDataError::Parse { .. }));
    assert!(err.to_string().contains(&file.path().display().to_string()));
}

#[test]
fn test_reload_keeps_data_on_failure() {
    let file = write_json(r#"{"tokenHolders": [{"address": "0x01"}]}"#);
    let mut source = JsonDemoSource::from_path(file.path()).unwrap();

    std::fs::write(file.path(), "not json").unwrap();
    assert!(source.reload().is_err());
    assert_eq!(source.token_holders().len(), 1);
}

#[test]
fn test_static_round_trips_through_json() {
    let dataset = StaticDemoSource::new().into_dataset();
    let file = write_json(&serde_json::to_string(&dataset).unwrap());
    let source = open_source(Some(file.path())).unwrap();

    assert_eq!(source.portfolio().len(), dataset.portfolio.len());
    assert_eq!(source.bonds().len(), dataset.bonds.len());
    assert_eq!(source.pause_events(), dataset.pause_events.as_slice());
}

#[test]
fn test_open_source_defaults_to_builtin() {
    let source = open_source(None).unwrap();
    assert_eq!(source.name(), "built-in demo");
    assert_eq!(source.portfolio().len(), 9);
}
