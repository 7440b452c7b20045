//! Data source trait and the JSON file source.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DemoDataError, DemoDataResult};
use crate::records::{ComplianceRule, PauseEvent, TokenHolder, TransferEvent};
use bondscope_core::{Bond, Portfolio};

/// Read-only session data behind the dashboard.
///
/// Sources load everything up front; accessors never fail.
pub trait DemoDataSource: Send + Sync {
    /// Short description of where the data came from.
    fn name(&self) -> &str;

    /// The portfolio with its precomputed aggregates.
    fn portfolio(&self) -> &Portfolio;

    /// The bond universe (held and watch-listed bonds).
    fn bonds(&self) -> &[Bond];

    /// Token holders.
    fn token_holders(&self) -> &[TokenHolder];

    /// Transfer restriction rules.
    fn compliance_rules(&self) -> &[ComplianceRule];

    /// Transfer history, newest first.
    fn transfer_events(&self) -> &[TransferEvent];

    /// Pause history, newest first.
    fn pause_events(&self) -> &[PauseEvent];
}

/// Every section a source provides. Missing sections deserialize as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DemoDataset {
    /// Portfolio.
    pub portfolio: Portfolio,
    /// Bond universe.
    pub bonds: Vec<Bond>,
    /// Token holders.
    pub token_holders: Vec<TokenHolder>,
    /// Compliance rules.
    pub compliance_rules: Vec<ComplianceRule>,
    /// Transfer history.
    pub transfer_events: Vec<TransferEvent>,
    /// Pause history.
    pub pause_events: Vec<PauseEvent>,
}

impl DemoDataset {
    /// Parses a dataset document, derives the aggregates it leaves out and
    /// applies [`DemoDataset::normalize`].
    pub fn from_json_str(json: &str) -> DemoDataResult<Self> {
        Ok(Self::parse_document(json)?)
    }

    fn parse_document(json: &str) -> Result<Self, serde_json::Error> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let missing = MissingAggregates::of(&document);
        let mut dataset: Self = serde_json::from_value(document)?;
        dataset.derive_missing(missing);
        dataset.normalize();
        Ok(dataset)
    }

    /// Derives only the portfolio aggregates the document did not supply.
    ///
    /// Supplied values win, including an explicit zero total.
    fn derive_missing(&mut self, missing: MissingAggregates) {
        if missing.is_none() || self.portfolio.is_empty() {
            return;
        }
        tracing::debug!(
            positions = self.portfolio.len(),
            ?missing,
            "deriving missing portfolio aggregates from positions"
        );

        let derived = Portfolio::from_positions(self.portfolio.positions.clone());
        let portfolio = &mut self.portfolio;
        if missing.total_value {
            portfolio.total_value = derived.total_value;
        }
        if missing.average_duration {
            portfolio.average_duration = derived.average_duration;
        }
        if missing.average_yield {
            portfolio.average_yield = derived.average_yield;
        }
        if missing.average_rating {
            portfolio.average_rating = derived.average_rating;
        }
        if missing.weights {
            for (position, weighted) in portfolio.positions.iter_mut().zip(&derived.positions) {
                position.weight = weighted.weight;
            }
        }
    }

    /// Logs data quality issues and fills gaps that do not touch the
    /// portfolio aggregates.
    ///
    /// - an empty bond universe falls back to the held bonds
    /// - invalid bonds and positions are kept but reported via `tracing::warn!`
    /// - event histories are ordered newest first
    pub fn normalize(&mut self) {
        for position in &self.portfolio.positions {
            if let Err(e) = position.validate() {
                tracing::warn!(error = %e, "questionable position in dataset");
            }
        }

        if self.bonds.is_empty() {
            self.bonds = self.portfolio.bonds().cloned().collect();
        } else {
            for bond in &self.bonds {
                if let Err(e) = bond.validate() {
                    tracing::warn!(error = %e, "questionable bond in dataset");
                }
            }
        }

        self.transfer_events
            .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        self.pause_events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
}

/// Portfolio fields absent (or null) in a dataset document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct MissingAggregates {
    total_value: bool,
    average_duration: bool,
    average_yield: bool,
    average_rating: bool,
    weights: bool,
}

impl MissingAggregates {
    fn of(document: &serde_json::Value) -> Self {
        let portfolio = document.get("portfolio");
        let absent =
            |value: Option<&serde_json::Value>| value.map_or(true, serde_json::Value::is_null);
        let field = |key: &str| absent(portfolio.and_then(|p| p.get(key)));

        let weights = portfolio
            .and_then(|p| p.get("positions"))
            .and_then(serde_json::Value::as_array)
            .map_or(true, |positions| positions.iter().all(|p| absent(p.get("weight"))));

        Self {
            total_value: field("totalValue"),
            average_duration: field("averageDuration"),
            average_yield: field("averageYield"),
            average_rating: field("averageRating"),
            weights,
        }
    }

    fn is_none(&self) -> bool {
        *self == Self::default()
    }
}

impl DemoDataSource for DemoDataset {
    fn name(&self) -> &str {
        "dataset"
    }

    fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    fn token_holders(&self) -> &[TokenHolder] {
        &self.token_holders
    }

    fn compliance_rules(&self) -> &[ComplianceRule] {
        &self.compliance_rules
    }

    fn transfer_events(&self) -> &[TransferEvent] {
        &self.transfer_events
    }

    fn pause_events(&self) -> &[PauseEvent] {
        &self.pause_events
    }
}

// =============================================================================
// JSON FILE SOURCE
// =============================================================================

/// Dataset loaded from a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonDemoSource {
    path: PathBuf,
    label: String,
    dataset: DemoDataset,
}

impl JsonDemoSource {
    /// Loads a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> DemoDataResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| DemoDataError::io(path, e))?;
        let dataset =
            DemoDataset::parse_document(&content).map_err(|e| DemoDataError::parse(path, e))?;

        tracing::info!(
            path = %path.display(),
            positions = dataset.portfolio.len(),
            holders = dataset.token_holders.len(),
            "loaded dashboard data"
        );

        Ok(Self {
            path: path.to_path_buf(),
            label: format!("file:{}", path.display()),
            dataset,
        })
    }

    /// Re-reads the file, keeping the current data if loading fails.
    pub fn reload(&mut self) -> DemoDataResult<()> {
        let fresh = Self::from_path(&self.path)?;
        self.dataset = fresh.dataset;
        Ok(())
    }

    /// File this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The loaded dataset.
    #[must_use]
    pub fn dataset(&self) -> &DemoDataset {
        &self.dataset
    }
}

impl DemoDataSource for JsonDemoSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn portfolio(&self) -> &Portfolio {
        self.dataset.portfolio()
    }

    fn bonds(&self) -> &[Bond] {
        self.dataset.bonds()
    }

    fn token_holders(&self) -> &[TokenHolder] {
        self.dataset.token_holders()
    }

    fn compliance_rules(&self) -> &[ComplianceRule] {
        self.dataset.compliance_rules()
    }

    fn transfer_events(&self) -> &[TransferEvent] {
        self.dataset.transfer_events()
    }

    fn pause_events(&self) -> &[PauseEvent] {
        self.dataset.pause_events()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_document() {
        let dataset = DemoDataset::from_json_str("{}").unwrap();
        assert!(dataset.portfolio().is_empty());
        assert!(dataset.bonds().is_empty());
        assert!(dataset.token_holders().is_empty());
    }

    #[test]
    fn test_positions_only_document_derives_aggregates() {
        let dataset = DemoDataset::from_json_str(
            r#"{
                "portfolio": {
                    "positions": [
                        {"bond": {"id": "B1", "name": "One", "duration": 4}, "marketValue": 300},
                        {"bond": {"id": "B2", "name": "Two", "duration": 8}, "value": "100"}
                    ]
                }
            }"#,
        )
        .unwrap();

        let portfolio = dataset.portfolio();
        assert_eq!(portfolio.total_value, dec!(400));
        assert_eq!(portfolio.average_duration, 5.0);
        assert_eq!(dataset.bonds().len(), 2);
    }

    #[test]
    fn test_supplied_aggregates_are_kept() {
        let dataset = DemoDataset::from_json_str(
            r#"{
                "portfolio": {
                    "positions": [{"bond": {"id": "B1"}, "marketValue": 300}],
                    "totalValue": 1000,
                    "averageDuration": 6.5
                }
            }"#,
        )
        .unwrap();
        assert_eq!(dataset.portfolio().total_value, dec!(1000));
        assert_eq!(dataset.portfolio().average_duration, 6.5);
    }

    #[test]
    fn test_events_sorted_newest_first() {
        let dataset = DemoDataset::from_json_str(
            r#"{
                "transferEvents": [
                    {"id": "old", "timestamp": "2024-01-01T00:00:00Z"},
                    {"id": "new", "timestamp": "2024-06-01T00:00:00Z"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(dataset.transfer_events()[0].id, "new");
    }

    #[test]
    fn test_malformed_document() {
        assert!(matches!(
            DemoDataset::from_json_str("[1, 2"),
            Err(DemoDataError::Json(_))
        ));
    }
}
