//! Aggregation settings.

use serde::{Deserialize, Serialize};

/// How member bonds are weighted when averaging yield and duration inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeightingMethod {
    /// Every member counts once (plain arithmetic mean).
    #[default]
    EqualWeight,

    /// Members are weighted by market value.
    MarketValue,
}

impl WeightingMethod {
    /// Human-readable name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::EqualWeight => "Equal Weight",
            Self::MarketValue => "Market Value",
        }
    }
}

impl std::fmt::Display for WeightingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings for allocation grouping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Weighting for per-group average yield and duration.
    pub weighting: WeightingMethod,
}

impl AggregationConfig {
    /// Creates the default config (equal-weighted group averages).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weighting method.
    #[must_use]
    pub fn with_weighting(mut self, method: WeightingMethod) -> Self {
        self.weighting = method;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_equal_weight() {
        assert_eq!(AggregationConfig::default().weighting, WeightingMethod::EqualWeight);
    }

    #[test]
    fn test_serde() {
        let config = AggregationConfig::new().with_weighting(WeightingMethod::MarketValue);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"weighting":"market-value"}"#);
        let parsed: AggregationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, AggregationConfig::default());
    }
}
