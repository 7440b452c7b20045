//! Tier boundaries and heatmap parameters.

use serde::{Deserialize, Serialize};

use bondscope_core::RatingBucket;

/// Inclusive upper bounds for the five-tier scales.
///
/// A value `v` is `VeryLow` when `v <= very_low`, `Low` when `v <= low`, and
/// so on; anything above `high` is `VeryHigh`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Upper bound of `VeryLow`.
    pub very_low: f64,
    /// Upper bound of `Low`.
    pub low: f64,
    /// Upper bound of `Medium`.
    pub medium: f64,
    /// Upper bound of `High`.
    pub high: f64,
}

impl TierLimits {
    /// Creates limits from the four inclusive bounds.
    #[must_use]
    pub const fn new(very_low: f64, low: f64, medium: f64, high: f64) -> Self {
        Self {
            very_low,
            low,
            medium,
            high,
        }
    }

    /// Bounds in ascending order.
    #[must_use]
    pub fn as_array(&self) -> [f64; 4] {
        [self.very_low, self.low, self.medium, self.high]
    }

    /// True if every bound is finite and strictly increasing.
    #[must_use]
    pub fn is_ascending(&self) -> bool {
        let bounds = self.as_array();
        bounds.iter().all(|b| b.is_finite()) && bounds.windows(2).all(|w| w[0] < w[1])
    }
}

/// Exclusive upper bounds for the three-band heatmap score.
///
/// `score < low` is Low, `score < medium` is Medium, anything else High.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBands {
    /// Scores below this are Low.
    pub low: f64,
    /// Scores below this (and not Low) are Medium.
    pub medium: f64,
}

impl ScoreBands {
    /// True if both bounds are finite and `low < medium`.
    #[must_use]
    pub fn is_ascending(&self) -> bool {
        self.low.is_finite() && self.medium.is_finite() && self.low < self.medium
    }
}

/// Thresholds for every risk metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Duration in years.
    pub duration: TierLimits,

    /// Credit rating numeric score (1 = AAA .. 22 = D, 99 = NR).
    pub rating: TierLimits,

    /// Heatmap cell score (0-100).
    pub heatmap: ScoreBands,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            duration: TierLimits::new(2.0, 4.0, 7.0, 10.0),
            // AA- / A- / BBB- / BB-
            rating: TierLimits::new(4.0, 7.0, 10.0, 13.0),
            heatmap: ScoreBands {
                low: 20.0,
                medium: 50.0,
            },
        }
    }
}

impl RiskThresholds {
    /// Overrides the duration limits.
    #[must_use]
    pub fn with_duration(mut self, limits: TierLimits) -> Self {
        self.duration = limits;
        self
    }

    /// Overrides the heatmap score bands.
    #[must_use]
    pub fn with_heatmap(mut self, bands: ScoreBands) -> Self {
        self.heatmap = bands;
        self
    }
}

/// Parameters for the sector x rating heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Rating columns, best to worst. Position in this list drives rating risk.
    pub rating_ladder: Vec<RatingBucket>,

    /// Cell percentage above which concentration risk is amplified.
    pub concentration_threshold: f64,

    /// Multiplier applied to concentrations above the threshold.
    pub concentration_multiplier: f64,

    /// Rating risk added per step down the ladder.
    pub rating_step: f64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            rating_ladder: vec![
                RatingBucket::AAA,
                RatingBucket::AA,
                RatingBucket::A,
                RatingBucket::BBB,
            ],
            concentration_threshold: 15.0,
            concentration_multiplier: 2.0,
            rating_step: 10.0,
        }
    }
}

impl HeatmapConfig {
    /// Replaces the rating ladder.
    #[must_use]
    pub fn with_ladder(mut self, ladder: Vec<RatingBucket>) -> Self {
        self.rating_ladder = ladder;
        self
    }

    /// Index of a bucket on the ladder.
    #[must_use]
    pub fn ladder_index(&self, bucket: RatingBucket) -> Option<usize> {
        self.rating_ladder.iter().position(|b| *b == bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_ascending() {
        let thresholds = RiskThresholds::default();
        assert!(thresholds.duration.is_ascending());
        assert!(thresholds.rating.is_ascending());
        assert!(thresholds.heatmap.is_ascending());
    }

    #[test]
    fn test_non_ascending_detected() {
        assert!(!TierLimits::new(2.0, 2.0, 7.0, 10.0).is_ascending());
        assert!(!TierLimits::new(2.0, f64::NAN, 7.0, 10.0).is_ascending());
        assert!(!ScoreBands { low: 50.0, medium: 20.0 }.is_ascending());
    }

    #[test]
    fn test_ladder_index() {
        let config = HeatmapConfig::default();
        assert_eq!(config.ladder_index(RatingBucket::AAA), Some(0));
        assert_eq!(config.ladder_index(RatingBucket::A), Some(2));
        assert_eq!(config.ladder_index(RatingBucket::BB), None);
    }

    #[test]
    fn test_partial_toml_like_json_uses_defaults() {
        let config: HeatmapConfig = serde_json::from_str(r#"{"rating_step": 5.0}"#).unwrap();
        assert_eq!(config.rating_step, 5.0);
        assert_eq!(config.rating_ladder.len(), 4);
    }
}
