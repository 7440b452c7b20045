//! Duration bucket classification.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use bondscope_core::safe::safe_number;

/// Duration buckets used by the duration allocation view.
///
/// Each threshold belongs to the lower bucket: exactly 3.0 years is Short,
/// exactly 7.0 is Medium, exactly 15.0 is Long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DurationBucket {
    /// [0, 3] years
    Short,
    /// (3, 7] years
    Medium,
    /// (7, 15] years
    Long,
    /// Over 15 years
    VeryLong,
}

impl DurationBucket {
    /// Classify a duration in years. Missing, negative or non-finite values count as 0.
    #[must_use]
    pub fn from_duration(years: f64) -> Self {
        let years = safe_number(years).max(0.0);
        if years <= 3.0 {
            Self::Short
        } else if years <= 7.0 {
            Self::Medium
        } else if years <= 15.0 {
            Self::Long
        } else {
            Self::VeryLong
        }
    }

    /// Display label, also used as the allocation group key.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Short => "Short (0-3Y)",
            Self::Medium => "Medium (3-7Y)",
            Self::Long => "Long (7-15Y)",
            Self::VeryLong => "Very Long (15Y+)",
        }
    }

    /// Reverse lookup from a label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().iter().copied().find(|b| b.label() == label)
    }

    /// Ramp color: longer duration, hotter color.
    #[must_use]
    pub fn color(&self) -> Rgb {
        match self {
            Self::Short => Rgb::new(0x22, 0xc5, 0x5e),
            Self::Medium => Rgb::new(0xea, 0xb3, 0x08),
            Self::Long => Rgb::new(0xf9, 0x73, 0x16),
            Self::VeryLong => Rgb::new(0xfb, 0x44, 0x44),
        }
    }

    /// All buckets, shortest first.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Short, Self::Medium, Self::Long, Self::VeryLong]
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
