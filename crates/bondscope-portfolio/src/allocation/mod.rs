//! Portfolio allocation views.
//!
//! Partitions a portfolio along one [`Dimension`] and reduces each partition
//! into an [`AllocationGroup`]:
//!
//! - **Sector / Issuer**: the bond field verbatim (blank -> `"Unknown"`)
//! - **Rating**: the S&P notation of the composite rating (`"NR"` if unrated)
//! - **Duration bucket**: one of four fixed [`DurationBucket`]s
//!
//! Every position lands in exactly one group, group values sum to the
//! portfolio's position value, and the output is sorted by value descending
//! with ties in first-encountered order.
//!
//! # Example
//!
//! ```rust
//! use bondscope_core::prelude::*;
//! use bondscope_portfolio::allocation::{aggregate, Dimension};
//!
//! let portfolio = Portfolio::from_positions(vec![
//!     Position::new(Bond::new("B1", "One").with_sector("Energy"), dec!(300)),
//!     Position::new(Bond::new("B2", "Two").with_sector("Government"), dec!(700)),
//! ]);
//!
//! let groups = aggregate(&portfolio, Dimension::Sector);
//! assert_eq!(groups[0].key, "Government");
//! assert!((groups[0].percentage - 70.0).abs() < 1e-9);
//! ```

mod duration;
mod group;

pub use duration::DurationBucket;
pub use group::AllocationGroup;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{self, Rgb};
use crate::config::AggregationConfig;
use crate::error::PortfolioError;
use bondscope_core::{CreditRating, Portfolio, Position};
use group::group_positions;

/// Fallback key for blank sector or issuer fields.
pub const UNKNOWN_KEY: &str = "Unknown";

/// Grouping axis for an allocation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    /// Issuer sector.
    Sector,
    /// Composite credit rating.
    Rating,
    /// Duration bucket.
    DurationBucket,
    /// Issuer name.
    Issuer,
}

impl Dimension {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sector => "Sector",
            Self::Rating => "Rating",
            Self::DurationBucket => "Duration",
            Self::Issuer => "Issuer",
        }
    }

    /// All dimensions.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Sector, Self::Rating, Self::DurationBucket, Self::Issuer]
    }

    /// Group key for a position along this dimension.
    #[must_use]
    pub fn key_for(&self, position: &Position) -> String {
        let bond = &position.bond;
        match self {
            Self::Sector => verbatim_or_unknown(&bond.sector),
            Self::Issuer => verbatim_or_unknown(&bond.issuer),
            Self::Rating => bond.rating.sp_notation().to_string(),
            Self::DurationBucket => DurationBucket::from_duration(bond.duration).label().to_string(),
        }
    }

    /// Chart color for a group key along this dimension.
    #[must_use]
    pub fn color_for(&self, key: &str) -> Rgb {
        match self {
            Self::Sector => color::sector_color(key),
            Self::Issuer => color::issuer_color(key),
            Self::Rating => CreditRating::parse(key).map_or(color::FALLBACK, rating_color),
            Self::DurationBucket => {
                DurationBucket::from_label(key).map_or(color::FALLBACK, |b| b.color())
            }
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Dimension {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sector" | "sectors" => Ok(Self::Sector),
            "rating" | "ratings" | "credit" => Ok(Self::Rating),
            "duration" | "duration-bucket" | "duration_bucket" => Ok(Self::DurationBucket),
            "issuer" | "issuers" => Ok(Self::Issuer),
            other => Err(PortfolioError::UnknownDimension(other.to_string())),
        }
    }
}

fn verbatim_or_unknown(field: &str) -> String {
    if field.trim().is_empty() {
        UNKNOWN_KEY.to_string()
    } else {
        field.to_string()
    }
}

/// Fixed palette for credit ratings, by letter bucket.
#[must_use]
pub fn rating_color(rating: CreditRating) -> Rgb {
    use bondscope_core::RatingBucket;

    match rating.bucket() {
        RatingBucket::AAA => Rgb::new(0x10, 0xb9, 0x81),
        RatingBucket::AA => Rgb::new(0x34, 0xd3, 0x99),
        RatingBucket::A => Rgb::new(0x60, 0xa5, 0xfa),
        RatingBucket::BBB => Rgb::new(0xfb, 0xbf, 0x24),
        RatingBucket::BB => Rgb::new(0xf9, 0x73, 0x16),
        RatingBucket::B => Rgb::new(0xef, 0x44, 0x44),
        RatingBucket::CCC => Rgb::new(0xb9, 0x1c, 0x1c),
        RatingBucket::Default => Rgb::new(0x7f, 0x1d, 0x1d),
        RatingBucket::NotRated => color::FALLBACK,
    }
}

/// Groups a portfolio along `dimension` with default settings.
///
/// Returns an empty vector for a portfolio without positions. Never fails.
#[must_use]
pub fn aggregate(portfolio: &Portfolio, dimension: Dimension) -> Vec<AllocationGroup> {
    aggregate_with(portfolio, dimension, &AggregationConfig::default())
}

/// Groups a portfolio along `dimension` using explicit settings.
#[must_use]
pub fn aggregate_with(
    portfolio: &Portfolio,
    dimension: Dimension,
    config: &AggregationConfig,
) -> Vec<AllocationGroup> {
    let groups = group_positions(
        portfolio,
        |p| dimension.key_for(p),
        |key| dimension.color_for(key),
        config,
    );
    tracing::debug!(
        dimension = dimension.label(),
        positions = portfolio.len(),
        groups = groups.len(),
        "aggregated portfolio"
    );
    groups
}

/// Allocation along every dimension at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationBreakdown {
    /// By sector.
    pub by_sector: Vec<AllocationGroup>,
    /// By credit rating.
    pub by_rating: Vec<AllocationGroup>,
    /// By duration bucket.
    pub by_duration: Vec<AllocationGroup>,
    /// By issuer.
    pub by_issuer: Vec<AllocationGroup>,
}

impl AllocationBreakdown {
    /// Groups for one dimension.
    #[must_use]
    pub fn get(&self, dimension: Dimension) -> &[AllocationGroup] {
        match dimension {
            Dimension::Sector => &self.by_sector,
            Dimension::Rating => &self.by_rating,
            Dimension::DurationBucket => &self.by_duration,
            Dimension::Issuer => &self.by_issuer,
        }
    }

    /// Largest group along a dimension.
    #[must_use]
    pub fn largest(&self, dimension: Dimension) -> Option<&AllocationGroup> {
        self.get(dimension).first()
    }
}

/// Computes all four allocation views.
#[must_use]
pub fn aggregate_all(portfolio: &Portfolio, config: &AggregationConfig) -> AllocationBreakdown {
    AllocationBreakdown {
        by_sector: aggregate_with(portfolio, Dimension::Sector, config),
        by_rating: aggregate_with(portfolio, Dimension::Rating, config),
        by_duration: aggregate_with(portfolio, Dimension::DurationBucket, config),
        by_issuer: aggregate_with(portfolio, Dimension::Issuer, config),
    }
}

/// Group key for tokenized bonds in [`tokenization_split`].
pub const TOKENIZED_KEY: &str = "Tokenized";
/// Group key for conventional bonds in [`tokenization_split`].
pub const TRADITIONAL_KEY: &str = "Traditional";

/// Splits the portfolio into tokenized and traditional bonds.
#[must_use]
pub fn tokenization_split(
    portfolio: &Portfolio,
    config: &AggregationConfig,
) -> Vec<AllocationGroup> {
    group_positions(
        portfolio,
        |p| {
            if p.bond.tokenized {
                TOKENIZED_KEY.to_string()
            } else {
                TRADITIONAL_KEY.to_string()
            }
        },
        |key| {
            if key == TOKENIZED_KEY {
                Rgb::new(0x8b, 0x5c, 0xf6)
            } else {
                Rgb::new(0x64, 0x74, 0x8b)
            }
        },
        config,
    )
}
