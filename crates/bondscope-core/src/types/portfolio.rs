//! Positions and portfolios.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Bond, CreditRating};
use crate::error::{CoreError, CoreResult};
use crate::safe::{de, safe_number, safe_percentage, safe_ratio};

/// A holding of one bond at a current market value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Position {
    /// The bond held.
    pub bond: Bond,

    /// Current market value in the portfolio currency.
    #[serde(alias = "value", deserialize_with = "de::lenient_decimal")]
    pub market_value: Decimal,

    /// Portfolio weight in percent (derived by the source).
    #[serde(deserialize_with = "de::lenient_f64")]
    pub weight: f64,
}

impl Position {
    /// Creates a position with no weight assigned yet.
    #[must_use]
    pub fn new(bond: Bond, market_value: Decimal) -> Self {
        Self {
            bond,
            market_value,
            weight: 0.0,
        }
    }

    /// Market value as `f64` (0 if unrepresentable).
    #[must_use]
    pub fn market_value_f64(&self) -> f64 {
        safe_number(self.market_value)
    }

    /// Checks the position for values the analytics will have to paper over.
    pub fn validate(&self) -> CoreResult<()> {
        self.bond.validate()?;
        if self.market_value.is_sign_negative() && !self.market_value.is_zero() {
            return Err(CoreError::invalid_position(
                &self.bond.id,
                format!("negative market value {}", self.market_value),
            ));
        }
        Ok(())
    }
}

/// Ordered positions plus aggregates precomputed by the data source.
///
/// Grouped views never recompute `total_value`; percentages are always taken
/// against the value supplied here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Portfolio {
    /// Positions in source order.
    pub positions: Vec<Position>,

    /// Total market value.
    #[serde(deserialize_with = "de::lenient_decimal")]
    pub total_value: Decimal,

    /// Average duration in years.
    #[serde(deserialize_with = "de::lenient_f64")]
    pub average_duration: f64,

    /// Average yield in percent.
    #[serde(deserialize_with = "de::lenient_f64")]
    pub average_yield: f64,

    /// Average credit rating.
    pub average_rating: CreditRating,
}

impl Portfolio {
    /// Builds a portfolio from positions, deriving weights and aggregates.
    ///
    /// Averages are market-value weighted. The average rating is the notch
    /// closest to the value-weighted mean rating score over rated bonds.
    #[must_use]
    pub fn from_positions(positions: Vec<Position>) -> Self {
        let total_value: Decimal = positions.iter().map(|p| p.market_value).sum();
        let total = safe_number(total_value);

        let positions: Vec<Position> = positions
            .into_iter()
            .map(|mut p| {
                p.weight = safe_percentage(p.market_value, total_value);
                p
            })
            .collect();

        let weighted = |f: fn(&Bond) -> f64| {
            let sum: f64 = positions
                .iter()
                .map(|p| safe_number(f(&p.bond)) * p.market_value_f64())
                .sum();
            safe_ratio(sum, total)
        };
        let average_duration = weighted(|b: &Bond| b.duration);
        let average_yield = weighted(|b: &Bond| b.yield_to_maturity);

        let (score_sum, score_weight) = positions
            .iter()
            .filter(|p| p.bond.rating != CreditRating::NotRated)
            .fold((0.0, 0.0), |(sum, w), p| {
                let mv = p.market_value_f64();
                (sum + f64::from(p.bond.rating.score()) * mv, w + mv)
            });
        let average_rating = if score_weight > 0.0 {
            nearest_rating(score_sum / score_weight)
        } else {
            CreditRating::NotRated
        };

        Self {
            positions,
            total_value,
            average_duration,
            average_yield,
            average_rating,
        }
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the portfolio holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Sum of position market values (may differ from `total_value` if the
    /// source aggregates are stale).
    #[must_use]
    pub fn positions_value(&self) -> Decimal {
        self.positions.iter().map(|p| p.market_value).sum()
    }

    /// Iterates the bonds held, in position order.
    pub fn bonds(&self) -> impl Iterator<Item = &Bond> {
        self.positions.iter().map(|p| &p.bond)
    }

    /// Finds a position by bond identifier.
    #[must_use]
    pub fn position(&self, bond_id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.bond.id == bond_id)
    }
}

fn nearest_rating(score: f64) -> CreditRating {
    CreditRating::all()
        .filter(|r| *r != CreditRating::NotRated)
        .min_by(|a, b| {
            let da = (f64::from(a.score()) - score).abs();
            let db = (f64::from(b.score()) - score).abs();
            da.total_cmp(&db)
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rust_decimal_macros::dec;

    fn bond(id: &str, rating: CreditRating, duration: f64, ytm: f64) -> Bond {
        Bond::new(id, id)
            .with_rating(rating)
            .with_duration(duration)
            .with_yield(ytm)
    }

    #[test]
    fn test_from_positions() {
        let portfolio = Portfolio::from_positions(vec![
            Position::new(bond("B1", CreditRating::AAA, 2.0, 3.0), dec!(300)),
            Position::new(bond("B2", CreditRating::BBB, 6.0, 5.0), dec!(100)),
        ]);

        assert_eq!(portfolio.total_value, dec!(400));
        assert_relative_eq!(portfolio.positions[0].weight, 75.0);
        assert_relative_eq!(portfolio.positions[1].weight, 25.0);
        assert_relative_eq!(portfolio.average_duration, 3.0);
        assert_relative_eq!(portfolio.average_yield, 3.5);
        // (1 * 300 + 9 * 100) / 400 = 3.0 -> AA
        assert_eq!(portfolio.average_rating, CreditRating::AA);
    }

    #[test]
    fn test_from_positions_empty() {
        let portfolio = Portfolio::from_positions(vec![]);
        assert!(portfolio.is_empty());
        assert_eq!(portfolio.total_value, Decimal::ZERO);
        assert_eq!(portfolio.average_duration, 0.0);
        assert_eq!(portfolio.average_rating, CreditRating::NotRated);
    }

    #[test]
    fn test_zero_value_positions() {
        let portfolio = Portfolio::from_positions(vec![Position::new(
            bond("B1", CreditRating::A, 4.0, 4.0),
            Decimal::ZERO,
        )]);
        assert_eq!(portfolio.positions[0].weight, 0.0);
        assert_eq!(portfolio.average_yield, 0.0);
    }

    #[test]
    fn test_position_lookup() {
        let portfolio = Portfolio::from_positions(vec![Position::new(
            bond("B1", CreditRating::A, 4.0, 4.0),
            dec!(10),
        )]);
        assert!(portfolio.position("B1").is_some());
        assert!(portfolio.position("B9").is_none());
        assert_eq!(portfolio.bonds().count(), 1);
    }

    #[test]
    fn test_position_validate() {
        let p = Position::new(bond("B1", CreditRating::A, 1.0, 1.0), dec!(-5));
        assert!(p.validate().is_err());
        let p = Position::new(bond("B1", CreditRating::A, 1.0, 1.0), dec!(5));
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_deserialize_missing_positions() {
        let portfolio: Portfolio =
            serde_json::from_str(r#"{"totalValue": 1000, "averageRating": "A"}"#).unwrap();
        assert!(portfolio.is_empty());
        assert_eq!(portfolio.total_value, dec!(1000));
        assert_eq!(portfolio.average_rating, CreditRating::A);
    }

    #[test]
    fn test_deserialize_position_value_alias() {
        let position: Position = serde_json::from_str(
            r#"{"bond": {"id": "B1", "sector": "Energy"}, "value": 2500000}"#,
        )
        .unwrap();
        assert_eq!(position.market_value, dec!(2500000));
        assert_eq!(position.bond.sector, "Energy");
        assert_eq!(position.weight, 0.0);
    }
}
