//! Total numeric accessors.
//!
//! Every function here is defined for every input: missing values, NaN and
//! infinities collapse to `0.0`, and divisions by zero return `0.0` instead of
//! NaN or infinity. Aggregation and display code reaches for these instead of
//! ad hoc inline guards.
//!
//! ```
//! use bondscope_core::safe::{safe_number, safe_percentage, safe_mean};
//!
//! assert_eq!(safe_number(f64::NAN), 0.0);
//! assert_eq!(safe_number(None::<f64>), 0.0);
//! assert_eq!(safe_percentage(25.0, 0.0), 0.0);
//! assert_eq!(safe_mean([2.0, f64::INFINITY, 4.0]), 2.0);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// A value that may or may not hold a usable finite number.
pub trait NumericInput {
    /// Returns the value as a finite `f64`, or `None` if it is missing or not finite.
    fn finite(&self) -> Option<f64>;
}

impl NumericInput for f64 {
    fn finite(&self) -> Option<f64> {
        self.is_finite().then_some(*self)
    }
}

impl NumericInput for f32 {
    fn finite(&self) -> Option<f64> {
        f64::from(*self).finite()
    }
}

impl NumericInput for i64 {
    fn finite(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl NumericInput for u32 {
    fn finite(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl NumericInput for usize {
    fn finite(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl NumericInput for Decimal {
    fn finite(&self) -> Option<f64> {
        self.to_f64()
    }
}

impl<T: NumericInput> NumericInput for Option<T> {
    fn finite(&self) -> Option<f64> {
        self.as_ref().and_then(NumericInput::finite)
    }
}

impl<T: NumericInput + ?Sized> NumericInput for &T {
    fn finite(&self) -> Option<f64> {
        (**self).finite()
    }
}

/// Returns the value, or `0.0` if it is missing or not finite.
#[must_use]
pub fn safe_number<T: NumericInput>(value: T) -> f64 {
    value.finite().unwrap_or(0.0)
}

/// Returns `numerator / denominator`, or `0.0` when either side is unusable or
/// the denominator is zero.
#[must_use]
pub fn safe_ratio<N: NumericInput, D: NumericInput>(numerator: N, denominator: D) -> f64 {
    match (numerator.finite(), denominator.finite()) {
        (Some(n), Some(d)) if d != 0.0 => {
            let ratio = n / d;
            if ratio.is_finite() {
                ratio
            } else {
                0.0
            }
        }
        _ => 0.0,
    }
}

/// Returns `part / total * 100`, or `0.0` when the total is zero or unusable.
#[must_use]
pub fn safe_percentage<P: NumericInput, T: NumericInput>(part: P, total: T) -> f64 {
    safe_number(safe_ratio(part, total) * 100.0)
}

/// Arithmetic mean where unusable entries count as `0.0`; empty input gives `0.0`.
#[must_use]
pub fn safe_mean<I>(values: I) -> f64
where
    I: IntoIterator,
    I::Item: NumericInput,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + safe_number(v), count + 1));
    if count == 0 {
        0.0
    } else {
        safe_number(sum / count as f64)
    }
}

/// Rounds to a fixed number of decimal places; unusable input rounds to `0.0`.
#[must_use]
pub fn round_to<T: NumericInput>(value: T, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals.min(15) as i32);
    let rounded = (safe_number(value) * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        0.0
    }
}

/// Lenient serde deserializers for source records.
///
/// Source data is hand-maintained demo JSON; `null`, missing and string-typed
/// numbers must load as values rather than abort the whole document.
pub mod de {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    #[allow(dead_code)]
    enum Loose {
        Number(f64),
        Text(String),
        Flag(bool),
    }

    fn loose_to_f64(value: Option<Loose>) -> f64 {
        match value {
            Some(Loose::Number(n)) if n.is_finite() => n,
            Some(Loose::Text(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Deserializes an `f64`, mapping null, non-numeric strings and other junk to `0.0`.
    pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(loose_to_f64(Option::<Loose>::deserialize(deserializer).unwrap_or(None)))
    }

    /// Deserializes a `Decimal`, mapping null and unparseable input to zero.
    pub fn lenient_decimal<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Decimal, D::Error> {
        let value = Option::<Loose>::deserialize(deserializer).unwrap_or(None);
        Ok(match value {
            Some(Loose::Text(s)) => s.trim().parse::<Decimal>().unwrap_or_default(),
            other => Decimal::try_from(loose_to_f64(other)).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde::Deserialize;

    #[test]
    fn test_safe_number() {
        assert_eq!(safe_number(3.5), 3.5);
        assert_eq!(safe_number(f64::NAN), 0.0);
        assert_eq!(safe_number(f64::NEG_INFINITY), 0.0);
        assert_eq!(safe_number(Some(2.0)), 2.0);
        assert_eq!(safe_number(None::<f64>), 0.0);
        assert_eq!(safe_number(dec!(1.25)), 1.25);
        assert_eq!(safe_number(&7.0), 7.0);
    }

    #[test]
    fn test_safe_ratio_and_percentage() {
        assert_eq!(safe_ratio(1.0, 4.0), 0.25);
        assert_eq!(safe_ratio(1.0, 0.0), 0.0);
        assert_eq!(safe_ratio(f64::NAN, 2.0), 0.0);
        assert_eq!(safe_ratio(f64::MAX, f64::MIN_POSITIVE), 0.0);
        assert_eq!(safe_percentage(dec!(25), dec!(200)), 12.5);
        assert_eq!(safe_percentage(dec!(25), Decimal::ZERO), 0.0);
    }

    #[test]
    fn test_safe_mean() {
        assert_eq!(safe_mean(Vec::<f64>::new()), 0.0);
        assert_eq!(safe_mean([1.0, 2.0, 3.0]), 2.0);
        assert_eq!(safe_mean([Some(4.0), None]), 2.0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.2345, 2), 1.23);
        assert_eq!(round_to(1.235, 1), 1.2);
        assert_eq!(round_to(f64::NAN, 2), 0.0);
        assert_eq!(round_to(None::<f64>, 1), 0.0);
    }

    #[derive(Deserialize)]
    struct Record {
        #[serde(default, deserialize_with = "de::lenient_f64")]
        duration: f64,
        #[serde(default, deserialize_with = "de::lenient_decimal")]
        value: Decimal,
    }

    #[test]
    fn test_lenient_deserializers() {
        let r: Record = serde_json::from_str(r#"{"duration": 4.5, "value": 1000}"#).unwrap();
        assert_eq!(r.duration, 4.5);
        assert_eq!(r.value, dec!(1000));

        let r: Record = serde_json::from_str(r#"{"duration": null, "value": "250.5"}"#).unwrap();
        assert_eq!(r.duration, 0.0);
        assert_eq!(r.value, dec!(250.5));

        let r: Record = serde_json::from_str(r#"{"duration": "abc", "value": true}"#).unwrap();
        assert_eq!(r.duration, 0.0);
        assert_eq!(r.value, Decimal::ZERO);

        let r: Record = serde_json::from_str("{}").unwrap();
        assert_eq!(r.duration, 0.0);
        assert_eq!(r.value, Decimal::ZERO);
    }
}
