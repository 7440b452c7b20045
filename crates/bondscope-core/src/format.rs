//! Display formatting for dashboard figures.
//!
//! Formatters accept anything implementing [`NumericInput`] and never panic.
//! Fallbacks when the input is missing, NaN or infinite:
//!
//! | formatter | example | fallback |
//! |---|---|---|
//! | [`format_fixed`] | `"5.20"` | zero at the requested precision (`"0.0"`) |
//! | [`format_millions`] | `"$12.3M"` | `"$0.0M"` |
//! | [`format_percent`] | `"12.34%"` | [`FALLBACK_NA`] |
//! | [`format_duration`] | `"5.2y"` | [`FALLBACK_NA`] |
//! | [`format_yield`] | `"4.25%"` | [`FALLBACK_NA`] |

use crate::safe::NumericInput;

/// Placeholder rendered for values that cannot be shown.
pub const FALLBACK_NA: &str = "N/A";

const MAX_DECIMALS: usize = 10;

/// Fixed-point rendering; unusable input renders as zero.
///
/// ```
/// use bondscope_core::format::format_fixed;
///
/// assert_eq!(format_fixed(3.14159, 2), "3.14");
/// assert_eq!(format_fixed(f64::NAN, 1), "0.0");
/// assert_eq!(format_fixed(None::<f64>, 0), "0");
/// ```
#[must_use]
pub fn format_fixed<T: NumericInput>(value: T, decimals: usize) -> String {
    let decimals = decimals.min(MAX_DECIMALS);
    format!("{:.*}", decimals, normalize_zero(value.finite().unwrap_or(0.0), decimals))
}

/// Currency in millions to one decimal place.
///
/// ```
/// use bondscope_core::format::format_millions;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_millions(dec!(12_345_678)), "$12.3M");
/// assert_eq!(format_millions(f64::INFINITY), "$0.0M");
/// ```
#[must_use]
pub fn format_millions<T: NumericInput>(value: T) -> String {
    let millions = value.finite().map_or(0.0, |v| v / 1_000_000.0);
    format!("${}M", format_fixed(millions, 1))
}

/// Percentage with a suffix; unusable input renders as [`FALLBACK_NA`].
#[must_use]
pub fn format_percent<T: NumericInput>(value: T, decimals: usize) -> String {
    value
        .finite()
        .map_or_else(|| FALLBACK_NA.to_string(), |v| format!("{}%", format_fixed(v, decimals)))
}

/// Duration in years with a `y` suffix; unusable input renders as [`FALLBACK_NA`].
#[must_use]
pub fn format_duration<T: NumericInput>(value: T, decimals: usize) -> String {
    value
        .finite()
        .map_or_else(|| FALLBACK_NA.to_string(), |v| format!("{}y", format_fixed(v, decimals)))
}

/// Yield in percent to two decimals.
#[must_use]
pub fn format_yield<T: NumericInput>(value: T) -> String {
    format_percent(value, 2)
}

/// Avoids rendering "-0.0" for tiny negatives that round to zero.
fn normalize_zero(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    if (value * factor).round() == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(5.2, 2), "5.20");
        assert_eq!(format_fixed(dec!(1.26), 1), "1.3");
        assert_eq!(format_fixed(-0.0001, 2), "0.00");
        assert_eq!(format_fixed(f64::NAN, 1), "0.0");
        assert_eq!(format_fixed(None::<f64>, 2), "0.00");
    }

    #[test]
    fn test_format_millions() {
        assert_eq!(format_millions(dec!(2_500_000)), "$2.5M");
        assert_eq!(format_millions(940_000.0), "$0.9M");
        assert_eq!(format_millions(None::<f64>), "$0.0M");
        assert_eq!(format_millions(f64::NAN), "$0.0M");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.346, 2), "12.35%");
        assert_eq!(format_percent(40.0, 1), "40.0%");
        assert_eq!(format_percent(f64::NAN, 1), FALLBACK_NA);
        assert_eq!(format_percent(None::<f64>, 1), FALLBACK_NA);
    }

    #[test]
    fn test_format_duration_and_yield() {
        assert_eq!(format_duration(6.78, 1), "6.8y");
        assert_eq!(format_duration(None::<f64>, 1), FALLBACK_NA);
        assert_eq!(format_yield(4.1), "4.10%");
        assert_eq!(format_yield(f64::INFINITY), FALLBACK_NA);
    }

    #[test]
    fn test_excess_precision_is_capped() {
        assert_eq!(format_fixed(1.0, 50).len(), "1.".len() + MAX_DECIMALS);
    }
}
