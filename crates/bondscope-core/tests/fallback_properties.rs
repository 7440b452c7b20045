//! Property tests for the never-throw numeric layer.
//!
//! Any f64 (including NaN and infinities) or a missing value must produce a
//! well-formed string or a finite number.

use bondscope_core::prelude::*;
use proptest::prelude::*;

fn any_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(0.0),
        -1e12f64..1e12f64,
        any::<f64>(),
    ]
}

proptest! {
    #[test]
    fn formatters_never_panic(value in any_f64(), decimals in 0usize..20) {
        let fixed = format_fixed(value, decimals);
        prop_assert!(!fixed.contains("NaN") && !fixed.contains("inf"));

        let pct = format_percent(value, decimals);
        prop_assert!(pct == FALLBACK_NA || pct.ends_with('%'));

        let dur = format_duration(value, decimals);
        prop_assert!(dur == FALLBACK_NA || dur.ends_with('y'));

        let mm = format_millions(value);
        prop_assert!(mm.starts_with('$') && mm.ends_with('M'));
    }

    #[test]
    fn safe_accessors_are_total(a in any_f64(), b in any_f64()) {
        prop_assert!(safe_number(a).is_finite());
        prop_assert!(safe_ratio(a, b).is_finite());
        prop_assert!(safe_percentage(a, b).is_finite());
        prop_assert!(safe_mean([a, b]).is_finite());
        prop_assert!(round_to(a, 2).is_finite());
    }
}

#[test]
fn missing_values_use_documented_fallbacks() {
    let missing: Option<f64> = None;
    assert_eq!(format_fixed(missing, 1), "0.0");
    assert_eq!(format_percent(missing, 2), "N/A");
    assert_eq!(format_duration(missing, 2), "N/A");
    assert_eq!(format_millions(missing), "$0.0M");
    assert_eq!(format_yield(missing), "N/A");
}
