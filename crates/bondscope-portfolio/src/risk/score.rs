//! Heatmap cell scoring and the score color ramp.

use crate::color::Rgb;
use bondscope_core::safe::safe_number;

const RAMP_LOW: Rgb = Rgb::new(34, 197, 94);
const RAMP_MID: Rgb = Rgb::new(245, 158, 11);
const RAMP_HIGH: Rgb = Rgb::new(250, 40, 40);

/// Color for a 0-100 risk score: green through amber to red.
///
/// Input is clamped to [0, 100]; non-finite scores render as 0. The red
/// channel never decreases and the green channel never increases along the
/// ramp, so a higher score is always at least as hot.
///
/// # Examples
///
/// ```rust
/// use bondscope_portfolio::risk::color_for_score;
///
/// assert_eq!(color_for_score(0.0).to_string(), "#22c55e");
/// assert_eq!(color_for_score(f64::NAN), color_for_score(0.0));
/// assert_eq!(color_for_score(500.0), color_for_score(100.0));
/// ```
#[must_use]
pub fn color_for_score(score: f64) -> Rgb {
    let score = safe_number(score).clamp(0.0, 100.0);
    if score <= 50.0 {
        RAMP_LOW.lerp(RAMP_MID, score / 50.0)
    } else {
        RAMP_MID.lerp(RAMP_HIGH, (score - 50.0) / 50.0)
    }
}

/// Rating component of a cell score.
///
/// `index` is the cell's position on a best-to-worst ladder; each step down
/// adds `step`, so the best rating scores `step` and worse ratings score higher.
#[must_use]
pub fn rating_risk(index: usize, step: f64) -> f64 {
    (index as f64 + 1.0) * safe_number(step)
}

/// Concentration component of a cell score: the percentage itself, multiplied
/// once it exceeds `threshold`.
#[must_use]
pub fn concentration_risk(percentage: f64, threshold: f64, multiplier: f64) -> f64 {
    let pct = safe_number(percentage);
    if pct > threshold {
        pct * safe_number(multiplier)
    } else {
        pct
    }
}

/// Mean of the two components, clamped to [0, 100].
#[must_use]
pub fn heatmap_score(rating_risk: f64, concentration_risk: f64) -> f64 {
    let raw = (safe_number(rating_risk) + safe_number(concentration_risk)) / 2.0;
    safe_number(raw).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(color_for_score(0.0), RAMP_LOW);
        assert_eq!(color_for_score(50.0), RAMP_MID);
        assert_eq!(color_for_score(100.0), RAMP_HIGH);
        assert_eq!(color_for_score(-10.0), RAMP_LOW);
        assert_eq!(color_for_score(f64::INFINITY), RAMP_LOW);
    }

    #[test]
    fn test_ramp_is_monotonic() {
        let colors: Vec<Rgb> = (0..=100).map(|s| color_for_score(f64::from(s))).collect();
        for pair in colors.windows(2) {
            assert!(pair[0].r <= pair[1].r);
            assert!(pair[0].g >= pair[1].g);
        }
    }

    #[test]
    fn test_rating_risk_grows_down_the_ladder() {
        assert_relative_eq!(rating_risk(0, 10.0), 10.0);
        assert_relative_eq!(rating_risk(2, 10.0), 30.0);
        assert!(rating_risk(3, 10.0) > rating_risk(2, 10.0));
    }

    #[test]
    fn test_concentration_doubling() {
        assert_relative_eq!(concentration_risk(15.0, 15.0, 2.0), 15.0);
        assert_relative_eq!(concentration_risk(20.0, 15.0, 2.0), 40.0);
        assert_relative_eq!(concentration_risk(f64::NAN, 15.0, 2.0), 0.0);
    }

    #[test]
    fn test_score_clamped() {
        assert_relative_eq!(heatmap_score(30.0, 40.0), 35.0);
        assert_relative_eq!(heatmap_score(40.0, 200.0), 100.0);
        assert_relative_eq!(heatmap_score(-50.0, 0.0), 0.0);
        assert_relative_eq!(heatmap_score(f64::NAN, f64::NAN), 0.0);
    }
}
