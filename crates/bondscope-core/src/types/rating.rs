//! Credit rating scale.
//!
//! Ratings are ordered from best (AAA) to worst (D); `NotRated` sorts last.
//! Deserialization is lenient: anything unrecognised becomes `NotRated` so a
//! single bad record never blocks a dashboard load.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Normalized credit rating (agency-agnostic, S&P-style notches).
///
/// # Examples
///
/// ```
/// use bondscope_core::CreditRating;
///
/// let rating: CreditRating = "Baa1".parse().unwrap();
/// assert_eq!(rating, CreditRating::BBBPlus);
/// assert!(rating.is_investment_grade());
/// assert!(CreditRating::AAA < CreditRating::BBB);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[allow(missing_docs)]
pub enum CreditRating {
    AAA = 1,
    AAPlus = 2,
    AA = 3,
    AAMinus = 4,
    APlus = 5,
    A = 6,
    AMinus = 7,
    BBBPlus = 8,
    BBB = 9,
    /// Lowest investment grade notch.
    BBBMinus = 10,
    BBPlus = 11,
    BB = 12,
    BBMinus = 13,
    BPlus = 14,
    B = 15,
    BMinus = 16,
    CCCPlus = 17,
    CCC = 18,
    CCCMinus = 19,
    CC = 20,
    C = 21,
    /// Default.
    D = 22,
    /// Missing or unrecognised rating.
    #[default]
    NotRated = 99,
}

/// (rating, S&P notation, Moody's notation), best to worst.
const NOTATIONS: [(CreditRating, &str, &str); 23] = [
    (CreditRating::AAA, "AAA", "Aaa"),
    (CreditRating::AAPlus, "AA+", "Aa1"),
    (CreditRating::AA, "AA", "Aa2"),
    (CreditRating::AAMinus, "AA-", "Aa3"),
    (CreditRating::APlus, "A+", "A1"),
    (CreditRating::A, "A", "A2"),
    (CreditRating::AMinus, "A-", "A3"),
    (CreditRating::BBBPlus, "BBB+", "Baa1"),
    (CreditRating::BBB, "BBB", "Baa2"),
    (CreditRating::BBBMinus, "BBB-", "Baa3"),
    (CreditRating::BBPlus, "BB+", "Ba1"),
    (CreditRating::BB, "BB", "Ba2"),
    (CreditRating::BBMinus, "BB-", "Ba3"),
    (CreditRating::BPlus, "B+", "B1"),
    (CreditRating::B, "B", "B2"),
    (CreditRating::BMinus, "B-", "B3"),
    (CreditRating::CCCPlus, "CCC+", "Caa1"),
    (CreditRating::CCC, "CCC", "Caa2"),
    (CreditRating::CCCMinus, "CCC-", "Caa3"),
    (CreditRating::CC, "CC", "Ca"),
    (CreditRating::C, "C", "C"),
    (CreditRating::D, "D", "D"),
    (CreditRating::NotRated, "NR", "NR"),
];

impl CreditRating {
    /// Numeric score, 1 = AAA through 22 = D, 99 = not rated.
    #[must_use]
    pub fn score(&self) -> u8 {
        *self as u8
    }

    /// Returns true for BBB- or better.
    #[must_use]
    pub fn is_investment_grade(&self) -> bool {
        *self <= Self::BBBMinus
    }

    /// Returns true for BB+ through C.
    #[must_use]
    pub fn is_high_yield(&self) -> bool {
        (Self::BBPlus..=Self::C).contains(self)
    }

    /// Collapses notches into their letter bucket (AA+, AA, AA- -> AA).
    #[must_use]
    pub fn bucket(&self) -> RatingBucket {
        match self.score() {
            1 => RatingBucket::AAA,
            2..=4 => RatingBucket::AA,
            5..=7 => RatingBucket::A,
            8..=10 => RatingBucket::BBB,
            11..=13 => RatingBucket::BB,
            14..=16 => RatingBucket::B,
            17..=21 => RatingBucket::CCC,
            22 => RatingBucket::Default,
            _ => RatingBucket::NotRated,
        }
    }

    fn notations(&self) -> (&'static str, &'static str) {
        NOTATIONS
            .iter()
            .find(|(rating, _, _)| rating == self)
            .map_or(("NR", "NR"), |(_, sp, moodys)| (*sp, *moodys))
    }

    /// S&P-style notation, used as the grouping key for rating allocations.
    #[must_use]
    pub fn sp_notation(&self) -> &'static str {
        self.notations().0
    }

    /// Moody's-style notation.
    #[must_use]
    pub fn moodys_notation(&self) -> &'static str {
        self.notations().1
    }

    /// Parses S&P or Moody's notation. S&P notation is matched case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some((rating, _, _)) = NOTATIONS
            .iter()
            .find(|(_, sp, moodys)| *sp == s || *moodys == s)
        {
            return Some(*rating);
        }

        let upper = s.to_uppercase();
        match upper.as_str() {
            "NOT RATED" | "NOTRATED" | "N/A" => Some(Self::NotRated),
            _ => NOTATIONS
                .iter()
                .find(|(_, sp, _)| *sp == upper)
                .map(|(rating, _, _)| *rating),
        }
    }

    /// Parses a rating, falling back to `NotRated` for anything unrecognised.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            tracing::warn!(rating = s, "unrecognised credit rating, treating as NR");
            Self::NotRated
        })
    }

    /// All ratings from best to worst, `NotRated` last.
    #[must_use]
    pub fn all() -> impl Iterator<Item = Self> {
        NOTATIONS.iter().map(|(rating, _, _)| *rating)
    }
}

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sp_notation())
    }
}

impl FromStr for CreditRating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| CoreError::InvalidRating(s.to_string()))
    }
}

impl Serialize for CreditRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.sp_notation())
    }
}

impl<'de> Deserialize<'de> for CreditRating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse_lenient).unwrap_or_default())
    }
}

/// Letter-level rating bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum RatingBucket {
    AAA,
    AA,
    A,
    BBB,
    BB,
    B,
    /// CCC+ down to C.
    CCC,
    Default,
    NotRated,
}

impl RatingBucket {
    /// Display label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AAA => "AAA",
            Self::AA => "AA",
            Self::A => "A",
            Self::BBB => "BBB",
            Self::BB => "BB",
            Self::B => "B",
            Self::CCC => "CCC",
            Self::Default => "D",
            Self::NotRated => "NR",
        }
    }

    /// Parses a bucket label, or any notch inside the bucket.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        CreditRating::parse(s).map(|rating| rating.bucket())
    }
}

impl fmt::Display for RatingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_best_to_worst() {
        assert!(CreditRating::AAA < CreditRating::AA);
        assert!(CreditRating::BBBMinus < CreditRating::BBPlus);
        assert!(CreditRating::D < CreditRating::NotRated);

        let all: Vec<_> = CreditRating::all().collect();
        assert!(all.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(all.len(), 23);
    }

    #[test]
    fn test_parse_both_notations() {
        assert_eq!(CreditRating::parse("AA+"), Some(CreditRating::AAPlus));
        assert_eq!(CreditRating::parse("Aa1"), Some(CreditRating::AAPlus));
        assert_eq!(CreditRating::parse("bbb-"), Some(CreditRating::BBBMinus));
        assert_eq!(CreditRating::parse(" A "), Some(CreditRating::A));
        assert_eq!(CreditRating::parse("Not Rated"), Some(CreditRating::NotRated));
        assert_eq!(CreditRating::parse("XYZ"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "XYZ".parse::<CreditRating>().unwrap_err();
        assert_eq!(err, CoreError::InvalidRating("XYZ".into()));
    }

    #[test]
    fn test_grades() {
        assert!(CreditRating::BBBMinus.is_investment_grade());
        assert!(!CreditRating::BBPlus.is_investment_grade());
        assert!(!CreditRating::NotRated.is_investment_grade());
        assert!(CreditRating::B.is_high_yield());
        assert!(!CreditRating::D.is_high_yield());
    }

    #[test]
    fn test_bucket() {
        assert_eq!(CreditRating::AAMinus.bucket(), RatingBucket::AA);
        assert_eq!(CreditRating::BBBPlus.bucket(), RatingBucket::BBB);
        assert_eq!(CreditRating::CC.bucket(), RatingBucket::CCC);
        assert_eq!(CreditRating::NotRated.bucket(), RatingBucket::NotRated);
        assert_eq!(RatingBucket::parse("A-"), Some(RatingBucket::A));
    }

    #[test]
    fn test_serde_lenient() {
        let json = serde_json::to_string(&CreditRating::BBBPlus).unwrap();
        assert_eq!(json, "\"BBB+\"");

        let parsed: CreditRating = serde_json::from_str("\"Baa1\"").unwrap();
        assert_eq!(parsed, CreditRating::BBBPlus);

        let unknown: CreditRating = serde_json::from_str("\"junk\"").unwrap();
        assert_eq!(unknown, CreditRating::NotRated);

        let null: CreditRating = serde_json::from_str("null").unwrap();
        assert_eq!(null, CreditRating::NotRated);
    }
}
