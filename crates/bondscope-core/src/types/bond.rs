//! Bond reference data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::CreditRating;
use crate::error::{CoreError, CoreResult};
use crate::safe::de;

/// Immutable reference data for one bond.
///
/// Numeric fields load leniently: a `null` or garbled duration becomes `0.0`
/// rather than rejecting the record.
///
/// # Examples
///
/// ```
/// use bondscope_core::{Bond, CreditRating};
///
/// let bond = Bond::new("DE-GRN-2031", "Green Bund 2031")
///     .with_issuer("Federal Republic of Germany")
///     .with_sector("Government")
///     .with_rating(CreditRating::AAA)
///     .with_duration(6.4)
///     .with_yield(2.35)
///     .tokenized(true);
///
/// assert!(bond.tokenized);
/// assert!(bond.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Bond {
    /// Bond identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Issuer name.
    pub issuer: String,

    /// Issuer sector (free text, used verbatim as a grouping key).
    pub sector: String,

    /// Composite credit rating.
    pub rating: CreditRating,

    /// Duration in years.
    #[serde(deserialize_with = "de::lenient_f64")]
    pub duration: f64,

    /// Yield to maturity in percent (4.25 means 4.25%).
    #[serde(alias = "ytm", alias = "yield", deserialize_with = "de::lenient_f64")]
    pub yield_to_maturity: f64,

    /// Whether the bond is issued as an on-chain token.
    #[serde(alias = "isTokenized")]
    pub tokenized: bool,

    /// Annual coupon in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon: Option<f64>,

    /// Maturity date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity: Option<NaiveDate>,

    /// ISIN, if assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isin: Option<String>,
}

impl Bond {
    /// Creates a bond with an identifier and display name; everything else defaults.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Sets the sector.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = sector.into();
        self
    }

    /// Sets the credit rating.
    #[must_use]
    pub fn with_rating(mut self, rating: CreditRating) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the duration in years.
    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the yield to maturity in percent.
    #[must_use]
    pub fn with_yield(mut self, ytm: f64) -> Self {
        self.yield_to_maturity = ytm;
        self
    }

    /// Sets the tokenization flag.
    #[must_use]
    pub fn tokenized(mut self, tokenized: bool) -> Self {
        self.tokenized = tokenized;
        self
    }

    /// Sets the coupon in percent.
    #[must_use]
    pub fn with_coupon(mut self, coupon: f64) -> Self {
        self.coupon = Some(coupon);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn with_maturity(mut self, maturity: NaiveDate) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the ISIN.
    #[must_use]
    pub fn with_isin(mut self, isin: impl Into<String>) -> Self {
        self.isin = Some(isin.into());
        self
    }

    /// Checks the record for values the analytics will have to paper over.
    ///
    /// Analytics never call this; loaders use it to log data quality issues.
    pub fn validate(&self) -> CoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::invalid_bond(&self.name, "missing identifier"));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(CoreError::invalid_bond(
                &self.id,
                format!("duration {} is not a non-negative number", self.duration),
            ));
        }
        if !self.yield_to_maturity.is_finite() {
            return Err(CoreError::invalid_bond(&self.id, "yield is not finite"));
        }
        Ok(())
    }
}
