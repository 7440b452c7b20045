//! # Bondscope Core
//!
//! Core types and numeric helpers shared by every Bondscope crate.
//!
//! ## Design Philosophy
//!
//! - **Read-only reference data**: bonds, positions and portfolios are loaded
//!   once per session and never mutated by the analytics layer
//! - **Degrade, don't fail**: missing or malformed numeric inputs resolve to
//!   documented fallbacks (`0`, empty collections, `"N/A"`) instead of errors
//! - **Explicit safe accessors**: every fallback goes through [`safe`], so the
//!   contract is testable in one place
//!
//! ## Module Overview
//!
//! - [`types`] - Bond, CreditRating, Position and Portfolio
//! - [`safe`] - Total numeric accessors (`safe_number`, `safe_percentage`, ...)
//! - [`format`] - Display formatting with fallbacks for NaN/missing values
//! - [`error`] - Error types for the few fallible edges (parsing, validation)
//!
//! ## Quick Start
//!
//! ```rust
//! use bondscope_core::prelude::*;
//!
//! let bond = Bond::new("UST-2030", "US Treasury 2030")
//!     .with_issuer("US Treasury")
//!     .with_sector("Government")
//!     .with_rating(CreditRating::AAA)
//!     .with_duration(5.2)
//!     .with_yield(4.1);
//!
//! let portfolio = Portfolio::from_positions(vec![Position::new(bond, dec!(2_500_000))]);
//! assert_eq!(portfolio.total_value, dec!(2_500_000));
//! assert_eq!(format_millions(portfolio.total_value), "$2.5M");
//! assert_eq!(format_percent(f64::NAN, 1), "N/A");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod error;
pub mod format;
pub mod safe;
pub mod types;

pub use error::{CoreError, CoreResult};
pub use types::{Bond, CreditRating, Portfolio, Position, RatingBucket};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::format::{
        format_duration, format_fixed, format_millions, format_percent, format_yield, FALLBACK_NA,
    };
    pub use crate::safe::{
        round_to, safe_mean, safe_number, safe_percentage, safe_ratio, NumericInput,
    };
    pub use crate::types::{Bond, CreditRating, Portfolio, Position, RatingBucket};

    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
