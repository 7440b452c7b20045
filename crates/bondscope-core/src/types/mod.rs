//! Domain types for the dashboard data model.
//!
//! - [`Bond`]: immutable reference data for one tokenized or traditional bond
//! - [`CreditRating`] / [`RatingBucket`]: ordered rating scale, best first
//! - [`Position`]: a holding of one bond at a market value
//! - [`Portfolio`]: ordered positions plus source-supplied aggregates

mod bond;
mod portfolio;
mod rating;

pub use bond::Bond;
pub use portfolio::{Portfolio, Position};
pub use rating::{CreditRating, RatingBucket};
