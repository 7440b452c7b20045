//! # Bondscope Demo
//!
//! Data sources for the dashboard. Everything is loaded once per session and
//! treated as read-only afterwards.
//!
//! - [`StaticDemoSource`] - deterministic built-in dataset
//! - [`JsonDemoSource`] - the same shape loaded from a JSON document
//!
//! Both implement [`DemoDataSource`], so views never care which one is active.
//!
//! ## JSON Shape
//!
//! ```json
//! {
//!   "portfolio": { "positions": [ { "bond": { "id": "B1", "rating": "AA" }, "marketValue": 1000000 } ] },
//!   "bonds": [],
//!   "tokenHolders": [ { "address": "0x..", "balance": 100, "whitelisted": true, "frozen": false, "kycVerified": true } ],
//!   "complianceRules": [ { "id": "kyc", "name": "KYC", "active": true, "description": "..." } ],
//!   "transferEvents": [ { "id": "tx1", "from": "0x..", "to": "0x..", "amount": 10, "status": "completed", "timestamp": "2024-06-01T12:00:00Z" } ],
//!   "pauseEvents": [ { "id": "p1", "action": "pause", "reason": "...", "blockNumber": 1, "timestamp": "2024-06-01T12:00:00Z" } ]
//! }
//! ```
//!
//! Every section is optional.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod dataset;
mod error;
pub mod records;
mod source;

pub use dataset::StaticDemoSource;
pub use error::{DemoDataError, DemoDataResult};
pub use records::{
    shorten_address, ComplianceRule, PauseAction, PauseEvent, TokenHolder, TransferEvent,
    TransferStatus,
};
pub use source::{DemoDataSource, DemoDataset, JsonDemoSource};

use std::path::Path;

/// Opens the JSON source at `path`, or the built-in dataset when `path` is `None`.
pub fn open_source(path: Option<&Path>) -> DemoDataResult<Box<dyn DemoDataSource>> {
    Ok(match path {
        Some(path) => Box::new(JsonDemoSource::from_path(path)?),
        None => Box::new(StaticDemoSource::new()),
    })
}
