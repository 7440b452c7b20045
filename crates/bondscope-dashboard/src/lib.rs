//! # Bondscope Dashboard
//!
//! Session state that changes after the data is loaded:
//!
//! - [`RecoveryBoundary`] - retries failed renders with exponential backoff
//! - [`ComplianceControls`] - simulated pause, freeze and rule toggles
//! - [`ViewState`] - tab, selection and chart settings updated by [`ViewAction`]
//! - [`PortfolioSummary`] - overview panel figures
//!
//! ## Example
//!
//! ```rust
//! use bondscope_dashboard::{ViewAction, ViewState, Tab};
//!
//! let state = ViewState::default()
//!     .apply(ViewAction::SelectTab(Tab::Risk))
//!     .apply(ViewAction::SelectBond("UST-2029".into()));
//! assert_eq!(state.tab, Tab::Risk);
//! assert_eq!(state.selected_bond.as_deref(), Some("UST-2029"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod compliance;
pub mod error;
pub mod recovery;
pub mod summary;
pub mod view;

pub use compliance::{ActionDelays, ComplianceControls, ControlId};
pub use error::{ControlError, RecoveryError};
pub use recovery::{RecoveryBoundary, RecoveryState, RetryPolicy};
pub use summary::PortfolioSummary;
pub use view::{Tab, Timeframe, ViewAction, ViewMode, ViewState};
