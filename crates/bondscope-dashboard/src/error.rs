//! Error types for dashboard session state.

use thiserror::Error;

/// Errors from simulated compliance actions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// The control already has an action in flight; the button is disabled.
    #[error("An action on {control} is already pending")]
    ActionPending {
        /// Control that is busy.
        control: String,
    },

    /// No holder with this address.
    #[error("Unknown account: {0}")]
    UnknownAccount(String),

    /// No rule with this identifier.
    #[error("Unknown compliance rule: {0}")]
    UnknownRule(String),
}

impl ControlError {
    /// Creates a pending-action error.
    pub fn pending(control: impl Into<String>) -> Self {
        Self::ActionPending {
            control: control.into(),
        }
    }
}

/// Errors from the render recovery boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    /// Retries are used up; only a full reload helps now.
    #[error("Rendering failed after {attempts} attempts ({last_error}). Please reload the dashboard.")]
    Exhausted {
        /// Render attempts made, including the first.
        attempts: u32,
        /// Message of the final failure.
        last_error: String,
    },
}
