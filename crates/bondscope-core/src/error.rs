//! Error types for the core crate.
//!
//! Analytics never fail; these errors only surface from explicit parsing and
//! validation entry points.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by parsing and validation helpers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A rating string that is neither S&P nor Moody's notation.
    #[error("Unrecognised credit rating: '{0}'")]
    InvalidRating(String),

    /// Bond reference data that fails validation.
    #[error("Invalid bond '{id}': {reason}")]
    InvalidBond {
        /// The bond identifier.
        id: String,
        /// The reason the bond is invalid.
        reason: String,
    },

    /// Position data that fails validation.
    #[error("Invalid position for bond '{id}': {reason}")]
    InvalidPosition {
        /// The identifier of the bond held.
        id: String,
        /// The reason the position is invalid.
        reason: String,
    },
}

impl CoreError {
    /// Create an invalid bond error.
    #[must_use]
    pub fn invalid_bond(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBond {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid position error.
    #[must_use]
    pub fn invalid_position(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPosition {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidRating("ZZZ".into());
        assert!(err.to_string().contains("ZZZ"));

        let err = CoreError::invalid_bond("B1", "negative duration");
        assert!(err.to_string().contains("B1"));
        assert!(err.to_string().contains("negative duration"));

        let err = CoreError::invalid_position("B2", "negative market value");
        assert!(err.to_string().contains("B2"));
    }
}
