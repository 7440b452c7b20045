//! Error types for portfolio views.
//!
//! Aggregation and scoring are total; errors only come from parsing
//! user-supplied selectors such as dimension names.

use thiserror::Error;

/// Result type for portfolio view operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors from parsing view selectors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    /// Unknown allocation dimension name.
    #[error("Unknown allocation dimension '{0}' (expected sector, rating, duration or issuer)")]
    UnknownDimension(String),

    /// Unknown risk metric name.
    #[error("Unknown risk metric '{0}' (expected duration, rating or heatmap)")]
    UnknownRiskKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::UnknownDimension("colour".into());
        assert!(err.to_string().contains("colour"));
        let err = PortfolioError::UnknownRiskKind("vibes".into());
        assert!(err.to_string().contains("vibes"));
    }
}
