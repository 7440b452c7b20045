//! Error types for data loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for data source operations.
pub type DemoDataResult<T> = Result<T, DemoDataError>;

/// Errors from loading dashboard data.
#[derive(Error, Debug)]
pub enum DemoDataError {
    /// Data file could not be read.
    #[error("Failed to read data file '{path}': {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Data file is not a valid dataset document.
    #[error("Failed to parse data file '{path}': {source}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Inline JSON is not a valid dataset document.
    #[error("Invalid dataset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DemoDataError {
    /// Creates an I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse error for a path.
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
