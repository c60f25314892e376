//! Run-level error types
//!
//! Item outcomes (missing annotation, generator failure, incomplete output) are
//! values in [`crate::batch::outcome`], not errors. Only conditions that stop the
//! whole run live here.

use std::fmt;
use std::path::PathBuf;

/// Main error type for a batch run
#[derive(Debug)]
pub enum BatchError {
    /// Input directory is missing or cannot be listed
    InputDirectory {
        /// Directory that was scanned
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Output directory could not be created
    OutputDirectory {
        /// Directory that was requested
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Command-line or configuration value rejected before the run
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A status line could not be written
    Report {
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Some items did not succeed and strict mode was requested
    ItemsFailed {
        /// Items whose generator run failed
        failed: usize,
        /// Items that ran but left outputs missing
        incomplete: usize,
    },
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputDirectory { path, source } => {
                write!(
                    f,
                    "Cannot read input directory '{}': {source}",
                    path.display()
                )
            }
            Self::OutputDirectory { path, source } => {
                write!(
                    f,
                    "Cannot create output directory '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Report { source } => write!(f, "Failed to write status output: {source}"),
            Self::ItemsFailed { failed, incomplete } => {
                write!(
                    f,
                    "{failed} item(s) failed and {incomplete} item(s) produced incomplete output"
                )
            }
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InputDirectory { source, .. }
            | Self::OutputDirectory { source, .. }
            | Self::FileSystem { source, .. }
            | Self::Report { source } => Some(source),
            Self::InvalidParameter { .. } | Self::ItemsFailed { .. } => None,
        }
    }
}

/// Convenience type alias for batch results
pub type Result<T> = std::result::Result<T, BatchError>;

impl From<std::io::Error> for BatchError {
    fn from(err: std::io::Error) -> Self {
        Self::Report { source: err }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> BatchError {
    BatchError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
