// crates/bcsd_foundation/src/error.rs

//! Workspace-wide error type.
//!
//! Provides the `BcsdError` enum and the `BcsdResult` alias. Domain crates
//! define their own error enums and convert into `BcsdError` at layer
//! boundaries, so a single failing job surfaces as one typed error to the
//! external runner.

use std::path::PathBuf;
use thiserror::Error;

/// Workspace-wide result alias.
pub type BcsdResult<T> = Result<T, BcsdError>;

/// Top-level error for the BCSD reformatting workspace.
#[derive(Error, Debug)]
pub enum BcsdError {
    /// IO error with a descriptive message.
    #[error("IO error: {message}")]
    Io {
        /// Descriptive message.
        message: String,
        /// Optional underlying IO error.
        #[source]
        source: Option<std::io::Error>,
    },

    /// A required file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Invalid input data.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Why the input is invalid.
        message: String,
    },

    /// Configuration problem.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the problem.
        message: String,
    },

    /// Output failed post-write validation.
    #[error("validation failed: {message}")]
    Validation {
        /// Which check failed and where.
        message: String,
    },

    /// Internal invariant violation.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the violation.
        message: String,
    },
}

impl BcsdError {
    /// IO error without an underlying source.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// IO error wrapping a `std::io::Error`.
    pub fn io_source(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for BcsdError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let err = BcsdError::config("bad template");
        assert!(matches!(err, BcsdError::Config { .. }));
        assert_eq!(err.to_string(), "configuration error: bad template");

        let err = BcsdError::validation("residual nulls");
        assert_eq!(err.to_string(), "validation failed: residual nulls");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BcsdError = io.into();
        assert!(matches!(err, BcsdError::Io { source: Some(_), .. }));
    }
}
