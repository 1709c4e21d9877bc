// crates/bcsd_io/src/error.rs

//! IO error types.
//!
//! One enum for everything the storage drivers can fail on; convertible
//! into `BcsdError` for cross-layer propagation.

use bcsd_foundation::BcsdError;
use std::path::PathBuf;
use thiserror::Error;

/// IO result alias.
pub type IoResult<T> = Result<T, DatasetError>;

/// Storage and dataset errors.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The requested file does not exist.
    #[error("file not found: {path}")]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A file exists but could not be opened or decoded.
    #[error("failed to open {path}: {reason}")]
    Open {
        /// The path being opened.
        path: PathBuf,
        /// Driver-level failure description.
        reason: String,
    },

    /// A file could not be written.
    #[error("failed to write {path}: {reason}")]
    Write {
        /// The path being written.
        path: PathBuf,
        /// Driver-level failure description.
        reason: String,
    },

    /// Renaming a temporary file onto its final path failed.
    #[error("failed to rename {from} -> {to}")]
    Rename {
        /// Temporary path.
        from: PathBuf,
        /// Final path.
        to: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A named variable is not present in the dataset.
    #[error("variable not found: {name}")]
    VariableNotFound {
        /// The missing variable.
        name: String,
    },

    /// A named dimension is not present in the dataset.
    #[error("dimension not found: {name}")]
    DimensionNotFound {
        /// The missing dimension.
        name: String,
    },

    /// Variable data does not match its declared shape.
    #[error("shape mismatch for variable {variable}: shape holds {expected} values, data holds {actual}")]
    ShapeMismatch {
        /// The offending variable.
        variable: String,
        /// Element count implied by the shape.
        expected: usize,
        /// Element count actually supplied.
        actual: usize,
    },

    /// A decoded variable is internally inconsistent.
    #[error("corrupt variable {variable}: {reason}")]
    Corrupt {
        /// The offending variable.
        variable: String,
        /// What is inconsistent.
        reason: String,
    },

    /// Plain IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// NetCDF library error.
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),
}

impl From<DatasetError> for BcsdError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::FileNotFound { path } => BcsdError::FileNotFound { path },
            DatasetError::Io(io) => io.into(),
            other => BcsdError::io(other.to_string()),
        }
    }
}
