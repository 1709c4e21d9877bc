// crates/bcsd_workflow/src/error.rs

//! Workflow error types.
//!
//! Every failure of a single job surfaces as one `WorkflowError`; the
//! runner reports it upward without touching sibling jobs.

use crate::validate::ValidationError;
use bcsd_config::ConfigError;
use bcsd_foundation::BcsdError;
use bcsd_io::DatasetError;
use std::path::PathBuf;
use thiserror::Error;

/// Workflow result alias.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Per-job failure kinds.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Source file absent or unreadable.
    #[error("source file missing or unreadable: {path}")]
    MissingSource {
        /// The resolved source path.
        path: PathBuf,
        /// Driver-level cause.
        #[source]
        source: DatasetError,
    },

    /// The hole-filling routine failed.
    #[error("transform failed for variable {variable}: {reason}")]
    TransformFailure {
        /// Target variable.
        variable: String,
        /// Why the transform failed.
        reason: String,
    },

    /// Post-write validation failed; the artifact was not promoted.
    #[error("validation failed for {path}")]
    Validation {
        /// The unpublished temporary file, left in place for inspection.
        path: PathBuf,
        /// Which check failed.
        #[source]
        source: ValidationError,
    },

    /// A path template could not be resolved.
    #[error("path construction failed")]
    PathConstruction(#[from] ConfigError),

    /// Storage-level failure outside the source read.
    #[error("dataset IO failed")]
    Dataset(#[from] DatasetError),
}

impl From<WorkflowError> for BcsdError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::MissingSource { path, .. } => BcsdError::FileNotFound { path },
            WorkflowError::Validation { path, source } => BcsdError::validation(format!(
                "{}: {source}",
                path.display()
            )),
            WorkflowError::PathConstruction(e) => e.into(),
            WorkflowError::Dataset(e) => e.into(),
            other @ WorkflowError::TransformFailure { .. } => {
                BcsdError::invalid_input(other.to_string())
            }
        }
    }
}
