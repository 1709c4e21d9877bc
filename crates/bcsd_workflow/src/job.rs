// crates/bcsd_workflow/src/job.rs

//! Per-job state and outcomes.
//!
//! A job moves `Pending -> (Skipped | Reading -> Transforming ->
//! WritingTemp -> Validating -> Published)`. Skipped and Published are the
//! only non-error terminal states; any other exit is a `WorkflowError`
//! surfaced to the runner.

use bcsd_io::Dataset;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Pipeline stage of one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    /// Not started.
    Pending,
    /// Loading the source file.
    Reading,
    /// Running the hole filler.
    Transforming,
    /// Writing the temporary output.
    WritingTemp,
    /// Re-reading and checking the temporary output.
    Validating,
    /// Renamed onto the final path.
    Published,
    /// Destination already existed; nothing read or written.
    Skipped,
}

impl JobStage {
    /// Whether the stage is a terminal success state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Published | Self::Skipped)
    }

    /// Stable lowercase name, matching the serde form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Reading => "reading",
            Self::Transforming => "transforming",
            Self::WritingTemp => "writing_temp",
            Self::Validating => "validating",
            Self::Published => "published",
            Self::Skipped => "skipped",
        }
    }
}

impl std::fmt::Display for JobStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Successful result of one job.
#[derive(Debug)]
pub enum JobOutcome {
    /// Destination already existed; no filesystem activity.
    Skipped,
    /// Output validated and renamed onto its final path.
    Published(PathBuf),
    /// Interactive mode: the in-memory result, nothing written.
    Inspected(Box<Dataset>),
}

impl JobOutcome {
    /// The terminal stage this outcome corresponds to.
    pub fn stage(&self) -> JobStage {
        match self {
            Self::Skipped => JobStage::Skipped,
            Self::Published(_) => JobStage::Published,
            // Interactive runs stop before the write path.
            Self::Inspected(_) => JobStage::Transforming,
        }
    }
}
