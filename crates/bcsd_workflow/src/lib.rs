// crates/bcsd_workflow/src/lib.rs

//! Workflow layer of the BCSD reformatting workspace.
//!
//! # Modules
//!
//! - [`job`]: per-job stages and outcomes
//! - [`filler`]: hole-filling collaborator seam
//! - [`metadata`]: provenance metadata merge
//! - [`validate`]: post-write output validation
//! - [`pipeline`]: transform-and-write pipeline for one job
//! - [`runner`]: runner seam and serial implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use bcsd_config::{ParameterSpace, PathConfig, ReformatConfig};
//! use bcsd_io::JsonStore;
//! use bcsd_workflow::{Pipeline, SerialRunner, TimeBroadcastFiller, JobRunner};
//!
//! let config = ReformatConfig::new(PathConfig::new("/raw", "/out", "1.0"));
//! let store = JsonStore::new();
//! let filler = TimeBroadcastFiller::new();
//! let pipeline = Pipeline::new(&config, &store, &filler);
//!
//! let jobs = ParameterSpace::bcsd_v1().enumerate();
//! let report = SerialRunner::new().run(&jobs, &|job| pipeline.process(job));
//! ```

pub mod error;
pub mod filler;
pub mod job;
pub mod metadata;
pub mod pipeline;
pub mod runner;
pub mod validate;

pub use error::{WorkflowError, WorkflowResult};
pub use filler::{HoleFiller, TimeBroadcastFiller};
pub use job::{JobOutcome, JobStage};
pub use metadata::job_metadata;
pub use pipeline::Pipeline;
pub use runner::{JobFn, JobRunner, RunReport, SerialRunner};
pub use validate::{validate_output, ValidationError};
