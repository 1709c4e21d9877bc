// crates/bcsd_config/src/lib.rs

//! Configuration layer of the BCSD reformatting workspace.
//!
//! # Modules
//!
//! - [`space`]: job parameter axes and enumeration
//! - [`template`]: path templates and the job-to-path resolver
//! - [`provenance`]: static provenance metadata template
//! - [`reformat`]: top-level sweep configuration
//!
//! Everything here is plain immutable data handed to the pipeline; the
//! constants of the original sweep (model list, period ranges, path
//! layouts) are available through `ParameterSpace::bcsd_v1` and
//! `PathConfig::new`.

pub mod error;
pub mod provenance;
pub mod reformat;
pub mod space;
pub mod template;

pub use error::{ConfigError, ConfigResult};
pub use provenance::{ProvenanceTemplate, DEPENDENCIES_KEY, VERSION_KEY};
pub use reformat::{ExpectedShape, ReformatConfig, RunMode};
pub use space::{JobParameters, ParameterSpace, Period, Scenario};
pub use template::{PathConfig, PathTemplate, DESTINATION_TEMPLATE, SOURCE_TEMPLATE, TEMP_SUFFIX};
