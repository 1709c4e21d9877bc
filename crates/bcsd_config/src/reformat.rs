// crates/bcsd_config/src/reformat.rs

//! Top-level configuration for one reformatting sweep.
//!
//! Everything the pipeline needs is carried in one immutable value, so a
//! job is a pure function of its parameters plus this configuration. No
//! process-wide globals.

use crate::error::ConfigError;
use crate::provenance::ProvenanceTemplate;
use crate::template::PathConfig;
use serde::{Deserialize, Serialize};

/// Expected dimension sizes of a published output grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedShape {
    /// Longitude grid size.
    pub lon: usize,
    /// Latitude grid size.
    pub lat: usize,
    /// Day-of-year grid size.
    pub time: usize,
}

impl Default for ExpectedShape {
    fn default() -> Self {
        // Quarter-degree global daily grid of the BCSD archive.
        Self {
            lon: 1440,
            lat: 720,
            time: 365,
        }
    }
}

impl ExpectedShape {
    /// The shape as (dimension name, size) pairs.
    pub fn dims(&self) -> [(&'static str, usize); 3] {
        [("lon", self.lon), ("lat", self.lat), ("time", self.time)]
    }
}

/// How the pipeline was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Under the external scheduler: publish to disk, skip existing output.
    #[default]
    Batch,
    /// Manual inspection: return the in-memory result, write nothing.
    Interactive,
}

/// Immutable configuration for one sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReformatConfig {
    /// Source and destination layouts.
    pub paths: PathConfig,
    /// Static provenance attributes.
    pub provenance: ProvenanceTemplate,
    /// Shape every published grid must have.
    pub expected_shape: ExpectedShape,
    /// Invocation mode.
    pub mode: RunMode,
    /// Re-publish even when the destination already exists.
    pub force: bool,
    /// Emit a plain-text attribute header next to each published file.
    pub sidecar: bool,
}

impl ReformatConfig {
    /// Batch-mode configuration with default provenance and shape.
    pub fn new(paths: PathConfig) -> Self {
        Self {
            paths,
            provenance: ProvenanceTemplate::default(),
            expected_shape: ExpectedShape::default(),
            mode: RunMode::Batch,
            force: false,
            sidecar: false,
        }
    }

    /// Switch to interactive mode.
    pub fn interactive(mut self) -> Self {
        self.mode = RunMode::Interactive;
        self
    }

    /// Re-publish existing destinations.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Enable the sidecar header.
    pub fn with_sidecar(mut self, sidecar: bool) -> Self {
        self.sidecar = sidecar;
        self
    }

    /// Sanity-check the configuration before any job runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.version.is_empty() {
            return Err(ConfigError::InvalidValue {
                message: "output version string is empty".to_string(),
            });
        }
        let shape = self.expected_shape;
        if shape.lon == 0 || shape.lat == 0 || shape.time == 0 {
            return Err(ConfigError::InvalidValue {
                message: format!(
                    "expected shape has a zero-sized dimension: lon={} lat={} time={}",
                    shape.lon, shape.lat, shape.time
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape_is_bcsd_grid() {
        let shape = ExpectedShape::default();
        assert_eq!(shape.dims(), [("lon", 1440), ("lat", 720), ("time", 365)]);
    }

    #[test]
    fn test_validate_rejects_empty_version() {
        let config = ReformatConfig::new(PathConfig::new("/raw", "/out", ""));
        assert!(config.validate().is_err());

        let config = ReformatConfig::new(PathConfig::new("/raw", "/out", "1.0"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = ReformatConfig::new(PathConfig::new("/raw", "/out", "1.0"))
            .interactive()
            .with_force(true)
            .with_sidecar(true);
        assert_eq!(config.mode, RunMode::Interactive);
        assert!(config.force);
        assert!(config.sidecar);
    }
}
