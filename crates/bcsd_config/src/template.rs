// crates/bcsd_config/src/template.rs

//! Path templates and the job-to-path resolver.
//!
//! Both the source and destination layouts are fixed template strings with
//! `{name}` placeholders. Resolution substitutes job parameters into the
//! template and fails loudly on a missing key, before any I/O is
//! attempted. No existence check happens here; that is the caller's job.

use crate::error::ConfigError;
use crate::space::JobParameters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Relative source layout of the raw NASA BCSD archive.
pub const SOURCE_TEMPLATE: &str =
    "{scenario}/{model}/{variable}/{variable}_day_BCSD_{scenario}_r1i1p1_{model}_{year}.nc";

/// Relative destination layout of the reformatted archive.
pub const DESTINATION_TEMPLATE: &str = "{variable}/{scenario}/{model}/{year}/{version}.nc4";

/// Suffix appended to a destination path while it is being written.
pub const TEMP_SUFFIX: &str = "~";

/// A path template with named `{key}` placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathTemplate {
    pattern: String,
}

impl PathTemplate {
    /// Wrap a template string.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The raw pattern.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Substitute `keys` into the template.
    ///
    /// Every placeholder must have a value; a missing key or an unbalanced
    /// brace is a `ConfigError`. Literal text outside braces is copied
    /// through untouched, so resolving the same keys twice yields the
    /// identical string.
    pub fn resolve(&self, keys: &BTreeMap<&str, String>) -> Result<String, ConfigError> {
        let mut out = String::with_capacity(self.pattern.len());
        let mut rest = self.pattern.as_str();

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            rest = &rest[open + 1..];
            let close = rest.find('}').ok_or_else(|| ConfigError::MalformedTemplate {
                template: self.pattern.clone(),
                reason: "unclosed '{'".to_string(),
            })?;
            let key = &rest[..close];
            if key.is_empty() {
                return Err(ConfigError::MalformedTemplate {
                    template: self.pattern.clone(),
                    reason: "empty placeholder".to_string(),
                });
            }
            let value = keys.get(key).ok_or_else(|| ConfigError::MissingKey {
                template: self.pattern.clone(),
                key: key.to_string(),
            })?;
            out.push_str(value);
            rest = &rest[close + 1..];
        }
        if rest.contains('}') {
            return Err(ConfigError::MalformedTemplate {
                template: self.pattern.clone(),
                reason: "unmatched '}'".to_string(),
            });
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Source and destination layout configuration for one sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathConfig {
    /// Root of the read-only raw archive.
    pub source_root: PathBuf,
    /// Root of the reformatted output archive.
    pub destination_root: PathBuf,
    /// Source layout below `source_root`.
    pub source_template: PathTemplate,
    /// Destination layout below `destination_root`.
    pub destination_template: PathTemplate,
    /// Output format version string, e.g. "1.0".
    pub version: String,
}

impl PathConfig {
    /// Standard BCSD layouts under the given roots.
    pub fn new(
        source_root: impl Into<PathBuf>,
        destination_root: impl Into<PathBuf>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            destination_root: destination_root.into(),
            source_template: PathTemplate::new(SOURCE_TEMPLATE),
            destination_template: PathTemplate::new(DESTINATION_TEMPLATE),
            version: version.into(),
        }
    }

    fn job_keys(job: &JobParameters) -> BTreeMap<&'static str, String> {
        let mut keys = BTreeMap::new();
        keys.insert("model", job.model.clone());
        keys.insert("scenario", job.scenario.name().to_string());
        keys.insert("year", job.year.to_string());
        keys.insert("variable", job.variable.clone());
        keys
    }

    /// Resolve the source file path for a job.
    pub fn source_path(&self, job: &JobParameters) -> Result<PathBuf, ConfigError> {
        let rel = self.source_template.resolve(&Self::job_keys(job))?;
        Ok(self.source_root.join(rel))
    }

    /// Resolve the final destination path for a job.
    pub fn destination_path(&self, job: &JobParameters) -> Result<PathBuf, ConfigError> {
        let mut keys = Self::job_keys(job);
        keys.insert("version", self.version.clone());
        let rel = self.destination_template.resolve(&keys)?;
        Ok(self.destination_root.join(rel))
    }

    /// The temporary path a destination is written to before the rename.
    pub fn temp_path(destination: &std::path::Path) -> PathBuf {
        let mut s = destination.as_os_str().to_os_string();
        s.push(TEMP_SUFFIX);
        PathBuf::from(s)
    }
}
