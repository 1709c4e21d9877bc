// crates/bcsd_workflow/src/metadata.rs

//! Provenance metadata merge.
//!
//! The static template from configuration is combined with per-job
//! dynamic fields. Invariant: the merged map always carries the exact
//! source path under `dependencies` and the schema version under
//! `version`.

use bcsd_config::{JobParameters, ProvenanceTemplate, DEPENDENCIES_KEY};
use chrono::Utc;
use std::collections::BTreeMap;
use std::path::Path;

/// Full attribute set for one job's output.
pub fn job_metadata(
    provenance: &ProvenanceTemplate,
    job: &JobParameters,
    source_path: &Path,
) -> BTreeMap<String, String> {
    let mut attrs = provenance.to_attrs();
    attrs.insert(
        DEPENDENCIES_KEY.to_string(),
        source_path.display().to_string(),
    );
    attrs.insert("model".to_string(), job.model.clone());
    attrs.insert("scenario".to_string(), job.scenario.name().to_string());
    attrs.insert("year".to_string(), job.year.to_string());
    attrs.insert("variable".to_string(), job.variable.clone());
    attrs.insert("generated".to_string(), Utc::now().to_rfc3339());
    attrs
}
