// crates/bcsd_config/src/provenance.rs

//! Static provenance metadata template.
//!
//! Every published file carries a fixed set of provenance attributes plus
//! per-job dynamic fields. The static part is configuration; the merge
//! with dynamic fields happens in the workflow crate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute key recording the exact source file a job consumed.
pub const DEPENDENCIES_KEY: &str = "dependencies";

/// Attribute key carrying the output schema version.
pub const VERSION_KEY: &str = "version";

/// Static provenance fields attached to every output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvenanceTemplate {
    /// One-line description of the transform.
    pub oneline: String,
    /// Full description.
    pub description: String,
    /// Author name.
    pub author: String,
    /// Contact address.
    pub contact: String,
    /// Output schema version tag.
    pub version: String,
    /// Repository URL of the transform code.
    pub repo: String,
    /// Path of the transform entry point within the repository.
    pub file: String,
    /// Command line used to launch the sweep.
    pub execute: String,
    /// Project tag.
    pub project: String,
    /// Team tag.
    pub team: String,
    /// Temporal frequency of the data.
    pub frequency: String,
}

impl Default for ProvenanceTemplate {
    fn default() -> Self {
        Self {
            oneline: "Reformatting BCSD raw data to fill holes.".into(),
            description: "Reformatting BCSD raw data to fill holes.\n\n\
                          version 1.0 - initial release"
                .into(),
            author: "Justin Gerard".into(),
            contact: "jsimcock@rhg.com".into(),
            version: "1.0".into(),
            repo: "https://gitlab.com/Climate/climate-transforms/".into(),
            file: "apps/bcsd_cli/src/main.rs".into(),
            execute: "bcsd_cli run".into(),
            project: "gcp".into(),
            team: "climate".into(),
            frequency: "daily".into(),
        }
    }
}

impl ProvenanceTemplate {
    /// The static fields as string attributes, in deterministic order.
    pub fn to_attrs(&self) -> BTreeMap<String, String> {
        let mut attrs = BTreeMap::new();
        attrs.insert("oneline".to_string(), self.oneline.clone());
        attrs.insert("description".to_string(), self.description.clone());
        attrs.insert("author".to_string(), self.author.clone());
        attrs.insert("contact".to_string(), self.contact.clone());
        attrs.insert(VERSION_KEY.to_string(), self.version.clone());
        attrs.insert("repo".to_string(), self.repo.clone());
        attrs.insert("file".to_string(), self.file.clone());
        attrs.insert("execute".to_string(), self.execute.clone());
        attrs.insert("project".to_string(), self.project.clone());
        attrs.insert("team".to_string(), self.team.clone());
        attrs.insert("frequency".to_string(), self.frequency.clone());
        attrs
    }
}
