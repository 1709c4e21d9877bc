// crates/bcsd_io/src/sidecar.rs

//! Plain-text attribute header written next to a published file.
//!
//! The header mirrors the global and per-variable attribute maps in a
//! simple `key: value` format so provenance can be read without the
//! array-file library. Deterministically ordered.

use crate::dataset::Dataset;
use crate::error::DatasetError;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Extension of the sidecar header file.
pub const SIDECAR_EXTENSION: &str = "hdr";

/// Sidecar path for a published file (same path, `.hdr` extension).
pub fn sidecar_path(published: &Path) -> PathBuf {
    published.with_extension(SIDECAR_EXTENSION)
}

/// Render the header text for a dataset.
pub fn render_header(dataset: &Dataset) -> String {
    let mut out = String::new();
    out.push_str("---\n");
    for (k, v) in &dataset.attrs {
        let _ = writeln!(out, "{k}: {v}");
    }
    out.push_str("---\n");
    for (name, var) in &dataset.variables {
        let dims = var.dims.join(", ");
        let _ = writeln!(out, "variable: {name} ({dims})");
        for (k, v) in &var.attrs {
            let _ = writeln!(out, "  {k}: {v}");
        }
    }
    out
}

/// Write the sidecar header next to a published file.
pub fn write_sidecar(dataset: &Dataset, published: &Path) -> Result<PathBuf, DatasetError> {
    let path = sidecar_path(published);
    debug!("writing sidecar header \"{}\"", path.display());
    fs::write(&path, render_header(dataset)).map_err(|e| DatasetError::Write {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut ds = Dataset::new();
        ds.add_dimension("time", 1);
        ds.add_variable("tas", &["time"], vec![280.0]).unwrap();
        ds.variable_mut("tas")
            .unwrap()
            .attrs
            .insert("units".into(), "K".into());
        ds.attrs.insert("author".into(), "Justin Gerard".into());
        ds.attrs.insert("version".into(), "1.0".into());
        ds
    }

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            sidecar_path(Path::new("/out/1990/1.0.nc4")),
            PathBuf::from("/out/1990/1.0.hdr")
        );
    }

    #[test]
    fn test_render_header() {
        let text = render_header(&sample());
        assert!(text.contains("author: Justin Gerard\n"));
        assert!(text.contains("version: 1.0\n"));
        assert!(text.contains("variable: tas (time)\n"));
        assert!(text.contains("  units: K\n"));
    }

    #[test]
    fn test_write_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let published = dir.path().join("1.0.nc4");
        let path = write_sidecar(&sample(), &published).unwrap();
        assert_eq!(path, dir.path().join("1.0.hdr"));
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("---\n"));
    }
}
