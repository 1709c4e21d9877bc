// crates/bcsd_workflow/src/pipeline.rs

//! Transform-and-write pipeline for one job.
//!
//! Per job: resolve paths, skip if the destination exists, read the
//! source fully, run the hole filler, attach provenance, then publish
//! atomically (temp write, reopen, validate, rename). The rename is the
//! only publication point; no partial or invalid file ever appears at the
//! final path. Interactive runs return the in-memory result instead of
//! writing.

use crate::error::WorkflowError;
use crate::filler::HoleFiller;
use crate::job::JobOutcome;
use crate::metadata::job_metadata;
use crate::validate::validate_output;
use bcsd_config::{JobParameters, PathConfig, ReformatConfig, RunMode};
use bcsd_io::DatasetStore;
use tracing::debug;

/// Dimension the hole filler broadcasts along.
const BROADCAST_DIMS: [&str; 1] = ["time"];

/// One-job pipeline over injected collaborators.
pub struct Pipeline<'a> {
    config: &'a ReformatConfig,
    store: &'a dyn DatasetStore,
    filler: &'a dyn HoleFiller,
}

impl<'a> Pipeline<'a> {
    /// Wire a pipeline to its configuration and collaborators.
    pub fn new(
        config: &'a ReformatConfig,
        store: &'a dyn DatasetStore,
        filler: &'a dyn HoleFiller,
    ) -> Self {
        Self {
            config,
            store,
            filler,
        }
    }

    /// Process one job to a terminal outcome.
    pub fn process(&self, job: &JobParameters) -> Result<JobOutcome, WorkflowError> {
        // Path construction surfaces before any I/O.
        let read_file = self.config.paths.source_path(job)?;
        let write_file = self.config.paths.destination_path(job)?;

        // Do not duplicate work already published.
        if self.config.mode == RunMode::Batch
            && !self.config.force
            && self.store.exists(&write_file)
        {
            debug!(
                "{job} - destination \"{}\" exists, skipping",
                write_file.display()
            );
            return Ok(JobOutcome::Skipped);
        }

        debug!(
            "year {} - attempting to read file \"{}\"",
            job.year,
            read_file.display()
        );
        let ds = self
            .store
            .open(&read_file)
            .map_err(|source| WorkflowError::MissingSource {
                path: read_file.clone(),
                source,
            })?;

        // The external transform may drop per-variable attrs; snapshot
        // them so they survive.
        let varattrs = ds.variable_attrs();
        let mut ds = self.filler.fill(ds, &job.variable, &BROADCAST_DIMS)?;
        ds.restore_variable_attrs(&varattrs);

        let metadata = job_metadata(&self.config.provenance, job, &read_file);
        ds.merge_attrs(&metadata);

        if self.config.mode == RunMode::Interactive {
            debug!("{job} - interactive mode, returning in-memory result");
            return Ok(JobOutcome::Inspected(Box::new(ds)));
        }

        if let Some(dir) = write_file.parent() {
            debug!("attempting to create directory \"{}\"", dir.display());
            self.store.create_dir_all(dir)?;
        }

        let temp_file = PathConfig::temp_path(&write_file);
        debug!("writing to temporary file \"{}\"", temp_file.display());
        self.store.write(&ds, &temp_file)?;

        debug!("validating output");
        let test = self.store.open(&temp_file)?;
        validate_output(&test, &job.variable, &self.config.expected_shape).map_err(|source| {
            WorkflowError::Validation {
                path: temp_file.clone(),
                source,
            }
        })?;

        debug!(
            "validation complete. saving file in output location \"{}\"",
            write_file.display()
        );
        self.store.rename(&temp_file, &write_file)?;

        if self.config.sidecar {
            bcsd_io::write_sidecar(&ds, &write_file)?;
        }

        debug!("{job} - job done");
        Ok(JobOutcome::Published(write_file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filler::TimeBroadcastFiller;
    use bcsd_config::{ExpectedShape, PathConfig, Scenario};
    use bcsd_io::{Dataset, MemoryStore};

    fn job() -> JobParameters {
        JobParameters {
            model: "CCSM4".into(),
            scenario: Scenario::Historical,
            year: 1990,
            variable: "tasmax".into(),
        }
    }

    fn small_shape() -> ExpectedShape {
        ExpectedShape {
            lon: 2,
            lat: 2,
            time: 3,
        }
    }

    fn config() -> ReformatConfig {
        let mut config = ReformatConfig::new(PathConfig::new("/raw", "/out", "1.0"));
        config.expected_shape = small_shape();
        config
    }

    /// Source grid matching `small_shape`, with one null in tasmax.
    fn source_dataset() -> Dataset {
        let mut ds = Dataset::new();
        ds.add_dimension("lon", 2);
        ds.add_dimension("lat", 2);
        ds.add_dimension("time", 3);
        let mut data: Vec<f64> = (0..12).map(|i| 270.0 + i as f64).collect();
        data[5] = f64::NAN;
        ds.add_variable("tasmax", &["time", "lat", "lon"], data).unwrap();
        ds.variable_mut("tasmax")
            .unwrap()
            .attrs
            .insert("units".into(), "K".into());
        ds
    }

    fn seed_source(store: &MemoryStore, config: &ReformatConfig) -> std::path::PathBuf {
        let src = config.paths.source_path(&job()).unwrap();
        store.insert(&src, source_dataset());
        src
    }

    #[test]
    fn test_round_trip_publishes_filled_output() {
        let config = config();
        let store = MemoryStore::new();
        let src = seed_source(&store, &config);
        let filler = TimeBroadcastFiller::new();

        let outcome = Pipeline::new(&config, &store, &filler).process(&job()).unwrap();
        let JobOutcome::Published(path) = outcome else {
            panic!("expected Published");
        };
        assert_eq!(path, config.paths.destination_path(&job()).unwrap());

        let published = store.get(&path).unwrap();
        assert_eq!(published.null_count("tasmax").unwrap(), 0);
        assert_eq!(
            published.attrs.get("dependencies").map(String::as_str),
            Some(src.display().to_string().as_str())
        );
        assert_eq!(published.attrs.get("version").map(String::as_str), Some("1.0"));
        // Per-variable attrs survive the transform.
        assert_eq!(
            published
                .variable("tasmax")
                .unwrap()
                .attrs
                .get("units")
                .map(String::as_str),
            Some("K")
        );
        // The temporary file was renamed away and the directory created.
        assert!(!store.exists(&PathConfig::temp_path(&path)));
        assert!(store.has_dir(path.parent().unwrap()));
    }

    #[test]
    fn test_existing_destination_skips_without_reading() {
        let config = config();
        let store = MemoryStore::new();
        seed_source(&store, &config);
        let dst = config.paths.destination_path(&job()).unwrap();
        store.insert(&dst, source_dataset());
        let filler = TimeBroadcastFiller::new();

        let outcome = Pipeline::new(&config, &store, &filler).process(&job()).unwrap();
        assert!(matches!(outcome, JobOutcome::Skipped));
        assert_eq!(store.reads(), 0);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_force_republishes() {
        let config = config().with_force(true);
        let store = MemoryStore::new();
        seed_source(&store, &config);
        let dst = config.paths.destination_path(&job()).unwrap();
        store.insert(&dst, Dataset::new());
        let filler = TimeBroadcastFiller::new();

        let outcome = Pipeline::new(&config, &store, &filler).process(&job()).unwrap();
        assert!(matches!(outcome, JobOutcome::Published(_)));
        assert_eq!(store.get(&dst).unwrap().null_count("tasmax").unwrap(), 0);
    }

    #[test]
    fn test_interactive_returns_in_memory_result() {
        let config = config().interactive();
        let store = MemoryStore::new();
        seed_source(&store, &config);
        let filler = TimeBroadcastFiller::new();

        let outcome = Pipeline::new(&config, &store, &filler).process(&job()).unwrap();
        let JobOutcome::Inspected(ds) = outcome else {
            panic!("expected Inspected");
        };
        assert_eq!(ds.null_count("tasmax").unwrap(), 0);
        assert!(ds.attrs.contains_key("dependencies"));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_missing_source_is_fatal_for_the_job() {
        let config = config();
        let store = MemoryStore::new();
        let filler = TimeBroadcastFiller::new();

        let err = Pipeline::new(&config, &store, &filler).process(&job()).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingSource { .. }));
    }

    #[test]
    fn test_corrupt_source_is_fatal_for_the_job_only() {
        let config = config();
        let store = MemoryStore::new();
        let src = config.paths.source_path(&job()).unwrap();
        let mut corrupt = source_dataset();
        corrupt.variables.get_mut("tasmax").unwrap().data.truncate(2);
        store.insert(&src, corrupt);
        let filler = TimeBroadcastFiller::new();

        let err = Pipeline::new(&config, &store, &filler).process(&job()).unwrap_err();
        assert!(matches!(err, WorkflowError::MissingSource { .. }));
        assert!(!store.exists(&config.paths.destination_path(&job()).unwrap()));
    }

    #[test]
    fn test_validation_failure_never_publishes() {
        // Expect a different grid than the source provides.
        let mut config = config();
        config.expected_shape = ExpectedShape {
            lon: 2,
            lat: 2,
            time: 4,
        };
        let store = MemoryStore::new();
        seed_source(&store, &config);
        let filler = TimeBroadcastFiller::new();

        let err = Pipeline::new(&config, &store, &filler).process(&job()).unwrap_err();
        assert!(matches!(err, WorkflowError::Validation { .. }));

        let dst = config.paths.destination_path(&job()).unwrap();
        assert!(!store.exists(&dst));
        // The temporary file is left in place for inspection.
        assert!(store.exists(&PathConfig::temp_path(&dst)));
    }

    #[test]
    fn test_path_error_surfaces_before_io() {
        let mut config = config();
        config.paths.source_template = bcsd_config::PathTemplate::new("{epoch}/{model}.nc");
        let store = MemoryStore::new();
        let filler = TimeBroadcastFiller::new();

        let err = Pipeline::new(&config, &store, &filler).process(&job()).unwrap_err();
        assert!(matches!(err, WorkflowError::PathConstruction(_)));
        assert_eq!(store.reads(), 0);
        assert_eq!(store.writes(), 0);
    }
}
