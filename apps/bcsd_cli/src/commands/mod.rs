// apps/bcsd_cli/src/commands/mod.rs

//! Subcommand modules and shared argument plumbing.

pub mod inspect;
pub mod list;
pub mod run;

use anyhow::{anyhow, bail, Context, Result};
use bcsd_config::{JobParameters, ParameterSpace, PathConfig, Scenario};
use bcsd_io::{DatasetStore, JsonStore};
use clap::Args;
use std::path::PathBuf;

/// Source/destination layout arguments shared by `run` and `inspect`.
#[derive(Args)]
pub struct LayoutArgs {
    /// Root of the raw BCSD archive
    #[arg(long)]
    pub source_root: PathBuf,

    /// Root of the reformatted output archive
    #[arg(long)]
    pub output_root: PathBuf,

    /// Output format version string
    #[arg(long, default_value = "1.0")]
    pub version: String,

    /// Storage backend: json, or netcdf when compiled in
    #[arg(long, default_value = "json")]
    pub store: String,
}

impl LayoutArgs {
    /// Build the path configuration.
    pub fn path_config(&self) -> PathConfig {
        PathConfig::new(&self.source_root, &self.output_root, &self.version)
    }

    /// Instantiate the selected storage backend.
    pub fn make_store(&self) -> Result<Box<dyn DatasetStore>> {
        match self.store.as_str() {
            "json" => Ok(Box::new(JsonStore::new())),
            #[cfg(feature = "netcdf")]
            "netcdf" => Ok(Box::new(bcsd_io::NetCdfStore::new())),
            #[cfg(not(feature = "netcdf"))]
            "netcdf" => bail!("this binary was built without NetCDF support"),
            other => bail!("unknown storage backend: {other}"),
        }
    }
}

/// Job selection arguments: a task index into the enumeration, or
/// parameter filters.
#[derive(Args)]
pub struct SelectArgs {
    /// Index into the enumerated job space (scheduler array-task style)
    #[arg(long, conflicts_with_all = ["model", "scenario", "year", "variable"])]
    pub task_id: Option<usize>,

    /// Restrict to one model
    #[arg(long)]
    pub model: Option<String>,

    /// Restrict to one scenario (historical, rcp45, rcp85)
    #[arg(long)]
    pub scenario: Option<Scenario>,

    /// Restrict to one year
    #[arg(long)]
    pub year: Option<u16>,

    /// Restrict to one variable
    #[arg(long)]
    pub variable: Option<String>,
}

impl SelectArgs {
    /// Jobs matching the selection, in enumeration order.
    pub fn select(&self, space: &ParameterSpace) -> Result<Vec<JobParameters>> {
        let jobs = space.enumerate();
        if let Some(id) = self.task_id {
            let job = jobs
                .get(id)
                .cloned()
                .ok_or_else(|| anyhow!("task id {id} out of range (space holds {} jobs)", jobs.len()))?;
            return Ok(vec![job]);
        }

        let selected: Vec<JobParameters> = jobs
            .into_iter()
            .filter(|j| self.model.as_ref().is_none_or(|m| *m == j.model))
            .filter(|j| self.scenario.is_none_or(|s| s == j.scenario))
            .filter(|j| self.year.is_none_or(|y| y == j.year))
            .filter(|j| self.variable.as_ref().is_none_or(|v| *v == j.variable))
            .collect();
        if selected.is_empty() {
            bail!("no jobs match the selection");
        }
        Ok(selected)
    }

    /// Exactly one job, for `inspect`.
    pub fn select_one(&self, space: &ParameterSpace) -> Result<JobParameters> {
        let mut jobs = self.select(space)?;
        if jobs.len() != 1 {
            bail!(
                "selection matches {} jobs; give --task-id or all of --model --scenario --year --variable",
                jobs.len()
            );
        }
        Ok(jobs.remove(0))
    }
}

/// The parameter space, from a JSON file or the built-in BCSD space.
pub fn load_space(path: Option<&PathBuf>) -> Result<ParameterSpace> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading parameter space {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing parameter space {}", path.display()))
        }
        None => Ok(ParameterSpace::bcsd_v1()),
    }
}
