// apps/bcsd_cli/src/commands/run.rs

//! Process jobs and publish outputs.

use super::{load_space, LayoutArgs, SelectArgs};
use anyhow::{bail, Result};
use bcsd_config::ReformatConfig;
use bcsd_workflow::{JobRunner, Pipeline, SerialRunner, TimeBroadcastFiller};
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Run command arguments.
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    #[command(flatten)]
    pub select: SelectArgs,

    /// Parameter space JSON file (defaults to the built-in BCSD space)
    #[arg(long)]
    pub space: Option<PathBuf>,

    /// Re-publish even when the destination already exists
    #[arg(long)]
    pub force: bool,

    /// Write a plain-text attribute header next to each published file
    #[arg(long)]
    pub sidecar: bool,
}

/// Execute the run command.
pub fn execute(args: RunArgs) -> Result<()> {
    let space = load_space(args.space.as_ref())?;
    let jobs = args.select.select(&space)?;

    let config = ReformatConfig::new(args.layout.path_config())
        .with_force(args.force)
        .with_sidecar(args.sidecar);
    config.validate()?;

    let store = args.layout.make_store()?;
    let filler = TimeBroadcastFiller::new();
    let pipeline = Pipeline::new(&config, store.as_ref(), &filler);

    info!("processing {} job(s)", jobs.len());
    let report = SerialRunner::new().run(&jobs, &|job| pipeline.process(job));

    if !report.is_clean() {
        for (job, err) in &report.failed {
            eprintln!("FAILED {job}: {err}");
        }
        bail!("{} of {} jobs failed", report.failed.len(), report.total());
    }
    Ok(())
}
