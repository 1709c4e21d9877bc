// apps/bcsd_cli/src/commands/inspect.rs

//! Run one job interactively and print the in-memory result.
//!
//! Nothing is written to disk on this path; it exists for manual
//! debugging of a single job.

use super::{load_space, LayoutArgs, SelectArgs};
use anyhow::{bail, Result};
use bcsd_config::ReformatConfig;
use bcsd_io::render_header;
use bcsd_workflow::{JobOutcome, Pipeline, TimeBroadcastFiller};
use clap::Args;
use std::path::PathBuf;

/// Inspect command arguments.
#[derive(Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub layout: LayoutArgs,

    #[command(flatten)]
    pub select: SelectArgs,

    /// Parameter space JSON file (defaults to the built-in BCSD space)
    #[arg(long)]
    pub space: Option<PathBuf>,
}

/// Execute the inspect command.
pub fn execute(args: InspectArgs) -> Result<()> {
    let space = load_space(args.space.as_ref())?;
    let job = args.select.select_one(&space)?;

    let config = ReformatConfig::new(args.layout.path_config()).interactive();
    config.validate()?;

    let store = args.layout.make_store()?;
    let filler = TimeBroadcastFiller::new();
    let pipeline = Pipeline::new(&config, store.as_ref(), &filler);

    match pipeline.process(&job)? {
        JobOutcome::Inspected(ds) => {
            println!("job: {job}");
            for dim in &ds.dims {
                println!("dim {}: {}", dim.name, dim.len);
            }
            for (name, var) in &ds.variables {
                println!(
                    "var {name}: {} values, {} nulls",
                    var.len(),
                    var.null_count()
                );
            }
            print!("{}", render_header(&ds));
            Ok(())
        }
        other => bail!("interactive run returned unexpected outcome: {other:?}"),
    }
}
