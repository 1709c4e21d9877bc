// apps/bcsd_cli/src/commands/list.rs

//! Print the enumerated job space.

use super::load_space;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// List command arguments.
#[derive(Args)]
pub struct ListArgs {
    /// Parameter space JSON file (defaults to the built-in BCSD space)
    #[arg(long)]
    pub space: Option<PathBuf>,

    /// Print jobs as JSON lines instead of display form
    #[arg(long)]
    pub json: bool,

    /// Print at most this many jobs
    #[arg(long)]
    pub limit: Option<usize>,
}

/// Execute the list command.
pub fn execute(args: ListArgs) -> Result<()> {
    let space = load_space(args.space.as_ref())?;
    let jobs = space.enumerate();
    let shown = args.limit.unwrap_or(jobs.len()).min(jobs.len());

    for (id, job) in jobs.iter().take(shown).enumerate() {
        if args.json {
            println!("{}", serde_json::to_string(job)?);
        } else {
            println!("{id:6}  {job}");
        }
    }
    eprintln!(
        "{} of {} jobs ({} models x {} periods x {} variables)",
        shown,
        jobs.len(),
        space.models.len(),
        space.periods.len(),
        space.variables.len()
    );
    Ok(())
}
