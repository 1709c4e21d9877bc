// apps/bcsd_cli/src/main.rs

//! BCSD reformatting command line.
//!
//! Under the batch scheduler each cluster task invokes `run` for its slice
//! of the job space; `inspect` exercises the interactive path for manual
//! debugging and `list` prints the enumerated job space.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// BCSD hole-filling reformatter.
#[derive(Parser)]
#[command(name = "bcsd_cli")]
#[command(author = "Climate Transforms Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reformat BCSD raw data to fill holes", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "debug")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process jobs and publish outputs
    Run(commands::run::RunArgs),
    /// Print the enumerated job space
    List(commands::list::ListArgs),
    /// Run one job interactively and print the in-memory result
    Inspect(commands::inspect::InspectArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::DEBUG,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::List(args) => commands::list::execute(args),
        Commands::Inspect(args) => commands::inspect::execute(args),
    }
}
