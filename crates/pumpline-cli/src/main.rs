mod commands;
mod config;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pumpline",
    version,
    about = "Resumable file-to-file record pump"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a pipeline until the source drains
    Run {
        /// Path to pipeline YAML file
        pipeline: PathBuf,
    },
    /// Show checkpoint progress for a pipeline's source log
    Status {
        /// Path to pipeline YAML file
        pipeline: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&cli.log_level);

    match cli.command {
        Commands::Run { pipeline } => commands::run::execute(&pipeline),
        Commands::Status { pipeline } => commands::status::execute(&pipeline),
    }
}
