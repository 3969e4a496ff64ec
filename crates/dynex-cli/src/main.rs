//! dynex CLI
//!
//! Snapshot VOSS tech files and diff them

use clap::{Parser, Subcommand};
use dynex_core::config::DynexConfig;
use dynex_core::errors::ExError;
use dynex_core::logging_facility::{self, Profile};
use dynex_core::{log_op_end, log_op_error, log_op_start};
use std::path::PathBuf;
use std::time::Instant;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "dynex")]
#[command(about = "dynex - Network device state snapshots and diffs", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = dynex_store::config::CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Emit JSON structured logs
    #[arg(long, global = true)]
    log_json: bool,

    /// Drop a command block left open at end of file
    #[arg(long, global = true)]
    discard_trailing: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build a snapshot from a tech file
    Analyze(commands::analyze::AnalyzeArgs),
    /// Diff the snapshots of two tech files
    Compare(commands::compare::CompareArgs),
    /// List the commands that have a registered parser
    Commands,
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Analyze(_) => "analyze",
            Commands::Compare(_) => "compare",
            Commands::Commands => "commands",
        }
    }
}

impl Cli {
    /// Configuration file values with command-line overrides applied
    fn resolve_config(&self) -> Result<DynexConfig, ExError> {
        let mut config = dynex_store::load_config(&self.config)?;
        if self.log_json {
            config.logging.profile = Profile::Production;
        }
        if self.discard_trailing {
            config.extract.flush_trailing_block = false;
        }
        Ok(config)
    }
}

fn run(cli: Cli) -> Result<(), ExError> {
    let config = cli.resolve_config()?;
    logging_facility::init(config.logging.profile);

    let command = cli.command.name();
    log_op_start!("cli", command = command);
    let start = Instant::now();

    let result = match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &config),
        Commands::Compare(args) => commands::compare::execute(args, &config),
        Commands::Commands => commands::list::execute(),
    };

    match &result {
        Ok(()) => {
            log_op_end!(
                "cli",
                duration_ms = start.elapsed().as_millis() as u64,
                command = command
            );
        }
        Err(e) => {
            log_op_error!(
                "cli",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                command = command
            );
        }
    }

    result
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
