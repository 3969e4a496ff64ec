//! Analyze command
//!
//! Usage: dynex analyze <TECHFILE> [--output <PATH>] [--commands]

use clap::Args;
use dynex_core::{DynexConfig, TechFile};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Tech file to read
    pub techfile: PathBuf,

    /// Output directory or file (default: current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Also list the parsed commands found in the file
    #[arg(long)]
    pub commands: bool,
}

pub fn execute(args: AnalyzeArgs, config: &DynexConfig) -> super::CommandResult {
    let table = super::build_snapshot(&args.techfile, config)?;
    let written = dynex_store::save_snapshot(&table, &args.output)?;

    println!("Snapshot written to {}", written.display());
    for (kind, count) in table.kind_counts() {
        println!("  {}: {}", kind, count);
    }

    if args.commands {
        let outputs = TechFile::new(&args.techfile)
            .with_options(config.extract)
            .read(dynex_voss::registry())?;
        println!("Commands:");
        for (command, output) in &outputs {
            println!("  {} ({} identities)", command, output.len());
        }
    }

    Ok(())
}
