//! Compare command
//!
//! Usage: dynex compare <OLD> <NEW> [--mapping <FILE>] [--output <PATH>] [--summary]

use clap::Args;
use dynex_core::compare::{compute_diff, render_human_summary};
use dynex_core::DynexConfig;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Tech file of the older snapshot
    pub old: PathBuf,

    /// Tech file of the newer snapshot
    pub new: PathBuf,

    /// Key mapping document (.json, .yaml or .yml)
    #[arg(short, long)]
    pub mapping: Option<PathBuf>,

    /// Output directory or file (default: current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Print a human-readable summary of the differences
    #[arg(long)]
    pub summary: bool,
}

pub fn execute(args: CompareArgs, config: &DynexConfig) -> super::CommandResult {
    let mapping = args
        .mapping
        .as_deref()
        .map(dynex_store::load_mapping)
        .transpose()?;

    let old = super::build_snapshot(&args.old, config)?;
    let new = super::build_snapshot(&args.new, config)?;

    let report = compute_diff(&old, &new, mapping.as_ref())?;
    let written = dynex_store::save_report(&report, &args.output)?;

    println!("Diff written to {}", written.display());
    println!("  changes: {}", report.change_count());

    if args.summary {
        print!("{}", render_human_summary(&report));
    }

    Ok(())
}
