//! Diff command
//!
//! Usage: ncpath diff --from <FILE> --to <FILE> [--path <PATH>] [--mode config|state]
//!
//! Prints nothing when both replies agree at the path.

use super::{parse_path, read_file, CliResult};
use clap::Args;
use ncpath_core::diff::unified_diff;
use ncpath_core::{project, ReadMode, Settings};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct DiffArgs {
    #[arg(long)]
    pub from: PathBuf,

    #[arg(long)]
    pub to: PathBuf,

    #[arg(long, default_value = "")]
    pub path: String,

    /// config or state
    #[arg(long, default_value = "config")]
    pub mode: String,
}

pub fn execute(args: DiffArgs, settings: &Settings) -> CliResult<()> {
    let path = parse_path(&args.path, settings)?;
    let mode: ReadMode = args.mode.parse()?;

    let before = project(&read_file(&args.from)?, &path, mode, None)?;
    let after = project(&read_file(&args.to)?, &path, mode, None)?;

    let diff = unified_diff(
        &before.to_pretty_json(),
        &after.to_pretty_json(),
        &args.from.display().to_string(),
        &args.to.display().to_string(),
    );
    print!("{}", diff);
    Ok(())
}
