//! Filter command
//!
//! Usage: ncpath filter --path <PATH> [--mode config|state]

use super::{parse_path, CliResult};
use clap::Args;
use ncpath_core::{compile_filter, ReadMode, Settings};

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Path to address, e.g. router/interface/interface-name=to_sr2
    #[arg(long, default_value = "")]
    pub path: String,

    /// config or state
    #[arg(long, default_value = "config")]
    pub mode: String,
}

pub fn execute(args: FilterArgs, settings: &Settings) -> CliResult<()> {
    let path = parse_path(&args.path, settings)?;
    let mode: ReadMode = args.mode.parse()?;
    let filter = compile_filter(&path, mode, &settings.namespaces)?;
    println!("{}", filter);
    Ok(())
}
