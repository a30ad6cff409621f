//! Project command
//!
//! Usage: ncpath project --reply <FILE> [--path <PATH>] [--mode config|state]
//!        [--depth <N>] [--exclude <KEY>]... [--raw]

use super::{parse_path, read_file, CliResult};
use clap::Args;
use ncpath_core::{project, project_raw, ReadMode, ReduceSpec, Settings};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// File holding the <rpc-reply> XML
    #[arg(long)]
    pub reply: PathBuf,

    #[arg(long, default_value = "")]
    pub path: String,

    /// config or state
    #[arg(long, default_value = "config")]
    pub mode: String,

    /// Maximum nesting depth of the result (0 = unlimited)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Keys to drop at every level
    #[arg(long)]
    pub exclude: Vec<String>,

    /// Print the reply body without stripping or navigation
    #[arg(long)]
    pub raw: bool,
}

pub fn execute(args: ProjectArgs, settings: &Settings) -> CliResult<()> {
    let reply = read_file(&args.reply)?;

    let node = if args.raw {
        project_raw(&reply)?
    } else {
        let path = parse_path(&args.path, settings)?;
        let mode: ReadMode = args.mode.parse()?;
        let mut spec = ReduceSpec::new();
        spec.max_depth = args.depth;
        for key in args.exclude {
            spec = spec.exclude(key);
        }
        project(&reply, &path, mode, Some(&spec))?
    };

    println!("{}", serde_json::to_string_pretty(&node)?);
    Ok(())
}
