//! Compose command
//!
//! Usage: ncpath compose --update <FILE> [--path <PATH>]
//!
//! The update file is JSON when it ends in `.json`, YAML otherwise.

use super::{parse_path, read_file, CliResult};
use clap::Args;
use ncpath_core::{compose_config, Node, Settings};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ComposeArgs {
    /// Partial update for the addressed node
    #[arg(long)]
    pub update: PathBuf,

    #[arg(long, default_value = "")]
    pub path: String,
}

pub fn execute(args: ComposeArgs, settings: &Settings) -> CliResult<()> {
    let path = parse_path(&args.path, settings)?;
    let text = read_file(&args.update)?;

    let update: Node = match args.update.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&text)?,
        _ => serde_yaml::from_str(&text)?,
    };

    println!("{}", compose_config(&update, &path, &settings.namespaces)?);
    Ok(())
}
