//! Intent command
//!
//! Usage: ncpath intent --dir <DIR> --host <NAME> [--group <GROUP>]...

use super::CliResult;
use clap::Args;
use ncpath_core::{load_intent_with_separator, HostContext, Settings};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct IntentArgs {
    /// Directory of intent YAML files
    #[arg(long)]
    pub dir: PathBuf,

    #[arg(long)]
    pub host: String,

    /// Groups the host belongs to
    #[arg(long = "group")]
    pub groups: Vec<String>,
}

pub fn execute(args: IntentArgs, settings: &Settings) -> CliResult<()> {
    let host = args
        .groups
        .into_iter()
        .fold(HostContext::new(args.host), HostContext::with_group);
    let intents = load_intent_with_separator(&args.dir, &host, settings.separator)?;
    println!("{}", serde_json::to_string_pretty(&intents.to_node())?);
    Ok(())
}
