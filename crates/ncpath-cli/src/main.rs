//! ncpath CLI
//!
//! Offline front-end for the ncpath engine: compile filters, project saved
//! replies, compose edit payloads, diff replies and resolve intents.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "ncpath")]
#[command(about = "ncpath - path-addressed NETCONF payloads", long_about = None)]
struct Cli {
    /// Settings file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compile a path into a read filter
    Filter(commands::filter::FilterArgs),
    /// Project a saved reply onto a path
    Project(commands::project::ProjectArgs),
    /// Compose an edit-config payload from an update file
    Compose(commands::compose::ComposeArgs),
    /// Diff two saved replies at a path
    Diff(commands::diff::DiffArgs),
    /// Resolve the intents for a host
    Intent(commands::intent::IntentArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = commands::load_settings(cli.config.as_deref()).and_then(|settings| {
        ncpath_core::logging_facility::init(settings.logging.profile);
        match cli.command {
            Commands::Filter(args) => commands::filter::execute(args, &settings),
            Commands::Project(args) => commands::project::execute(args, &settings),
            Commands::Compose(args) => commands::compose::execute(args, &settings),
            Commands::Diff(args) => commands::diff::execute(args, &settings),
            Commands::Intent(args) => commands::intent::execute(args, &settings),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
