pub mod compose;
pub mod diff;
pub mod filter;
pub mod intent;
pub mod project;

use ncpath_core::{Path, Settings};

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Settings from `--config`, or the defaults when none is given
pub fn load_settings(config: Option<&std::path::Path>) -> CliResult<Settings> {
    match config {
        Some(file) => Ok(Settings::load(file)?),
        None => Ok(Settings::default()),
    }
}

pub fn parse_path(raw: &str, settings: &Settings) -> CliResult<Path> {
    Ok(Path::parse_with_separator(raw, settings.separator)?)
}

pub fn read_file(file: &std::path::Path) -> CliResult<String> {
    std::fs::read_to_string(file).map_err(|e| format!("cannot read {}: {}", file.display(), e).into())
}
