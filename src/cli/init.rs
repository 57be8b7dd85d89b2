//! Init command implementation

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Write the built-in configuration to `--config` or the default path
pub fn run(opts: &GlobalOptions, force: bool) -> Result<()> {
    let path = match opts.config_path() {
        Some(path) => PathBuf::from(path),
        None => Config::default_path()?,
    };

    write_default(&path, force)?;

    println!("{} {}", "✓ Wrote configuration to".green(), path.display());
    println!("Edit the counties list or endpoints there, then run `countywx dashboard`.");
    Ok(())
}

fn write_default(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.display().to_string()).into());
    }
    Config::default().save_to(path)
}
