//! Argument groups shared across commands

use clap::Args;

use crate::cli::Cli;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - coloured, human-oriented
    #[default]
    Pretty,
    /// Table format - one row per entry
    Table,
    /// JSON format - structured for scripts
    Json,
}

/// Where to fetch county-scoped data for.
///
/// `--lat/--lon` win over the county's configured coordinates; the county
/// name is still used for snapshot file lookup when given.
#[derive(Debug, Clone, Default, Args)]
pub struct LocationArgs {
    /// County name from the config file (defaults to the first configured county)
    #[arg(long, short = 'c')]
    pub county: Option<String>,

    /// Latitude override
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude override
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,
}

/// Global CLI options passed to every command handler
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.countywx/config.yaml)
    pub config: Option<String>,

    /// Keep the cache in memory for this run only
    pub no_cache: bool,
}

impl GlobalOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            no_cache: cli.no_cache,
        }
    }

    pub fn config_path(&self) -> Option<&str> {
        self.config.as_deref()
    }
}
