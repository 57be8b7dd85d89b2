//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use crate::models::{DataType, TropicalSubType};

pub mod args;
pub mod cache;
pub mod context;
pub mod init;
pub mod weather;

pub use args::{GlobalOptions, LocationArgs, OutputFormat};
pub use context::CommandContext;

/// CountyWX - county weather dashboard for the terminal
#[derive(Parser, Debug)]
#[command(name = "countywx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "COUNTYWX_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "COUNTYWX_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "COUNTYWX_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Use a throwaway in-memory cache for this run
    #[arg(long, global = true, env = "COUNTYWX_NO_CACHE", hide_env = true)]
    pub no_cache: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show current conditions
    #[command(visible_alias = "now")]
    Current {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Show the daily forecast
    Forecast {
        #[command(flatten)]
        location: LocationArgs,

        /// Show the next 24 hourly periods instead of the daily forecast
        #[arg(long)]
        hourly: bool,
    },

    /// Show active watches, warnings and advisories
    Alerts {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Show the area forecast discussion
    Afd {
        /// Forecast office (e.g. MHX); defaults to the county's office
        #[arg(long, short = 'w')]
        wfo: Option<String>,

        /// County whose forecast office to use
        #[arg(long, short = 'c', conflicts_with = "wfo")]
        county: Option<String>,
    },

    /// Show tropical cyclones or an outlook
    Tropical {
        /// What to show: storms, atlantic, pacific
        #[arg(value_enum, default_value = "storms")]
        sub_type: TropicalSubType,
    },

    /// Conditions, forecast, alerts and discussion for one county at once
    #[command(
        visible_alias = "d",
        after_help = "EXAMPLES:\n  \
            countywx dashboard                 # First configured county\n  \
            countywx dashboard --county Craven\n  \
            countywx dashboard --format json"
    )]
    Dashboard {
        /// County name from the config file
        #[arg(long, short = 'c')]
        county: Option<String>,
    },

    /// Re-fetch one data type, bypassing fresh cache entries
    #[command(after_help = "EXAMPLES:\n  \
        countywx refresh alerts --county Pitt\n  \
        countywx refresh afd --wfo MHX\n  \
        countywx refresh tropical --sub-type atlantic")]
    Refresh {
        /// Data type to refresh
        #[arg(value_enum)]
        data_type: DataType,

        #[command(flatten)]
        location: LocationArgs,

        /// Forecast office for `afd`
        #[arg(long, short = 'w')]
        wfo: Option<String>,

        /// Tropical product for `tropical`
        #[arg(long, value_enum, default_value = "storms")]
        sub_type: TropicalSubType,
    },

    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// List configured counties
    Counties,

    /// Manage the local weather cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Install:
  bash:   countywx completion bash > /etc/bash_completion.d/countywx
  zsh:    countywx completion zsh > \"${fpath[1]}/_countywx\"
  fish:   countywx completion fish > ~/.config/fish/completions/countywx.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear all cached data
    Clear,
    /// Print where the cache is stored
    Path,
    /// Show cache lifetimes per data type
    Ttl,
}
