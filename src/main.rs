//! CountyWX - county weather dashboard with tiered caching

use anyhow::Context;
use clap::{CommandFactory, Parser};

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod fetchers;
mod format;
mod models;
mod normalize;
mod output;
mod service;

use cli::{CacheCommands, Cli, CommandContext, Commands, GlobalOptions};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "countywx=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Version => {
            println!("countywx version {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Commands::Completion { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "countywx",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        Commands::Init { force } => {
            cli::init::run(&opts, force)?;
            return Ok(());
        }
        _ => {}
    }

    let ctx = CommandContext::new(&opts).context("failed to initialise")?;

    match cli.command {
        Commands::Current { location } => cli::weather::current(&ctx, &location).await?,
        Commands::Forecast { location, hourly } => {
            cli::weather::forecast(&ctx, &location, hourly).await?
        }
        Commands::Alerts { location } => cli::weather::alerts(&ctx, &location).await?,
        Commands::Afd { wfo, county } => {
            cli::weather::afd(&ctx, wfo.as_deref(), county.as_deref()).await?
        }
        Commands::Tropical { sub_type } => cli::weather::tropical(&ctx, sub_type).await?,
        Commands::Dashboard { county } => cli::weather::dashboard(&ctx, county.as_deref()).await?,
        Commands::Refresh {
            data_type,
            location,
            wfo,
            sub_type,
        } => cli::weather::refresh(&ctx, data_type, &location, wfo.as_deref(), sub_type).await?,
        Commands::Counties => cli::weather::counties(&ctx)?,
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => cli::cache::status(&ctx)?,
            CacheCommands::Clear => cli::cache::clear(&ctx)?,
            CacheCommands::Path => cli::cache::path(&ctx)?,
            CacheCommands::Ttl => cli::cache::ttl(&ctx)?,
        },
        Commands::Version | Commands::Completion { .. } | Commands::Init { .. } => {}
    }

    Ok(())
}
