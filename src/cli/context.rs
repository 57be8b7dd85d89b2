//! Command execution context
//!
//! Loads configuration once, opens the cache store and wires the weather
//! data service so handlers only deal with parameters and rendering.

use std::sync::Arc;

use log::{debug, warn};

use crate::cache::{KeyValueStore, MemoryStore, SqliteStore};
use crate::cli::{GlobalOptions, LocationArgs, OutputFormat};
use crate::config::{Config, County};
use crate::error::{ConfigError, Result};
use crate::models::Params;
use crate::service::WeatherDataService;

/// Context for command execution containing config, service and output format
pub struct CommandContext {
    pub config: Config,
    pub service: WeatherDataService,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config from the given (or default) path and build the service.
    ///
    /// With `--no-cache` the service gets a process-local store, so nothing
    /// read or written survives the run.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_path())?;
        let store = open_store(opts.no_cache);
        let service = WeatherDataService::from_config(&config.service, store)?;

        Ok(Self {
            config,
            service,
            format: opts.format,
        })
    }

    /// The named county, or the first configured one
    pub fn county(&self, name: Option<&str>) -> Result<&County> {
        match name {
            Some(name) => Ok(self.config.county(name)?),
            None => self.config.counties.first().ok_or_else(|| {
                ConfigError::Invalid("no counties configured".to_string()).into()
            }),
        }
    }

    /// Params for county-scoped data
    pub fn location_params(&self, args: &LocationArgs) -> Result<Params> {
        match (args.lat, args.lon) {
            (Some(lat), Some(lon)) => {
                let mut params = Params::new().with("lat", lat).with("lon", lon);
                if let Some(county) = args.county.as_deref() {
                    params.insert("county", county.trim());
                }
                Ok(params)
            }
            _ => {
                let county = self.county(args.county.as_deref())?;
                Ok(Params::location(&county.name, county.lat, county.lon))
            }
        }
    }

    /// Params for the discussion of an explicit office, or a county's office
    pub fn office_params(&self, wfo: Option<&str>, county: Option<&str>) -> Result<Params> {
        match wfo.map(str::trim).filter(|w| !w.is_empty()) {
            Some(wfo) => Ok(Params::office(&wfo.to_ascii_uppercase())),
            None => Ok(Params::office(&self.county(county)?.wfo)),
        }
    }
}

fn open_store(no_cache: bool) -> Arc<dyn KeyValueStore> {
    if no_cache {
        debug!("Cache disabled for this run, using in-memory store");
        return Arc::new(MemoryStore::new());
    }

    match SqliteStore::open() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!("Cache unavailable ({}), using in-memory store", e);
            Arc::new(MemoryStore::new())
        }
    }
}
