//! Tiered weather data resolution
//!
//! [`WeatherDataService`] answers `get_data(data_type, params)` by trying, in
//! strict order, the local cache, the snapshot bases, and the live APIs. The
//! first tier to produce a valid record wins; lower-tier results are written
//! back to the cache. When every tier misses, a typed fallback record is
//! returned and nothing is cached.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, info, warn};

use crate::cache::{CacheManager, KeyValueStore};
use crate::client::{HttpTransport, RawRecord, WeatherTransport, join_location};
use crate::config::ServiceConfig;
use crate::error::{FetchError, TierMiss};
use crate::fetchers::{DomainFetcher, FetcherSet};
use crate::models::{DataType, NormalizedRecord, Params};
use crate::normalize::{fallback, normalize};

/// The three data sources, in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    LocalCache,
    Snapshot,
    LiveApi,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::LocalCache => "local cache",
            Tier::Snapshot => "snapshot",
            Tier::LiveApi => "live API",
        })
    }
}

pub struct WeatherDataService {
    cache: CacheManager,
    transport: Arc<dyn WeatherTransport>,
    fetchers: FetcherSet,
    snapshot_bases: Vec<String>,
}

impl WeatherDataService {
    pub fn new(
        config: &ServiceConfig,
        cache: CacheManager,
        transport: Arc<dyn WeatherTransport>,
    ) -> Self {
        let fetchers = FetcherSet::new(&config.endpoints, cache.clock());
        Self {
            cache,
            transport,
            fetchers,
            snapshot_bases: config.snapshot_bases.clone(),
        }
    }

    /// Wire up the production HTTP transport
    pub fn from_config(
        config: &ServiceConfig,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, FetchError> {
        let transport = HttpTransport::new(
            &config.user_agent,
            Duration::from_secs(config.request_timeout_secs),
            config.requests_per_second,
        )?;
        let cache = CacheManager::new(store, config.ttl);
        Ok(Self::new(config, cache, Arc::new(transport)))
    }

    pub fn cache(&self) -> &CacheManager {
        &self.cache
    }

    /// Resolve a record, starting from the local cache. Never fails.
    pub async fn get_data(&self, data_type: DataType, params: &Params) -> NormalizedRecord {
        self.resolve(data_type, params, true).await
    }

    /// Resolve a record, skipping the local cache. Never fails.
    pub async fn force_refresh(&self, data_type: DataType, params: &Params) -> NormalizedRecord {
        self.resolve(data_type, params, false).await
    }

    /// Drop every cached record
    pub fn clear_cache(&self) {
        info!("Clearing weather data cache");
        self.cache.clear();
    }

    /// Resolve independent requests concurrently, results in request order
    pub async fn get_many(&self, requests: &[(DataType, Params)]) -> Vec<NormalizedRecord> {
        join_all(
            requests
                .iter()
                .map(|(data_type, params)| self.get_data(*data_type, params)),
        )
        .await
    }

    async fn resolve(&self, data_type: DataType, params: &Params, use_cache: bool) -> NormalizedRecord {
        if use_cache {
            match self.read_cache(data_type, params) {
                Ok(record) => {
                    debug!("{} served from {}", data_type, Tier::LocalCache);
                    return record;
                }
                Err(miss) => log_miss(Tier::LocalCache, data_type, &miss),
            }
        }

        let fetcher = self.fetchers.get(data_type);

        match self.read_snapshot(fetcher, params).await {
            Ok(record) => return self.store(data_type, params, record, Tier::Snapshot),
            Err(miss) => log_miss(Tier::Snapshot, data_type, &miss),
        }

        match self.read_live(fetcher, params).await {
            Ok(record) => return self.store(data_type, params, record, Tier::LiveApi),
            Err(miss) => log_miss(Tier::LiveApi, data_type, &miss),
        }

        warn!("All sources failed for {}, using fallback record", data_type);
        fallback(data_type, params)
    }

    fn store(
        &self,
        data_type: DataType,
        params: &Params,
        record: NormalizedRecord,
        tier: Tier,
    ) -> NormalizedRecord {
        debug!("{} served from {}", data_type, tier);
        self.cache.write(data_type, params, &record);
        record
    }

    fn read_cache(&self, data_type: DataType, params: &Params) -> Result<NormalizedRecord, TierMiss> {
        let value = self.cache.read(data_type, params).ok_or(TierMiss::CacheMiss)?;
        let raw = RawRecord::from_cached(data_type, value)?;
        Ok(normalize(raw))
    }

    /// First snapshot base that answers wins; a malformed answer ends the tier
    async fn read_snapshot(
        &self,
        fetcher: &dyn DomainFetcher,
        params: &Params,
    ) -> Result<NormalizedRecord, TierMiss> {
        let file = fetcher.snapshot_file(params)?;
        let mut last_miss = TierMiss::Fetch(FetchError::NotFound(file.clone()));

        for base in &self.snapshot_bases {
            let location = join_location(base, &file);
            match self.transport.get_json(&location).await {
                Ok(value) => {
                    let raw = fetcher.decode_snapshot(params, value)?;
                    debug!("Decoded {} snapshot from {}", raw.data_type(), location);
                    return Ok(normalize(raw));
                }
                Err(e) => {
                    debug!("Snapshot {} unavailable: {}", location, e);
                    last_miss = e.into();
                }
            }
        }
        Err(last_miss)
    }

    async fn read_live(
        &self,
        fetcher: &dyn DomainFetcher,
        params: &Params,
    ) -> Result<NormalizedRecord, TierMiss> {
        let raw = fetcher.fetch_live(self.transport.as_ref(), params).await?;
        debug!("Decoded {} from {:?}", raw.data_type(), raw.source());
        Ok(normalize(raw))
    }
}

fn log_miss(tier: Tier, data_type: DataType, miss: &TierMiss) {
    if miss.is_absent() {
        debug!("{} miss for {}: {}", tier, data_type, miss);
    } else {
        warn!("{} failed for {}: {}", tier, data_type, miss);
    }
}
