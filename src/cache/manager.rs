//! TTL-aware cache over a [`KeyValueStore`]

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::key::cache_key;
use super::storage::KeyValueStore;
use super::TtlTable;
use crate::error::CacheError;
use crate::models::{DataType, NormalizedRecord, Params};

/// Item name under which the whole cache document is persisted
pub const STORE_ITEM: &str = "countywx.weatherDataCache";

/// One cached record and its write time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: serde_json::Value,
    /// Epoch milliseconds
    pub timestamp: i64,
}

type CacheMap = BTreeMap<String, CacheEntry>;

/// Snapshot of cache contents for `cache status`
#[derive(Debug, Default, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub location: String,
    pub total_entries: usize,
    pub fresh_entries: usize,
    pub stale_entries: usize,
    pub size_bytes: usize,
    pub by_type: BTreeMap<String, usize>,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}

/// Reads and writes normalized records with per-type freshness.
///
/// Storage faults never surface to callers: an unreadable document is
/// treated as empty and overwritten on the next write.
pub struct CacheManager {
    store: Arc<dyn KeyValueStore>,
    ttl: TtlTable,
    clock: Arc<dyn Clock>,
}

impl CacheManager {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl: TtlTable) -> Self {
        Self::with_clock(store, ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn KeyValueStore>, ttl: TtlTable, clock: Arc<dyn Clock>) -> Self {
        Self { store, ttl, clock }
    }

    /// Shared time source, so records fetched now match cache stamps
    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    pub fn ttl(&self) -> &TtlTable {
        &self.ttl
    }

    pub fn compute_key(&self, data_type: DataType, params: &Params) -> String {
        cache_key(data_type, params)
    }

    /// Fresh cached JSON for the request, if any
    pub fn read(&self, data_type: DataType, params: &Params) -> Option<serde_json::Value> {
        let key = self.compute_key(data_type, params);
        let mut map = self.load();
        let entry = map.remove(&key)?;

        if self.is_fresh(data_type, &entry) {
            Some(entry.data)
        } else {
            debug!("Cache entry {} is stale", key);
            None
        }
    }

    /// Store a record under the request's key, stamped now
    pub fn write(&self, data_type: DataType, params: &Params, record: &NormalizedRecord) {
        let data = match serde_json::to_value(record) {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to serialize {} record for cache: {}", data_type, e);
                return;
            }
        };

        let key = self.compute_key(data_type, params);
        let mut map = self.load();
        map.insert(
            key,
            CacheEntry {
                data,
                timestamp: self.clock.now_ms(),
            },
        );
        self.persist(&map);
    }

    /// Remove every entry
    pub fn clear(&self) {
        if let Err(e) = self.store.remove_item(STORE_ITEM) {
            warn!("Failed to clear cache: {}", e);
        }
    }

    pub fn stats(&self) -> CacheStats {
        let raw = self.raw_document().unwrap_or_default();
        let map = parse_document(&raw).unwrap_or_default();

        let mut stats = CacheStats {
            location: self.store.location(),
            total_entries: map.len(),
            size_bytes: raw.len(),
            ..CacheStats::default()
        };

        for (key, entry) in &map {
            let fresh = DataType::from_cache_key(key)
                .map(|dt| self.is_fresh(dt, entry))
                .unwrap_or(false);
            if fresh {
                stats.fresh_entries += 1;
            } else {
                stats.stale_entries += 1;
            }

            let type_name = key.split('_').next().unwrap_or(key).to_string();
            *stats.by_type.entry(type_name).or_default() += 1;

            stats.oldest_entry = Some(
                stats
                    .oldest_entry
                    .map_or(entry.timestamp, |t| t.min(entry.timestamp)),
            );
            stats.newest_entry = Some(
                stats
                    .newest_entry
                    .map_or(entry.timestamp, |t| t.max(entry.timestamp)),
            );
        }
        stats
    }

    /// Fresh while `now - timestamp < ttl`; entries from the future are stale
    fn is_fresh(&self, data_type: DataType, entry: &CacheEntry) -> bool {
        let ttl_ms = self.ttl.for_data_type(data_type).as_millis() as i64;
        let age = self.clock.now_ms() - entry.timestamp;
        (0..ttl_ms).contains(&age)
    }

    fn raw_document(&self) -> Option<String> {
        match self.store.get_item(STORE_ITEM) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Cache storage unreadable: {}", e);
                None
            }
        }
    }

    fn load(&self) -> CacheMap {
        let Some(raw) = self.raw_document() else {
            return CacheMap::new();
        };
        parse_document(&raw).unwrap_or_else(|e| {
            warn!("Discarding corrupt cache document: {}", e);
            CacheMap::new()
        })
    }

    fn persist(&self, map: &CacheMap) {
        let result = serde_json::to_string(map)
            .map_err(|e| CacheError::Io(e.to_string()))
            .and_then(|doc| self.store.set_item(STORE_ITEM, &doc));

        if let Err(e) = result {
            warn!("Failed to persist cache, resetting: {}", e);
            if let Err(e) = self.store.remove_item(STORE_ITEM) {
                warn!("Failed to reset cache storage: {}", e);
            }
        }
    }
}

fn parse_document(raw: &str) -> Result<CacheMap, serde_json::Error> {
    serde_json::from_str(raw)
}
