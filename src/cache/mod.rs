//! Local cache for normalized weather records
//!
//! Records are kept in one JSON document keyed by [`cache_key`], each entry
//! stamped with its write time. Freshness is decided at read time against the
//! per-type TTL table.

pub mod clock;
pub mod key;
pub mod manager;
pub mod storage;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::DataType;

/// Cache lifetimes in minutes, per data type.
///
/// Radar and satellite entries are carried for dashboard imagery consumers;
/// the resolver itself only serves the five record types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtlTable {
    pub alerts: u64,
    pub current_conditions: u64,
    pub forecast: u64,
    pub tropical: u64,
    pub radar: u64,
    pub satellite: u64,
    pub afd: u64,
}

impl Default for TtlTable {
    fn default() -> Self {
        Self {
            alerts: 2,
            current_conditions: 30,
            forecast: 120,
            tropical: 120,
            radar: 5,
            satellite: 15,
            afd: 180,
        }
    }
}

impl TtlTable {
    pub fn for_data_type(&self, data_type: DataType) -> Duration {
        let minutes = match data_type {
            DataType::CurrentConditions => self.current_conditions,
            DataType::Forecast => self.forecast,
            DataType::Alerts => self.alerts,
            DataType::Afd => self.afd,
            DataType::Tropical => self.tropical,
        };
        Duration::from_secs(minutes * 60)
    }

    /// Every configured lifetime, for display
    pub fn entries(&self) -> Vec<(&'static str, Duration)> {
        [
            ("alerts", self.alerts),
            ("currentConditions", self.current_conditions),
            ("forecast", self.forecast),
            ("tropical", self.tropical),
            ("radar", self.radar),
            ("satellite", self.satellite),
            ("afd", self.afd),
        ]
        .into_iter()
        .map(|(name, minutes)| (name, Duration::from_secs(minutes * 60)))
        .collect()
    }
}

pub use clock::{Clock, SystemClock};
pub use key::cache_key;
pub use manager::{CacheEntry, CacheManager, CacheStats};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
