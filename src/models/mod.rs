//! Canonical data model shared by the cache, normalizers and renderers
//!
//! Raw upstream shapes live in [`crate::client::models`]; everything in this
//! module is what a consumer sees after normalization.

mod params;
mod reading;
mod records;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use params::Params;
pub use reading::{NOT_AVAILABLE, Reading};
pub use records::{
    AlertProperties, AlertRecord, Alerts, AreaForecastDiscussion, CurrentConditions, Forecast,
    NormalizedRecord, Period, Storm, TropicalRecord,
};

/// Data types served by the resolver
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum DataType {
    /// Latest observed conditions
    #[value(name = "current")]
    CurrentConditions,
    /// Daily and hourly forecast periods
    Forecast,
    /// Active watches, warnings and advisories
    Alerts,
    /// Area forecast discussion text
    Afd,
    /// Tropical cyclones and outlooks
    Tropical,
}

impl DataType {
    pub const ALL: [DataType; 5] = [
        DataType::CurrentConditions,
        DataType::Forecast,
        DataType::Alerts,
        DataType::Afd,
        DataType::Tropical,
    ];

    /// Wire name, also used as the cache key prefix
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::CurrentConditions => "currentConditions",
            DataType::Forecast => "forecast",
            DataType::Alerts => "alerts",
            DataType::Afd => "afd",
            DataType::Tropical => "tropical",
        }
    }

    /// Recover the data type from a computed cache key.
    pub fn from_cache_key(key: &str) -> Option<Self> {
        let prefix = key.split('_').next()?;
        prefix.parse().ok()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DataType::ALL
            .into_iter()
            .find(|dt| dt.as_str() == s)
            .ok_or_else(|| format!("unknown data type `{}`", s))
    }
}

/// Tropical products, each with its own snapshot file and live source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "camelCase")]
pub enum TropicalSubType {
    /// Currently tracked cyclones
    #[value(name = "storms")]
    ActiveStorms,
    /// Atlantic tropical weather outlook
    #[value(name = "atlantic")]
    AtlanticOutlook,
    /// Eastern Pacific tropical weather outlook
    #[value(name = "pacific")]
    PacificOutlook,
}

impl TropicalSubType {
    pub const ALL: [TropicalSubType; 3] = [
        TropicalSubType::ActiveStorms,
        TropicalSubType::AtlanticOutlook,
        TropicalSubType::PacificOutlook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TropicalSubType::ActiveStorms => "activeStorms",
            TropicalSubType::AtlanticOutlook => "atlanticOutlook",
            TropicalSubType::PacificOutlook => "pacificOutlook",
        }
    }

    /// Fixed snapshot filename for the subtype
    pub fn snapshot_file(&self) -> &'static str {
        match self {
            TropicalSubType::ActiveStorms => "tropical_storms.json",
            TropicalSubType::AtlanticOutlook => "tropical_outlook_atlantic.json",
            TropicalSubType::PacificOutlook => "tropical_outlook_pacific.json",
        }
    }

    pub fn is_outlook(&self) -> bool {
        !matches!(self, TropicalSubType::ActiveStorms)
    }
}

impl fmt::Display for TropicalSubType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TropicalSubType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TropicalSubType::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| format!("unknown tropical subtype `{}`", s))
    }
}
