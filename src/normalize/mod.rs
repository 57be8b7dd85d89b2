//! Raw records to canonical records
//!
//! Normalization is total over [`RawRecord`]: every tagged shape maps to a
//! complete record with `"N/A"` or a typed default standing in for missing
//! fields. Feeding a normalized record back through (as the cache tier does)
//! yields the same record.

mod afd;
mod alerts;
mod current;
mod forecast;
mod tropical;

use crate::client::RawRecord;
use crate::models::{DataType, NOT_AVAILABLE, NormalizedRecord, Params};

pub use alerts::severity_rank;
pub use current::wmo_description;
pub use forecast::HOURLY_LIMIT;

/// Condition text when no record could be produced
pub const DATA_UNAVAILABLE: &str = "Data Unavailable";

/// AFD content when no discussion could be produced
pub const AFD_UNAVAILABLE: &str = "Area Forecast Discussion not available at this time.";

/// Outlook text when no outlook could be produced
pub const OUTLOOK_UNAVAILABLE: &str = "Tropical outlook not available at this time.";

pub fn normalize(raw: RawRecord) -> NormalizedRecord {
    match raw {
        RawRecord::Current(raw) => NormalizedRecord::CurrentConditions(current::normalize(raw)),
        RawRecord::Forecast(raw) => NormalizedRecord::Forecast(forecast::normalize(raw)),
        RawRecord::Alerts(raw) => NormalizedRecord::Alerts(alerts::normalize(raw)),
        RawRecord::Afd(raw) => NormalizedRecord::Afd(afd::normalize(raw)),
        RawRecord::Tropical(raw) => NormalizedRecord::Tropical(tropical::normalize(raw)),
    }
}

/// Typed placeholder returned when every tier misses. Never cached.
pub fn fallback(data_type: DataType, params: &Params) -> NormalizedRecord {
    match data_type {
        DataType::CurrentConditions => NormalizedRecord::CurrentConditions(current::fallback()),
        DataType::Forecast => NormalizedRecord::Forecast(Default::default()),
        DataType::Alerts => NormalizedRecord::Alerts(Default::default()),
        DataType::Afd => NormalizedRecord::Afd(afd::fallback()),
        DataType::Tropical => NormalizedRecord::Tropical(tropical::fallback(params)),
    }
}

/// Trimmed text, or `default` when missing or blank
pub(crate) fn text_or(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Trimmed text, or `"N/A"`
pub(crate) fn text_or_na(value: Option<&str>) -> String {
    text_or(value, NOT_AVAILABLE)
}
