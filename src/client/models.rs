//! Raw upstream shapes, decoded at the fetch boundary
//!
//! Each source (local cache, snapshot file, NWS, Open-Meteo, NHC, product
//! pages) gets its own typed shape. Decoding is lenient about individual
//! fields but strict about the structural markers that identify a source
//! (`weather`, `current_weather`, `properties.periods`, `features`, ...).

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::TierMiss;
use crate::models::{
    Alerts, AreaForecastDiscussion, CurrentConditions, DataType, Forecast, TropicalRecord,
};

/// Where a raw record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    LocalCache,
    Snapshot,
    NwsApi,
    OpenMeteo,
    NhcApi,
    ProductPage,
}

/// A decoded raw record, tagged by data type and source
#[derive(Debug, Clone)]
pub enum RawRecord {
    Current(RawCurrent),
    Forecast(RawForecast),
    Alerts(RawAlerts),
    Afd(RawAfd),
    Tropical(RawTropical),
}

#[derive(Debug, Clone)]
pub enum RawCurrent {
    Cached(CurrentConditions),
    Snapshot(SnapshotObservation),
    OpenMeteo(OpenMeteoResponse),
    Observation {
        station_name: String,
        observation: ObservationProperties,
    },
}

#[derive(Debug, Clone)]
pub enum RawForecast {
    Cached(Forecast),
    Snapshot(SnapshotForecast),
    Nws {
        daily: Vec<NwsPeriod>,
        hourly: Vec<NwsPeriod>,
    },
}

#[derive(Debug, Clone)]
pub enum RawAlerts {
    Cached(Alerts),
    Snapshot(Vec<SnapshotAlert>),
    Nws(Vec<AlertFeature>),
}

#[derive(Debug, Clone)]
pub enum RawAfd {
    Cached(AreaForecastDiscussion),
    Snapshot(SnapshotAfd),
    ProductPage { text: String, fetched_at: i64 },
}

#[derive(Debug, Clone)]
pub enum RawTropical {
    Cached(TropicalRecord),
    Storms {
        source: SourceKind,
        storms: Vec<NhcStorm>,
    },
    Outlook {
        source: SourceKind,
        text: String,
    },
}

impl RawRecord {
    pub fn data_type(&self) -> DataType {
        match self {
            RawRecord::Current(_) => DataType::CurrentConditions,
            RawRecord::Forecast(_) => DataType::Forecast,
            RawRecord::Alerts(_) => DataType::Alerts,
            RawRecord::Afd(_) => DataType::Afd,
            RawRecord::Tropical(_) => DataType::Tropical,
        }
    }

    pub fn source(&self) -> SourceKind {
        match self {
            RawRecord::Current(RawCurrent::Cached(_))
            | RawRecord::Forecast(RawForecast::Cached(_))
            | RawRecord::Alerts(RawAlerts::Cached(_))
            | RawRecord::Afd(RawAfd::Cached(_))
            | RawRecord::Tropical(RawTropical::Cached(_)) => SourceKind::LocalCache,
            RawRecord::Current(RawCurrent::Snapshot(_))
            | RawRecord::Forecast(RawForecast::Snapshot(_))
            | RawRecord::Alerts(RawAlerts::Snapshot(_))
            | RawRecord::Afd(RawAfd::Snapshot(_)) => SourceKind::Snapshot,
            RawRecord::Current(RawCurrent::OpenMeteo(_)) => SourceKind::OpenMeteo,
            RawRecord::Current(RawCurrent::Observation { .. })
            | RawRecord::Forecast(RawForecast::Nws { .. })
            | RawRecord::Alerts(RawAlerts::Nws(_)) => SourceKind::NwsApi,
            RawRecord::Afd(RawAfd::ProductPage { .. }) => SourceKind::ProductPage,
            RawRecord::Tropical(RawTropical::Storms { source, .. })
            | RawRecord::Tropical(RawTropical::Outlook { source, .. }) => *source,
        }
    }

    /// Decode a record previously written to the local cache
    pub fn from_cached(data_type: DataType, value: serde_json::Value) -> Result<Self, TierMiss> {
        Ok(match data_type {
            DataType::CurrentConditions => {
                RawRecord::Current(RawCurrent::Cached(decode(data_type, value)?))
            }
            DataType::Forecast => RawRecord::Forecast(RawForecast::Cached(decode(data_type, value)?)),
            DataType::Alerts => RawRecord::Alerts(RawAlerts::Cached(decode(data_type, value)?)),
            DataType::Afd => RawRecord::Afd(RawAfd::Cached(decode(data_type, value)?)),
            DataType::Tropical => {
                RawRecord::Tropical(RawTropical::Cached(decode(data_type, value)?))
            }
        })
    }
}

/// Decode JSON into a typed shape, reporting failures as a malformed tier miss
pub fn decode<T: DeserializeOwned>(
    data_type: DataType,
    value: serde_json::Value,
) -> Result<T, TierMiss> {
    serde_json::from_value(value).map_err(|e| TierMiss::malformed(data_type, e))
}

/// A number that may arrive bare, as a string, or wrapped as `{"value": n}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexNumber {
    Plain(f64),
    Text(String),
    Quantity { value: Option<f64> },
}

impl FlexNumber {
    pub fn value(&self) -> Option<f64> {
        match self {
            FlexNumber::Plain(v) => Some(*v),
            FlexNumber::Text(s) => s.trim().parse().ok(),
            FlexNumber::Quantity { value } => *value,
        }
        .filter(|v: &f64| v.is_finite())
    }
}

/// Convenience for `Option<FlexNumber>` fields
pub fn flex(value: &Option<FlexNumber>) -> Option<f64> {
    value.as_ref().and_then(FlexNumber::value)
}

/// Wind direction as degrees or an already-cardinal string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WindDirection {
    Degrees(f64),
    Cardinal(String),
}

// ============================================================================
// Snapshot files
// ============================================================================

/// `{county}_weather.json`
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotWeather {
    pub weather: SnapshotObservation,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotObservation {
    pub temp: Option<FlexNumber>,
    pub condition: Option<String>,
    pub dewpoint: Option<FlexNumber>,
    pub humidity: Option<FlexNumber>,
    /// mph
    pub wind_speed: Option<FlexNumber>,
    pub wind_direction: Option<WindDirection>,
    /// miles
    pub visibility: Option<FlexNumber>,
    /// inHg
    pub pressure: Option<FlexNumber>,
    pub time: Option<String>,
    pub station_name: Option<String>,
    #[serde(alias = "iconUrl")]
    pub icon: Option<String>,
}

/// `{county}_forecast.json`
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotForecast {
    pub daily: Vec<NwsPeriod>,
    #[serde(default)]
    pub hourly: Vec<NwsPeriod>,
}

/// `{county}_alerts.json`
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotAlerts {
    pub alerts: Vec<SnapshotAlert>,
}

/// Snapshot alerts may be stored flat or in the NWS feature layout
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SnapshotAlert {
    Wrapped {
        #[serde(default)]
        id: Option<String>,
        properties: RawAlertFields,
    },
    Flat(RawAlertFields),
}

/// `{wfo}_afd.json`
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotAfd {
    pub content: String,
    /// Epoch seconds (milliseconds tolerated)
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// `tropical_outlook_*.json`
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotOutlook {
    pub outlook: String,
}

// ============================================================================
// National Weather Service API
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PointsResponse {
    pub properties: PointProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointProperties {
    pub grid_id: String,
    pub grid_x: i64,
    pub grid_y: i64,
    #[serde(default)]
    pub observation_stations: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub properties: ForecastProperties,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastProperties {
    pub periods: Vec<NwsPeriod>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NwsPeriod {
    pub name: Option<String>,
    pub temperature: Option<FlexNumber>,
    pub icon: Option<String>,
    pub short_forecast: Option<String>,
    pub detailed_forecast: Option<String>,
    pub is_daytime: Option<bool>,
    pub start_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertsResponse {
    pub features: Vec<AlertFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertFeature {
    #[serde(default)]
    pub id: Option<String>,
    pub properties: RawAlertFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAlertFields {
    pub id: Option<String>,
    pub event: Option<String>,
    pub headline: Option<String>,
    pub description: Option<String>,
    pub instruction: Option<String>,
    pub severity: Option<String>,
    pub certainty: Option<String>,
    pub urgency: Option<String>,
    pub area_desc: Option<String>,
    pub expires: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationsResponse {
    pub features: Vec<StationFeature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationFeature {
    pub properties: StationProperties,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationProperties {
    pub station_identifier: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservationResponse {
    pub properties: ObservationProperties,
}

/// A measured value with its WMO unit code
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    pub value: Option<f64>,
    #[serde(default)]
    pub unit_code: Option<String>,
}

impl Quantity {
    pub fn unit(&self) -> &str {
        self.unit_code.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObservationProperties {
    pub text_description: Option<String>,
    pub icon: Option<String>,
    pub timestamp: Option<String>,
    pub temperature: Quantity,
    pub dewpoint: Quantity,
    pub relative_humidity: Quantity,
    pub wind_speed: Quantity,
    pub wind_direction: Quantity,
    pub visibility: Quantity,
    pub barometric_pressure: Quantity,
}

// ============================================================================
// Open-Meteo API
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct OpenMeteoResponse {
    pub current_weather: OpenMeteoCurrent,
    #[serde(default)]
    pub hourly: Option<OpenMeteoHourly>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpenMeteoCurrent {
    pub temperature: Option<f64>,
    pub windspeed: Option<f64>,
    pub winddirection: Option<f64>,
    pub weathercode: Option<i32>,
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OpenMeteoHourly {
    pub time: Vec<String>,
    pub relativehumidity_2m: Vec<Option<f64>>,
    pub dewpoint_2m: Vec<Option<f64>>,
    /// hPa
    pub surface_pressure: Vec<Option<f64>>,
    /// meters
    pub visibility: Vec<Option<f64>>,
}

/// Length of `YYYY-MM-DDTHH`
const HOUR_PREFIX_LEN: usize = 13;

impl OpenMeteoHourly {
    /// Value of `series` at the hourly slot containing `time`.
    ///
    /// Current weather moves in 15-minute steps while the hourly series sits
    /// on the hour, so `14:15` reads the `14:00` slot.
    pub fn at(&self, series: &[Option<f64>], time: &str) -> Option<f64> {
        let hour = time.get(..HOUR_PREFIX_LEN)?;
        let index = self
            .time
            .iter()
            .position(|t| t.get(..HOUR_PREFIX_LEN) == Some(hour))?;
        series.get(index).copied().flatten()
    }
}

// ============================================================================
// National Hurricane Center
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NhcStormsResponse {
    pub active_storms: Vec<NhcStorm>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NhcStorm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub classification: Option<String>,
    /// knots
    pub intensity: Option<FlexNumber>,
    /// millibars
    pub pressure: Option<FlexNumber>,
    pub latitude_numeric: Option<f64>,
    pub longitude_numeric: Option<f64>,
    pub movement_dir: Option<f64>,
    /// mph
    pub movement_speed: Option<f64>,
    pub last_update: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flex_number_variants() {
        let n: FlexNumber = serde_json::from_value(json!(72.5)).unwrap();
        assert_eq!(n.value(), Some(72.5));
        let n: FlexNumber = serde_json::from_value(json!("85")).unwrap();
        assert_eq!(n.value(), Some(85.0));
        let n: FlexNumber = serde_json::from_value(json!({"value": 21.1, "unitCode": "wmoUnit:degC"})).unwrap();
        assert_eq!(n.value(), Some(21.1));
        let n: FlexNumber = serde_json::from_value(json!({"value": null})).unwrap();
        assert_eq!(n.value(), None);
        let n: FlexNumber = serde_json::from_value(json!("N/A")).unwrap();
        assert_eq!(n.value(), None);
    }

    #[test]
    fn test_snapshot_alert_accepts_both_layouts() {
        let flat: SnapshotAlert =
            serde_json::from_value(json!({"event": "Flood Warning"})).unwrap();
        assert!(matches!(flat, SnapshotAlert::Flat(ref f) if f.event.as_deref() == Some("Flood Warning")));

        let wrapped: SnapshotAlert = serde_json::from_value(
            json!({"id": "urn:1", "properties": {"event": "Heat Advisory"}}),
        )
        .unwrap();
        assert!(matches!(wrapped, SnapshotAlert::Wrapped { .. }));
    }

    #[test]
    fn test_open_meteo_requires_current_weather() {
        let err = decode::<OpenMeteoResponse>(DataType::CurrentConditions, json!({"hourly": {}}));
        assert!(matches!(err, Err(TierMiss::Malformed { .. })));
    }

    #[test]
    fn test_open_meteo_hourly_lookup() {
        let hourly: OpenMeteoHourly = serde_json::from_value(json!({
            "time": ["2024-06-01T13:00", "2024-06-01T14:00"],
            "relativehumidity_2m": [60, 55],
            "dewpoint_2m": [61.0, null]
        }))
        .unwrap();
        assert_eq!(
            hourly.at(&hourly.relativehumidity_2m, "2024-06-01T14:00"),
            Some(55.0)
        );
        assert_eq!(hourly.at(&hourly.dewpoint_2m, "2024-06-01T14:00"), None);
        assert_eq!(hourly.at(&hourly.visibility, "2024-06-01T14:00"), None);
        assert_eq!(hourly.at(&hourly.relativehumidity_2m, "2024-06-02T00:00"), None);
        assert_eq!(
            hourly.at(&hourly.relativehumidity_2m, "2024-06-01T13:45"),
            Some(60.0)
        );
        assert_eq!(hourly.at(&hourly.relativehumidity_2m, ""), None);
    }

    #[test]
    fn test_from_cached_rejects_wrong_shape() {
        let result = RawRecord::from_cached(DataType::Tropical, json!({"nothing": true}));
        assert!(matches!(result, Err(TierMiss::Malformed { .. })));
    }

    #[test]
    fn test_from_cached_source_kind() {
        let raw = RawRecord::from_cached(DataType::Forecast, json!({"daily": [], "hourly": []}))
            .unwrap();
        assert_eq!(raw.source(), SourceKind::LocalCache);
        assert_eq!(raw.data_type(), DataType::Forecast);
    }
}
