//! Normalized record shapes, one per data type

use serde::{Deserialize, Serialize};

use super::{DataType, Reading};

/// Current observed conditions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurrentConditions {
    pub temp: Reading,
    pub condition: String,
    pub dewpoint: Reading,
    pub humidity: Reading,
    /// Display string such as `"12 mph from NE"` or `"Calm"`
    pub wind: String,
    /// Statute miles
    pub visibility: Reading,
    /// Inches of mercury
    pub pressure: Reading,
    /// Observation time as reported upstream
    pub time: String,
    pub formatted_time: String,
    pub station_name: String,
    pub icon_url: String,
}

/// One forecast period (daily half-day or hourly)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Period {
    pub name: String,
    pub temperature: Reading,
    pub icon: String,
    pub short_forecast: String,
    pub detailed_forecast: String,
    pub is_daytime: bool,
    pub start_time: String,
}

/// Daily and hourly forecast periods
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    pub daily: Vec<Period>,
    pub hourly: Vec<Period>,
}

/// Alert fields, every one always present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlertProperties {
    pub event: String,
    pub headline: String,
    pub description: String,
    pub instruction: String,
    pub severity: String,
    pub certainty: String,
    pub urgency: String,
    pub area_desc: String,
    pub expires: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertRecord {
    pub id: String,
    pub properties: AlertProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alerts {
    pub alerts: Vec<AlertRecord>,
}

/// Area forecast discussion text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaForecastDiscussion {
    pub content: String,
    /// Epoch seconds
    pub timestamp: i64,
}

/// A tracked tropical cyclone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Storm {
    pub id: String,
    pub name: String,
    pub classification: String,
    /// Maximum sustained wind, knots
    pub intensity: Reading,
    /// Minimum central pressure, millibars
    pub pressure: Reading,
    pub latitude: Reading,
    pub longitude: Reading,
    pub movement: String,
    pub last_update: String,
}

/// Tropical record; the variant follows the requested subtype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TropicalRecord {
    ActiveStorms {
        #[serde(rename = "activeStorms")]
        active_storms: Vec<Storm>,
    },
    Outlook {
        outlook: String,
    },
}

/// Any normalized record, serialized without a tag so the JSON matches the
/// per-type shape exactly
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedRecord {
    CurrentConditions(CurrentConditions),
    Forecast(Forecast),
    Alerts(Alerts),
    Afd(AreaForecastDiscussion),
    Tropical(TropicalRecord),
}

impl NormalizedRecord {
    pub fn data_type(&self) -> DataType {
        match self {
            NormalizedRecord::CurrentConditions(_) => DataType::CurrentConditions,
            NormalizedRecord::Forecast(_) => DataType::Forecast,
            NormalizedRecord::Alerts(_) => DataType::Alerts,
            NormalizedRecord::Afd(_) => DataType::Afd,
            NormalizedRecord::Tropical(_) => DataType::Tropical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tropical_record_shapes() {
        let storms = TropicalRecord::ActiveStorms {
            active_storms: vec![],
        };
        assert_eq!(
            serde_json::to_value(&storms).unwrap(),
            serde_json::json!({"activeStorms": []})
        );

        let outlook: TropicalRecord =
            serde_json::from_value(serde_json::json!({"outlook": "Quiet"})).unwrap();
        assert_eq!(
            outlook,
            TropicalRecord::Outlook {
                outlook: "Quiet".to_string()
            }
        );
    }

    #[test]
    fn test_current_conditions_camel_case() {
        let value = serde_json::to_value(CurrentConditions::default()).unwrap();
        assert!(value.get("formattedTime").is_some());
        assert!(value.get("stationName").is_some());
        assert!(value.get("iconUrl").is_some());
        assert_eq!(value["temp"], "N/A");
    }

    #[test]
    fn test_normalized_record_untagged() {
        let record = NormalizedRecord::Forecast(Forecast::default());
        assert_eq!(record.data_type(), DataType::Forecast);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"daily": [], "hourly": []})
        );
    }
}
