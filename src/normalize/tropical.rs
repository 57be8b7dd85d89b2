use super::{OUTLOOK_UNAVAILABLE, text_or, text_or_na};
use crate::client::models::{NhcStorm, RawTropical, flex};
use crate::format::{degrees_to_cardinal, format_rounded, reround, round_half_up};
use crate::models::{NOT_AVAILABLE, Params, Reading, Storm, TropicalRecord};

pub(super) fn normalize(raw: RawTropical) -> TropicalRecord {
    match raw {
        RawTropical::Cached(TropicalRecord::ActiveStorms { active_storms }) => {
            TropicalRecord::ActiveStorms {
                active_storms: active_storms.into_iter().map(renormalize).collect(),
            }
        }
        RawTropical::Cached(TropicalRecord::Outlook { outlook }) => outlook_record(&outlook),
        RawTropical::Storms { storms, .. } => TropicalRecord::ActiveStorms {
            active_storms: storms.into_iter().map(storm).collect(),
        },
        RawTropical::Outlook { text, .. } => outlook_record(&text),
    }
}

/// Empty storm list, or placeholder outlook text, per requested subtype
pub(super) fn fallback(params: &Params) -> TropicalRecord {
    match params.sub_type() {
        Ok(sub_type) if sub_type.is_outlook() => TropicalRecord::Outlook {
            outlook: OUTLOOK_UNAVAILABLE.to_string(),
        },
        _ => TropicalRecord::ActiveStorms {
            active_storms: Vec::new(),
        },
    }
}

fn outlook_record(text: &str) -> TropicalRecord {
    TropicalRecord::Outlook {
        outlook: text_or(Some(text), OUTLOOK_UNAVAILABLE),
    }
}

/// Expand an NHC classification code; full names pass through
fn classification(code: Option<&str>) -> String {
    let code = text_or(code, "Unknown");
    match code.to_ascii_uppercase().as_str() {
        "TD" => "Tropical Depression".to_string(),
        "TS" => "Tropical Storm".to_string(),
        "HU" => "Hurricane".to_string(),
        "MH" => "Major Hurricane".to_string(),
        "STD" => "Subtropical Depression".to_string(),
        "STS" => "Subtropical Storm".to_string(),
        "PTC" => "Potential Tropical Cyclone".to_string(),
        "PC" => "Post-Tropical Cyclone".to_string(),
        _ => code,
    }
}

fn movement(direction: Option<f64>, speed_mph: Option<f64>) -> String {
    match speed_mph.filter(|s| s.is_finite()) {
        None => NOT_AVAILABLE.to_string(),
        Some(speed) if speed == 0.0 => "Stationary".to_string(),
        Some(speed) => format!(
            "{} at {} mph",
            direction.map_or(NOT_AVAILABLE, degrees_to_cardinal),
            round_half_up(speed) as i64
        ),
    }
}

fn storm(s: NhcStorm) -> Storm {
    Storm {
        id: text_or(s.id.as_deref(), ""),
        name: text_or(s.name.as_deref(), "Unnamed"),
        classification: classification(s.classification.as_deref()),
        intensity: format_rounded(flex(&s.intensity)),
        pressure: format_rounded(flex(&s.pressure)),
        latitude: Reading::from_option(s.latitude_numeric),
        longitude: Reading::from_option(s.longitude_numeric),
        movement: movement(s.movement_dir, s.movement_speed),
        last_update: text_or_na(s.last_update.as_deref()),
    }
}

fn renormalize(s: Storm) -> Storm {
    Storm {
        id: s.id.trim().to_string(),
        name: text_or(Some(&s.name), "Unnamed"),
        classification: classification(Some(&s.classification)),
        intensity: reround(s.intensity),
        pressure: reround(s.pressure),
        latitude: s.latitude,
        longitude: s.longitude,
        movement: text_or_na(Some(&s.movement)),
        last_update: text_or_na(Some(&s.last_update)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SourceKind;
    use crate::client::models::NhcStormsResponse;
    use serde_json::json;

    fn storms() -> Vec<NhcStorm> {
        let response: NhcStormsResponse = serde_json::from_value(json!({"activeStorms": [{
            "id": "al052024",
            "name": "Ernesto",
            "classification": "HU",
            "intensity": "75",
            "pressure": "985",
            "latitudeNumeric": 27.3,
            "longitudeNumeric": -65.0,
            "movementDir": 360,
            "movementSpeed": 14,
            "lastUpdate": "2024-08-16T15:00:00.000Z"
        }, {
            "name": "Five",
            "classification": "td",
            "movementSpeed": 0
        }]}))
        .unwrap();
        response.active_storms
    }

    #[test]
    fn test_storms() {
        let record = normalize(RawTropical::Storms {
            source: SourceKind::NhcApi,
            storms: storms(),
        });
        let TropicalRecord::ActiveStorms { active_storms } = record else {
            panic!("expected storms");
        };
        let ernesto = &active_storms[0];
        assert_eq!(ernesto.classification, "Hurricane");
        assert_eq!(ernesto.intensity, Reading::Value(75.0));
        assert_eq!(ernesto.pressure, Reading::Value(985.0));
        assert_eq!(ernesto.latitude, Reading::Value(27.3));
        assert_eq!(ernesto.movement, "N at 14 mph");

        let five = &active_storms[1];
        assert_eq!(five.classification, "Tropical Depression");
        assert_eq!(five.movement, "Stationary");
        assert_eq!(five.intensity, Reading::NotAvailable);
        assert_eq!(five.last_update, "N/A");
    }

    #[test]
    fn test_outlook_text() {
        let record = normalize(RawTropical::Outlook {
            source: SourceKind::Snapshot,
            text: "  Tropical cyclone formation is not expected during the next 7 days.\n".to_string(),
        });
        assert_eq!(
            record,
            TropicalRecord::Outlook {
                outlook: "Tropical cyclone formation is not expected during the next 7 days."
                    .to_string()
            }
        );
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let first = normalize(RawTropical::Storms {
            source: SourceKind::Snapshot,
            storms: storms(),
        });
        assert_eq!(normalize(RawTropical::Cached(first.clone())), first);
    }
}
