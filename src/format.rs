//! Formatting utilities for raw weather fields
//!
//! Pure functions that turn upstream numbers and strings into display values.
//! Anything missing or unparseable becomes the `"N/A"` sentinel.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::models::{NOT_AVAILABLE, Reading};

/// 16-point compass, clockwise from north
pub const DIRECTIONS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Short clock format used everywhere, e.g. `03:45 PM`
const TIME_FORMAT: &str = "%I:%M %p";

/// Timestamps below this magnitude are epoch seconds, not milliseconds
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Round half up (towards positive infinity), so -2.5 becomes -2
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    round_half_up(value * factor) / factor
}

/// Temperature or percentage: nearest integer, or `N/A`
pub fn format_rounded(value: Option<f64>) -> Reading {
    Reading::from_option(value).value().map_or(Reading::NotAvailable, |v| {
        Reading::Value(round_half_up(v))
    })
}

/// Round an already-normalized reading again (no-op on integers and `N/A`)
pub fn reround(reading: Reading) -> Reading {
    format_rounded(reading.value())
}

/// Pressure in inHg, two decimals
pub fn format_pressure(inhg: Option<f64>) -> Reading {
    Reading::from_option(inhg.map(|v| round_to(v, 2)))
}

/// Visibility in miles, one decimal
pub fn format_visibility(miles: Option<f64>) -> Reading {
    Reading::from_option(miles.map(|v| round_to(v, 1)))
}

/// Degrees to a 16-point cardinal direction
pub fn degrees_to_cardinal(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return NOT_AVAILABLE;
    }
    let normalized = (degrees % 360.0 + 360.0) % 360.0;
    let index = round_half_up(normalized / 22.5) as usize % 16;
    DIRECTIONS[index]
}

/// Wind display string.
///
/// - `None` speed: `"N/A"`
/// - zero: `"Calm"`
/// - otherwise `"{speed} mph from {direction}"`, direction defaulting to `"N/A"`
pub fn format_wind(speed_mph: Option<f64>, direction: Option<&str>) -> String {
    let Some(speed) = speed_mph.filter(|s| s.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };
    if speed == 0.0 {
        return "Calm".to_string();
    }
    let direction = direction
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(NOT_AVAILABLE);
    format!("{} mph from {}", round_half_up(speed) as i64, direction)
}

/// Format an upstream timestamp as a short clock time.
///
/// Accepts RFC 3339 (converted to local time) or a naive `YYYY-MM-DDTHH:MM`
/// local time as returned by Open-Meteo.
pub fn format_time(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(TIME_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return naive.format(TIME_FORMAT).to_string();
        }
    }
    NOT_AVAILABLE.to_string()
}

/// Interpret an epoch value that may be seconds or milliseconds
pub fn epoch_to_datetime(timestamp: i64) -> Option<DateTime<Utc>> {
    let millis = if timestamp.abs() < EPOCH_MILLIS_THRESHOLD {
        timestamp.checked_mul(1000)?
    } else {
        timestamp
    };
    Utc.timestamp_millis_opt(millis).single()
}

/// Epoch seconds from a value that may be seconds or milliseconds
pub fn to_epoch_seconds(timestamp: i64) -> i64 {
    if timestamp.abs() < EPOCH_MILLIS_THRESHOLD {
        timestamp
    } else {
        timestamp / 1000
    }
}

/// Local short time for an epoch value; zero is treated as unknown
pub fn format_epoch(timestamp: i64) -> String {
    if timestamp == 0 {
        return NOT_AVAILABLE.to_string();
    }
    epoch_to_datetime(timestamp)
        .map(|dt| dt.with_timezone(&Local).format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn kmh_to_mph(kmh: f64) -> f64 {
    kmh / 1.609_344
}

pub fn pascals_to_inhg(pascals: f64) -> f64 {
    pascals / 3386.389
}

pub fn hectopascals_to_inhg(hpa: f64) -> f64 {
    hpa * 100.0 / 3386.389
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / 1609.344
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_wind() {
        assert_eq!(format_wind(Some(0.0), Some("N")), "Calm");
        assert_eq!(format_wind(Some(12.0), Some("NE")), "12 mph from NE");
        assert_eq!(format_wind(None, Some("N")), "N/A");
        assert_eq!(format_wind(Some(7.6), None), "8 mph from N/A");
        assert_eq!(format_wind(Some(5.0), Some("")), "5 mph from N/A");
    }

    #[test]
    fn test_degrees_to_cardinal() {
        assert_eq!(degrees_to_cardinal(0.0), "N");
        assert_eq!(degrees_to_cardinal(45.0), "NE");
        assert_eq!(degrees_to_cardinal(359.0), "N");
        assert_eq!(degrees_to_cardinal(348.75), "N");
        assert_eq!(degrees_to_cardinal(11.25), "NNE");
        assert_eq!(degrees_to_cardinal(-90.0), "W");
        assert_eq!(degrees_to_cardinal(720.0 + 180.0), "S");
        assert_eq!(degrees_to_cardinal(f64::NAN), "N/A");
    }

    #[test]
    fn test_format_rounded() {
        assert_eq!(format_rounded(Some(72.4)), Reading::Value(72.0));
        assert_eq!(format_rounded(Some(72.5)), Reading::Value(73.0));
        assert_eq!(format_rounded(Some(-2.5)), Reading::Value(-2.0));
        assert_eq!(format_rounded(None), Reading::NotAvailable);
        assert_eq!(reround(Reading::NotAvailable), Reading::NotAvailable);
        assert_eq!(reround(Reading::Value(55.0)), Reading::Value(55.0));
    }

    #[test]
    fn test_pressure_and_visibility_precision() {
        assert_eq!(format_pressure(Some(30.0149)), Reading::Value(30.01));
        assert_eq!(format_visibility(Some(9.94)), Reading::Value(9.9));
        assert_eq!(format_visibility(None), Reading::NotAvailable);
    }

    #[test]
    fn test_format_time() {
        let local = DateTime::parse_from_rfc3339("2024-06-01T18:54:00+00:00")
            .unwrap()
            .with_timezone(&Local)
            .format("%I:%M %p")
            .to_string();
        assert_eq!(format_time("2024-06-01T18:54:00+00:00"), local);
        assert_eq!(format_time("2024-06-01T14:54:00-04:00"), local);
        assert_eq!(format_time("2024-06-01T09:05"), "09:05 AM");
        assert_eq!(format_time("not a time"), "N/A");
        assert_eq!(format_time(""), "N/A");
    }

    #[test]
    fn test_epoch_seconds_and_millis_agree() {
        let secs = epoch_to_datetime(1_700_000_000).unwrap();
        let millis = epoch_to_datetime(1_700_000_000_000).unwrap();
        assert_eq!(secs, millis);
        assert_eq!(to_epoch_seconds(1_700_000_000_000), 1_700_000_000);
        assert_eq!(to_epoch_seconds(1_700_000_000), 1_700_000_000);
        assert_eq!(format_epoch(0), "N/A");
        assert_ne!(format_epoch(1_700_000_000), "N/A");
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert!((kmh_to_mph(16.09344) - 10.0).abs() < 1e-9);
        assert!((pascals_to_inhg(101_600.0) - 30.0).abs() < 0.01);
        assert!((hectopascals_to_inhg(1016.0) - 30.0).abs() < 0.01);
        assert!((meters_to_miles(16_093.44) - 10.0).abs() < 1e-9);
    }
}
