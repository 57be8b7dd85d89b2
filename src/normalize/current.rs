use super::{DATA_UNAVAILABLE, text_or, text_or_na};
use crate::client::models::{
    ObservationProperties, OpenMeteoResponse, Quantity, RawCurrent, SnapshotObservation,
    WindDirection, flex,
};
use crate::format::{
    celsius_to_fahrenheit, degrees_to_cardinal, format_pressure, format_rounded, format_time,
    format_visibility, format_wind, hectopascals_to_inhg, kmh_to_mph, meters_to_miles,
    pascals_to_inhg, reround,
};
use crate::models::{CurrentConditions, NOT_AVAILABLE, Reading};

const UNKNOWN_STATION: &str = "Unknown Station";
const UNKNOWN_CONDITION: &str = "Unknown";
const OPEN_METEO_STATION: &str = "Open-Meteo";

const MPS_TO_MPH: f64 = 2.236_936;

pub(super) fn normalize(raw: RawCurrent) -> CurrentConditions {
    match raw {
        RawCurrent::Cached(cached) => from_cached(cached),
        RawCurrent::Snapshot(snapshot) => from_snapshot(snapshot),
        RawCurrent::OpenMeteo(response) => from_open_meteo(response),
        RawCurrent::Observation {
            station_name,
            observation,
        } => from_observation(&station_name, observation),
    }
}

pub(super) fn fallback() -> CurrentConditions {
    CurrentConditions {
        temp: Reading::NotAvailable,
        condition: DATA_UNAVAILABLE.to_string(),
        dewpoint: Reading::NotAvailable,
        humidity: Reading::NotAvailable,
        wind: NOT_AVAILABLE.to_string(),
        visibility: Reading::NotAvailable,
        pressure: Reading::NotAvailable,
        time: NOT_AVAILABLE.to_string(),
        formatted_time: NOT_AVAILABLE.to_string(),
        station_name: UNKNOWN_STATION.to_string(),
        icon_url: String::new(),
    }
}

/// Build the record from already-converted display units
#[allow(clippy::too_many_arguments)]
fn assemble(
    temp: Option<f64>,
    condition: Option<&str>,
    dewpoint: Option<f64>,
    humidity: Option<f64>,
    wind: String,
    visibility_mi: Option<f64>,
    pressure_inhg: Option<f64>,
    time: Option<&str>,
    station_name: Option<&str>,
    icon_url: Option<&str>,
) -> CurrentConditions {
    let time = text_or_na(time);
    CurrentConditions {
        temp: format_rounded(temp),
        condition: text_or(condition, UNKNOWN_CONDITION),
        dewpoint: format_rounded(dewpoint),
        humidity: format_rounded(humidity),
        wind,
        visibility: format_visibility(visibility_mi),
        pressure: format_pressure(pressure_inhg),
        formatted_time: format_time(&time),
        time,
        station_name: text_or(station_name, UNKNOWN_STATION),
        icon_url: text_or(icon_url, ""),
    }
}

fn from_cached(cached: CurrentConditions) -> CurrentConditions {
    let formatted_time = match cached.formatted_time.trim() {
        "" => format_time(&cached.time),
        kept => kept.to_string(),
    };
    CurrentConditions {
        temp: reround(cached.temp),
        condition: text_or(Some(&cached.condition), UNKNOWN_CONDITION),
        dewpoint: reround(cached.dewpoint),
        humidity: reround(cached.humidity),
        wind: text_or_na(Some(&cached.wind)),
        visibility: format_visibility(cached.visibility.value()),
        pressure: format_pressure(cached.pressure.value()),
        time: text_or_na(Some(&cached.time)),
        formatted_time,
        station_name: text_or(Some(&cached.station_name), UNKNOWN_STATION),
        icon_url: cached.icon_url.trim().to_string(),
    }
}

fn from_snapshot(s: SnapshotObservation) -> CurrentConditions {
    let direction = match &s.wind_direction {
        Some(WindDirection::Degrees(deg)) => Some(degrees_to_cardinal(*deg).to_string()),
        Some(WindDirection::Cardinal(dir)) => Some(dir.trim().to_string()),
        None => None,
    };
    let wind = format_wind(flex(&s.wind_speed), direction.as_deref());

    assemble(
        flex(&s.temp),
        s.condition.as_deref(),
        flex(&s.dewpoint),
        flex(&s.humidity),
        wind,
        flex(&s.visibility),
        flex(&s.pressure),
        s.time.as_deref(),
        s.station_name.as_deref(),
        s.icon.as_deref(),
    )
}

fn from_open_meteo(response: OpenMeteoResponse) -> CurrentConditions {
    let current = response.current_weather;
    let hourly = response.hourly.unwrap_or_default();
    let time = current.time.as_deref().unwrap_or("");
    let at = |series: &[Option<f64>]| hourly.at(series, time);

    let wind = format_wind(
        current.windspeed,
        current.winddirection.map(degrees_to_cardinal),
    );

    assemble(
        current.temperature,
        Some(wmo_description(current.weathercode)),
        at(&hourly.dewpoint_2m),
        at(&hourly.relativehumidity_2m),
        wind,
        at(&hourly.visibility).map(meters_to_miles),
        at(&hourly.surface_pressure).map(hectopascals_to_inhg),
        current.time.as_deref(),
        Some(OPEN_METEO_STATION),
        None,
    )
}

fn from_observation(station_name: &str, o: ObservationProperties) -> CurrentConditions {
    let wind = format_wind(
        speed_mph(&o.wind_speed),
        o.wind_direction.value.map(degrees_to_cardinal),
    );

    assemble(
        fahrenheit(&o.temperature),
        o.text_description.as_deref(),
        fahrenheit(&o.dewpoint),
        o.relative_humidity.value,
        wind,
        o.visibility.value.map(meters_to_miles),
        o.barometric_pressure.value.map(pascals_to_inhg),
        o.timestamp.as_deref(),
        Some(station_name),
        o.icon.as_deref(),
    )
}

fn fahrenheit(q: &Quantity) -> Option<f64> {
    let value = q.value?;
    Some(match q.unit() {
        "wmoUnit:degF" => value,
        _ => celsius_to_fahrenheit(value),
    })
}

fn speed_mph(q: &Quantity) -> Option<f64> {
    let value = q.value?;
    Some(match q.unit() {
        "wmoUnit:m_s-1" => value * MPS_TO_MPH,
        "wmoUnit:mi_h-1" => value,
        _ => kmh_to_mph(value),
    })
}

/// Condition text for a WMO weather interpretation code
pub fn wmo_description(code: Option<i32>) -> &'static str {
    match code {
        Some(0) => "Clear",
        Some(1) => "Mainly Clear",
        Some(2) => "Partly Cloudy",
        Some(3) => "Overcast",
        Some(45 | 48) => "Fog",
        Some(51 | 53 | 55) => "Drizzle",
        Some(56 | 57) => "Freezing Drizzle",
        Some(61 | 63) => "Rain",
        Some(65) => "Heavy Rain",
        Some(66 | 67) => "Freezing Rain",
        Some(71 | 73 | 75 | 77) => "Snow",
        Some(80 | 81 | 82) => "Rain Showers",
        Some(85 | 86) => "Snow Showers",
        Some(95) => "Thunderstorm",
        Some(96 | 99) => "Thunderstorm with Hail",
        _ => UNKNOWN_CONDITION,
    }
}
