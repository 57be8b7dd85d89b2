//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::format::{format_epoch, format_time};
use crate::models::{
    AlertRecord, Alerts, AreaForecastDiscussion, CurrentConditions, NOT_AVAILABLE,
    NormalizedRecord, Period, Reading, Storm, TropicalRecord,
};

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No results found.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

#[derive(Debug, Tabled)]
pub struct FieldRow {
    #[tabled(rename = "FIELD")]
    pub field: &'static str,
    #[tabled(rename = "VALUE")]
    pub value: String,
}

#[derive(Debug, Tabled)]
pub struct PeriodRow {
    #[tabled(rename = "PERIOD")]
    pub name: String,
    #[tabled(rename = "TEMP")]
    pub temperature: String,
    #[tabled(rename = "FORECAST")]
    pub short_forecast: String,
}

impl PeriodRow {
    /// Hourly periods have no useful name, so the start time labels them
    fn from_period(p: &Period, hourly: bool) -> Self {
        Self {
            name: if hourly || p.name.is_empty() {
                format_time(&p.start_time)
            } else {
                p.name.clone()
            },
            temperature: with_unit(&p.temperature, "°F"),
            short_forecast: p.short_forecast.clone(),
        }
    }
}

#[derive(Debug, Tabled)]
pub struct AlertRow {
    #[tabled(rename = "EVENT")]
    pub event: String,
    #[tabled(rename = "SEVERITY")]
    pub severity: String,
    #[tabled(rename = "URGENCY")]
    pub urgency: String,
    #[tabled(rename = "EXPIRES")]
    pub expires: String,
}

impl From<&AlertRecord> for AlertRow {
    fn from(a: &AlertRecord) -> Self {
        let p = &a.properties;
        Self {
            event: p.event.clone(),
            severity: p.severity.clone(),
            urgency: p.urgency.clone(),
            expires: if p.expires.is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                format_time(&p.expires)
            },
        }
    }
}

#[derive(Debug, Tabled)]
pub struct StormRow {
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "CLASSIFICATION")]
    pub classification: String,
    #[tabled(rename = "WIND")]
    pub intensity: String,
    #[tabled(rename = "PRESSURE")]
    pub pressure: String,
    #[tabled(rename = "POSITION")]
    pub position: String,
    #[tabled(rename = "MOVEMENT")]
    pub movement: String,
}

impl From<&Storm> for StormRow {
    fn from(s: &Storm) -> Self {
        Self {
            name: s.name.clone(),
            classification: s.classification.clone(),
            intensity: with_unit(&s.intensity, " kt"),
            pressure: with_unit(&s.pressure, " mb"),
            position: position(&s.latitude, &s.longitude),
            movement: s.movement.clone(),
        }
    }
}

/// `72°F`, or `N/A` without a unit
pub fn with_unit(reading: &Reading, unit: &str) -> String {
    if reading.is_available() {
        format!("{}{}", reading, unit)
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// `27.3N 65.0W`
pub fn position(lat: &Reading, lon: &Reading) -> String {
    match (lat.value(), lon.value()) {
        (Some(lat), Some(lon)) => format!(
            "{:.1}{} {:.1}{}",
            lat.abs(),
            if lat < 0.0 { "S" } else { "N" },
            lon.abs(),
            if lon < 0.0 { "W" } else { "E" }
        ),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn current(c: &CurrentConditions) -> String {
    let rows = vec![
        FieldRow {
            field: "Station",
            value: c.station_name.clone(),
        },
        FieldRow {
            field: "Condition",
            value: c.condition.clone(),
        },
        FieldRow {
            field: "Temperature",
            value: with_unit(&c.temp, "°F"),
        },
        FieldRow {
            field: "Dewpoint",
            value: with_unit(&c.dewpoint, "°F"),
        },
        FieldRow {
            field: "Humidity",
            value: with_unit(&c.humidity, "%"),
        },
        FieldRow {
            field: "Wind",
            value: c.wind.clone(),
        },
        FieldRow {
            field: "Visibility",
            value: with_unit(&c.visibility, " mi"),
        },
        FieldRow {
            field: "Pressure",
            value: with_unit(&c.pressure, " inHg"),
        },
        FieldRow {
            field: "Observed",
            value: c.formatted_time.clone(),
        },
    ];
    format_table(&rows)
}

/// Forecast periods as a table
pub fn periods(periods: &[Period], hourly: bool) -> String {
    let rows: Vec<PeriodRow> = periods
        .iter()
        .map(|p| PeriodRow::from_period(p, hourly))
        .collect();
    format_table(&rows)
}

fn alerts(alerts: &Alerts) -> String {
    if alerts.alerts.is_empty() {
        return "No active alerts.".to_string();
    }
    let rows: Vec<AlertRow> = alerts.alerts.iter().map(AlertRow::from).collect();
    format_table(&rows)
}

fn afd(afd: &AreaForecastDiscussion) -> String {
    let rows = vec![FieldRow {
        field: "Issued",
        value: format_epoch(afd.timestamp),
    }];
    format!("{}\n\n{}", format_table(&rows), afd.content)
}

fn tropical(record: &TropicalRecord) -> String {
    match record {
        TropicalRecord::ActiveStorms { active_storms } if active_storms.is_empty() => {
            "No active tropical cyclones.".to_string()
        }
        TropicalRecord::ActiveStorms { active_storms } => {
            let rows: Vec<StormRow> = active_storms.iter().map(StormRow::from).collect();
            format_table(&rows)
        }
        TropicalRecord::Outlook { outlook } => outlook.clone(),
    }
}

/// Render any normalized record in table form
pub fn render(record: &NormalizedRecord) -> String {
    match record {
        NormalizedRecord::CurrentConditions(c) => current(c),
        NormalizedRecord::Forecast(f) => periods(&f.daily, false),
        NormalizedRecord::Alerts(a) => alerts(a),
        NormalizedRecord::Afd(a) => afd(a),
        NormalizedRecord::Tropical(t) => tropical(t),
    }
}
