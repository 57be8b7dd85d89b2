//! Human-oriented output with colour

use colored::{ColoredString, Colorize};

use super::table::{position, with_unit};
use crate::format::{format_epoch, format_time};
use crate::models::{
    AlertRecord, Alerts, AreaForecastDiscussion, CurrentConditions, NormalizedRecord, Period,
    Storm, TropicalRecord,
};

const RULE: &str = "────────────────────────────────────────";

fn heading(title: &str, detail: &str) -> String {
    if detail.is_empty() {
        format!("{}\n{}", title.bold(), RULE)
    } else {
        format!("{} · {}\n{}", title.bold(), detail, RULE)
    }
}

/// Colour by NWS severity, most severe loudest
pub fn severity(severity: &str) -> ColoredString {
    match severity.trim().to_ascii_lowercase().as_str() {
        "extreme" => severity.red().bold(),
        "severe" => severity.red(),
        "moderate" => severity.yellow(),
        "minor" => severity.cyan(),
        _ => severity.normal(),
    }
}

fn current(c: &CurrentConditions) -> String {
    let mut lines = vec![heading("Current Conditions", &c.station_name)];
    lines.push(format!(
        "{}  {}",
        with_unit(&c.temp, "°F").bold(),
        c.condition
    ));
    lines.push(format!("Dewpoint:     {}", with_unit(&c.dewpoint, "°F")));
    lines.push(format!("Humidity:     {}", with_unit(&c.humidity, "%")));
    lines.push(format!("Wind:         {}", c.wind));
    lines.push(format!("Visibility:   {}", with_unit(&c.visibility, " mi")));
    lines.push(format!("Pressure:     {}", with_unit(&c.pressure, " inHg")));
    lines.push(format!("Observed:     {}", c.formatted_time.dimmed()));
    lines.join("\n")
}

fn daily(periods: &[Period]) -> String {
    if periods.is_empty() {
        return format!("{}\nForecast not available.", heading("Forecast", ""));
    }
    let mut lines = vec![heading("Forecast", "")];
    for p in periods {
        let temp = with_unit(&p.temperature, "°F");
        let temp = if p.is_daytime { temp.yellow() } else { temp.blue() };
        lines.push(format!("{:<18} {:>6}  {}", p.name.bold(), temp, p.short_forecast));
    }
    lines.join("\n")
}

/// Hourly periods, one line each
pub fn hourly(periods: &[Period]) -> String {
    if periods.is_empty() {
        return format!(
            "{}\nHourly forecast not available.",
            heading("Hourly Forecast", "")
        );
    }
    let mut lines = vec![heading("Hourly Forecast", "")];
    for p in periods {
        lines.push(format!(
            "{:<9} {:>6}  {}",
            format_time(&p.start_time),
            with_unit(&p.temperature, "°F"),
            p.short_forecast
        ));
    }
    lines.join("\n")
}

fn alert(a: &AlertRecord) -> String {
    let p = &a.properties;
    let mut lines = vec![format!("{} [{}]", p.event.bold(), severity(&p.severity))];
    if !p.headline.is_empty() {
        lines.push(p.headline.clone());
    }
    if !p.area_desc.is_empty() {
        lines.push(format!("Areas: {}", p.area_desc));
    }
    if !p.expires.is_empty() {
        lines.push(format!("Expires: {}", format_time(&p.expires)));
    }
    if !p.instruction.is_empty() {
        lines.push(p.instruction.italic().to_string());
    }
    lines.join("\n")
}

fn alerts(alerts: &Alerts) -> String {
    let title = heading("Alerts", &alerts.alerts.len().to_string());
    if alerts.alerts.is_empty() {
        return format!("{}\n{}", title, "No active alerts.".green());
    }
    let body: Vec<String> = alerts.alerts.iter().map(alert).collect();
    format!("{}\n{}", title, body.join("\n\n"))
}

fn afd(afd: &AreaForecastDiscussion) -> String {
    format!(
        "{}\n{}",
        heading("Area Forecast Discussion", &format_epoch(afd.timestamp)),
        afd.content
    )
}

fn storm(s: &Storm) -> String {
    format!(
        "{} {}\n  Wind: {}  Pressure: {}\n  Position: {}  Moving: {}\n  Updated: {}",
        s.classification.red(),
        s.name.bold(),
        with_unit(&s.intensity, " kt"),
        with_unit(&s.pressure, " mb"),
        position(&s.latitude, &s.longitude),
        s.movement,
        s.last_update.dimmed()
    )
}

fn tropical(record: &TropicalRecord) -> String {
    match record {
        TropicalRecord::ActiveStorms { active_storms } if active_storms.is_empty() => format!(
            "{}\n{}",
            heading("Active Storms", ""),
            "No active tropical cyclones.".green()
        ),
        TropicalRecord::ActiveStorms { active_storms } => {
            let body: Vec<String> = active_storms.iter().map(storm).collect();
            format!("{}\n{}", heading("Active Storms", ""), body.join("\n\n"))
        }
        TropicalRecord::Outlook { outlook } => {
            format!("{}\n{}", heading("Tropical Weather Outlook", ""), outlook)
        }
    }
}

/// Render any normalized record for a terminal
pub fn render(record: &NormalizedRecord) -> String {
    match record {
        NormalizedRecord::CurrentConditions(c) => current(c),
        NormalizedRecord::Forecast(f) => daily(&f.daily),
        NormalizedRecord::Alerts(a) => alerts(a),
        NormalizedRecord::Afd(a) => afd(a),
        NormalizedRecord::Tropical(t) => tropical(t),
    }
}
