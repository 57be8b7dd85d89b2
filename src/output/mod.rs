//! Output formatting for CLI results

use std::collections::BTreeMap;

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::models::{Forecast, NormalizedRecord};

pub mod json;
pub mod pretty;
pub mod table;

/// Trait for types that can be formatted for output
pub trait Formattable {
    /// Format the data according to the specified format
    fn format(&self, format: OutputFormat) -> Result<String>;
}

/// Format and print data to stdout
pub fn print<T: Formattable>(data: &T, format: OutputFormat) -> Result<()> {
    let output = data.format(format)?;
    println!("{}", output);
    Ok(())
}

impl Formattable for NormalizedRecord {
    fn format(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Json => json::format_record(self)?,
            OutputFormat::Table => table::render(self),
            OutputFormat::Pretty => pretty::render(self),
        })
    }
}

/// The hourly half of a forecast
pub struct HourlyForecast<'a>(pub &'a Forecast);

impl Formattable for HourlyForecast<'_> {
    fn format(&self, format: OutputFormat) -> Result<String> {
        Ok(match format {
            OutputFormat::Json => json::format_json(&self.0.hourly)?,
            OutputFormat::Table => table::periods(&self.0.hourly, true),
            OutputFormat::Pretty => pretty::hourly(&self.0.hourly),
        })
    }
}

/// Several records for one place, in request order
pub struct Dashboard {
    pub title: String,
    pub records: Vec<NormalizedRecord>,
}

impl Formattable for Dashboard {
    fn format(&self, format: OutputFormat) -> Result<String> {
        if format == OutputFormat::Json {
            let by_type: BTreeMap<&str, &NormalizedRecord> = self
                .records
                .iter()
                .map(|r| (r.data_type().as_str(), r))
                .collect();
            return Ok(json::format_json(&by_type)?);
        }

        let mut sections = vec![format!("=== {} ===", self.title)];
        for record in &self.records {
            sections.push(record.format(format)?);
        }
        Ok(sections.join("\n\n"))
    }
}
