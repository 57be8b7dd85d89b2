//! Weather data commands

use tabled::Tabled;

use crate::cli::{CommandContext, LocationArgs, OutputFormat};
use crate::error::Result;
use crate::models::{DataType, NormalizedRecord, Params, TropicalSubType};
use crate::output::{self, Dashboard, HourlyForecast, json, table};

/// Show current conditions
pub async fn current(ctx: &CommandContext, location: &LocationArgs) -> Result<()> {
    let params = ctx.location_params(location)?;
    show(ctx, DataType::CurrentConditions, &params).await
}

/// Show the daily (or hourly) forecast
pub async fn forecast(ctx: &CommandContext, location: &LocationArgs, hourly: bool) -> Result<()> {
    let params = ctx.location_params(location)?;
    let record = ctx.service.get_data(DataType::Forecast, &params).await;

    match record {
        NormalizedRecord::Forecast(ref forecast) if hourly => {
            output::print(&HourlyForecast(forecast), ctx.format)
        }
        record => output::print(&record, ctx.format),
    }
}

/// Show active alerts
pub async fn alerts(ctx: &CommandContext, location: &LocationArgs) -> Result<()> {
    let params = ctx.location_params(location)?;
    show(ctx, DataType::Alerts, &params).await
}

/// Show the area forecast discussion
pub async fn afd(ctx: &CommandContext, wfo: Option<&str>, county: Option<&str>) -> Result<()> {
    let params = ctx.office_params(wfo, county)?;
    show(ctx, DataType::Afd, &params).await
}

/// Show tropical storms or an outlook
pub async fn tropical(ctx: &CommandContext, sub_type: TropicalSubType) -> Result<()> {
    show(ctx, DataType::Tropical, &Params::tropical(sub_type)).await
}

/// Resolve the four county products concurrently and render them together
pub async fn dashboard(ctx: &CommandContext, county: Option<&str>) -> Result<()> {
    let county = ctx.county(county)?;
    let location = Params::location(&county.name, county.lat, county.lon);
    let office = Params::office(&county.wfo);

    let requests = vec![
        (DataType::CurrentConditions, location.clone()),
        (DataType::Forecast, location.clone()),
        (DataType::Alerts, location),
        (DataType::Afd, office),
    ];
    let records = ctx.service.get_many(&requests).await;

    output::print(
        &Dashboard {
            title: format!("{} County", county.name),
            records,
        },
        ctx.format,
    )
}

/// Re-resolve one data type without consulting the local cache
pub async fn refresh(
    ctx: &CommandContext,
    data_type: DataType,
    location: &LocationArgs,
    wfo: Option<&str>,
    sub_type: TropicalSubType,
) -> Result<()> {
    let params = match data_type {
        DataType::CurrentConditions | DataType::Forecast | DataType::Alerts => {
            ctx.location_params(location)?
        }
        DataType::Afd => ctx.office_params(wfo, location.county.as_deref())?,
        DataType::Tropical => Params::tropical(sub_type),
    };

    let record = ctx.service.force_refresh(data_type, &params).await;
    output::print(&record, ctx.format)
}

async fn show(ctx: &CommandContext, data_type: DataType, params: &Params) -> Result<()> {
    let record = ctx.service.get_data(data_type, params).await;
    output::print(&record, ctx.format)
}

#[derive(Debug, Tabled)]
struct CountyRow {
    #[tabled(rename = "COUNTY")]
    name: String,
    #[tabled(rename = "LAT")]
    lat: f64,
    #[tabled(rename = "LON")]
    lon: f64,
    #[tabled(rename = "OFFICE")]
    wfo: String,
}

/// List configured counties
pub fn counties(ctx: &CommandContext) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&ctx.config.counties)?),
        _ => {
            let rows: Vec<CountyRow> = ctx
                .config
                .counties
                .iter()
                .map(|c| CountyRow {
                    name: c.name.clone(),
                    lat: c.lat,
                    lon: c.lon,
                    wfo: c.wfo.clone(),
                })
                .collect();
            println!("{}", table::format_table(&rows));
        }
    }
    Ok(())
}
