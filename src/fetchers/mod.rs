//! Domain fetchers: where each data type lives and how to decode it
//!
//! A fetcher knows its snapshot filename, how to validate a snapshot
//! document, and how to pull the same data from the live APIs. It never
//! touches the cache and never produces a fallback; every failure is a
//! [`TierMiss`] for the resolver to act on.

mod afd;
mod alerts;
mod current;
mod forecast;
mod product;
mod tropical;

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::cache::Clock;
use crate::client::models::{PointProperties, PointsResponse, decode};
use crate::client::{RawRecord, WeatherTransport};
use crate::config::ApiEndpoints;
use crate::error::TierMiss;
use crate::models::{DataType, Params};

pub use afd::AfdFetcher;
pub use alerts::AlertsFetcher;
pub use current::CurrentConditionsFetcher;
pub use forecast::ForecastFetcher;
pub use product::extract_preformatted;
pub use tropical::TropicalFetcher;

/// Per-type source knowledge used by the tiered resolver
#[async_trait]
pub trait DomainFetcher: Send + Sync {
    fn data_type(&self) -> DataType;

    /// Snapshot filename relative to a snapshot base
    fn snapshot_file(&self, params: &Params) -> Result<String, TierMiss>;

    /// Validate a snapshot document and tag it
    fn decode_snapshot(
        &self,
        params: &Params,
        value: serde_json::Value,
    ) -> Result<RawRecord, TierMiss>;

    /// Pull the data from the live upstream APIs
    async fn fetch_live(
        &self,
        transport: &dyn WeatherTransport,
        params: &Params,
    ) -> Result<RawRecord, TierMiss>;
}

/// One fetcher per data type
pub struct FetcherSet {
    current: CurrentConditionsFetcher,
    forecast: ForecastFetcher,
    alerts: AlertsFetcher,
    afd: AfdFetcher,
    tropical: TropicalFetcher,
}

impl FetcherSet {
    pub fn new(endpoints: &ApiEndpoints, clock: Arc<dyn Clock>) -> Self {
        Self {
            current: CurrentConditionsFetcher::new(endpoints),
            forecast: ForecastFetcher::new(endpoints),
            alerts: AlertsFetcher::new(endpoints),
            afd: AfdFetcher::new(endpoints, clock),
            tropical: TropicalFetcher::new(endpoints),
        }
    }

    pub fn get(&self, data_type: DataType) -> &dyn DomainFetcher {
        match data_type {
            DataType::CurrentConditions => &self.current,
            DataType::Forecast => &self.forecast,
            DataType::Alerts => &self.alerts,
            DataType::Afd => &self.afd,
            DataType::Tropical => &self.tropical,
        }
    }
}

/// Snapshot filename component: lower-cased, whitespace runs become `_`
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Coordinate as the NWS API wants it: at most four decimals, no trailing zeros
pub fn format_coordinate(value: f64) -> String {
    let fixed = format!("{:.4}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// `lat` and `lon` from the params, formatted for URLs
pub(crate) fn point_params(params: &Params) -> Result<(String, String), TierMiss> {
    let lat = params.coordinate("lat")?;
    let lon = params.coordinate("lon")?;
    Ok((format_coordinate(lat), format_coordinate(lon)))
}

/// Resolve a lat/lon to its NWS forecast grid
pub(crate) async fn resolve_point(
    transport: &dyn WeatherTransport,
    nws_base: &str,
    data_type: DataType,
    lat: &str,
    lon: &str,
) -> Result<PointProperties, TierMiss> {
    let url = format!("{}/points/{},{}", nws_base.trim_end_matches('/'), lat, lon);
    let value = transport.get_json(&url).await?;
    let points: PointsResponse = decode(data_type, value)?;
    debug!(
        "Point {},{} is grid {} {},{}",
        lat, lon, points.properties.grid_id, points.properties.grid_x, points.properties.grid_y
    );
    Ok(points.properties)
}
