use async_trait::async_trait;
use log::debug;

use super::{DomainFetcher, point_params, resolve_point, slug};
use crate::client::models::{ForecastResponse, RawForecast, SnapshotForecast, decode};
use crate::client::{RawRecord, WeatherTransport};
use crate::config::ApiEndpoints;
use crate::error::TierMiss;
use crate::models::{DataType, Params};

/// Daily and hourly periods from the NWS gridpoint forecast
pub struct ForecastFetcher {
    nws: String,
}

impl ForecastFetcher {
    pub fn new(endpoints: &ApiEndpoints) -> Self {
        Self {
            nws: endpoints.nws.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DomainFetcher for ForecastFetcher {
    fn data_type(&self) -> DataType {
        DataType::Forecast
    }

    fn snapshot_file(&self, params: &Params) -> Result<String, TierMiss> {
        Ok(format!("{}_forecast.json", slug(params.require("county")?)))
    }

    fn decode_snapshot(&self, _params: &Params, value: serde_json::Value) -> Result<RawRecord, TierMiss> {
        let snapshot: SnapshotForecast = decode(DataType::Forecast, value)?;
        if snapshot.daily.is_empty() {
            return Err(TierMiss::malformed(DataType::Forecast, "snapshot has no daily periods"));
        }
        Ok(RawRecord::Forecast(RawForecast::Snapshot(snapshot)))
    }

    async fn fetch_live(
        &self,
        transport: &dyn WeatherTransport,
        params: &Params,
    ) -> Result<RawRecord, TierMiss> {
        let data_type = DataType::Forecast;
        let (lat, lon) = point_params(params)?;
        let point = resolve_point(transport, &self.nws, data_type, &lat, &lon).await?;
        let grid = format!(
            "{}/gridpoints/{}/{},{}",
            self.nws, point.grid_id, point.grid_x, point.grid_y
        );

        let daily: ForecastResponse =
            decode(data_type, transport.get_json(&format!("{}/forecast", grid)).await?)?;
        if daily.properties.periods.is_empty() {
            return Err(TierMiss::malformed(data_type, "forecast has no periods"));
        }

        // Hourly is optional; a failure leaves it empty
        let hourly = match transport.get_json(&format!("{}/forecast/hourly", grid)).await {
            Ok(value) => match decode::<ForecastResponse>(data_type, value) {
                Ok(response) => response.properties.periods,
                Err(e) => {
                    debug!("Ignoring hourly forecast: {}", e);
                    Vec::new()
                }
            },
            Err(e) => {
                debug!("Hourly forecast unavailable: {}", e);
                Vec::new()
            }
        };

        Ok(RawRecord::Forecast(RawForecast::Nws {
            daily: daily.properties.periods,
            hourly,
        }))
    }
}
