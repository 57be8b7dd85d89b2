use async_trait::async_trait;
use log::debug;

use super::{DomainFetcher, point_params, resolve_point, slug};
use crate::client::models::{
    ObservationResponse, OpenMeteoResponse, RawCurrent, SnapshotWeather, StationsResponse, decode,
};
use crate::client::{RawRecord, WeatherTransport};
use crate::config::ApiEndpoints;
use crate::error::TierMiss;
use crate::models::{DataType, Params};

const OPEN_METEO_HOURLY: &str = "relativehumidity_2m,dewpoint_2m,surface_pressure,visibility";

/// Current conditions: Open-Meteo first, then the nearest NWS station
pub struct CurrentConditionsFetcher {
    nws: String,
    open_meteo: String,
}

impl CurrentConditionsFetcher {
    pub fn new(endpoints: &ApiEndpoints) -> Self {
        Self {
            nws: endpoints.nws.trim_end_matches('/').to_string(),
            open_meteo: endpoints.open_meteo.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch_open_meteo(
        &self,
        transport: &dyn WeatherTransport,
        lat: &str,
        lon: &str,
    ) -> Result<RawRecord, TierMiss> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&current_weather=true&hourly={}\
             &temperature_unit=fahrenheit&windspeed_unit=mph&timezone=auto&forecast_days=1",
            self.open_meteo, lat, lon, OPEN_METEO_HOURLY
        );
        let value = transport.get_json(&url).await?;
        let response: OpenMeteoResponse = decode(DataType::CurrentConditions, value)?;
        if response.current_weather.temperature.is_none() {
            return Err(TierMiss::malformed(
                DataType::CurrentConditions,
                "Open-Meteo response has no temperature",
            ));
        }
        Ok(RawRecord::Current(RawCurrent::OpenMeteo(response)))
    }

    async fn fetch_observation(
        &self,
        transport: &dyn WeatherTransport,
        lat: &str,
        lon: &str,
    ) -> Result<RawRecord, TierMiss> {
        let data_type = DataType::CurrentConditions;
        let point = resolve_point(transport, &self.nws, data_type, lat, lon).await?;

        let stations_url = point.observation_stations.clone().unwrap_or_else(|| {
            format!(
                "{}/gridpoints/{}/{},{}/stations",
                self.nws, point.grid_id, point.grid_x, point.grid_y
            )
        });
        let stations: StationsResponse = decode(data_type, transport.get_json(&stations_url).await?)?;
        let station = stations
            .features
            .into_iter()
            .next()
            .ok_or_else(|| TierMiss::malformed(data_type, "no observation stations for point"))?
            .properties;

        let url = format!(
            "{}/stations/{}/observations/latest",
            self.nws, station.station_identifier
        );
        let observation: ObservationResponse = decode(data_type, transport.get_json(&url).await?)?;

        Ok(RawRecord::Current(RawCurrent::Observation {
            station_name: station.name.unwrap_or(station.station_identifier),
            observation: observation.properties,
        }))
    }
}

#[async_trait]
impl DomainFetcher for CurrentConditionsFetcher {
    fn data_type(&self) -> DataType {
        DataType::CurrentConditions
    }

    fn snapshot_file(&self, params: &Params) -> Result<String, TierMiss> {
        Ok(format!("{}_weather.json", slug(params.require("county")?)))
    }

    fn decode_snapshot(&self, _params: &Params, value: serde_json::Value) -> Result<RawRecord, TierMiss> {
        let snapshot: SnapshotWeather = decode(DataType::CurrentConditions, value)?;
        Ok(RawRecord::Current(RawCurrent::Snapshot(snapshot.weather)))
    }

    async fn fetch_live(
        &self,
        transport: &dyn WeatherTransport,
        params: &Params,
    ) -> Result<RawRecord, TierMiss> {
        let (lat, lon) = point_params(params)?;
        match self.fetch_open_meteo(transport, &lat, &lon).await {
            Ok(raw) => Ok(raw),
            Err(miss) => {
                debug!("Open-Meteo unavailable ({}), trying NWS observations", miss);
                self.fetch_observation(transport, &lat, &lon).await
            }
        }
    }
}
