use async_trait::async_trait;

use super::{DomainFetcher, point_params, slug};
use crate::client::models::{AlertsResponse, RawAlerts, SnapshotAlerts, decode};
use crate::client::{RawRecord, WeatherTransport};
use crate::config::ApiEndpoints;
use crate::error::TierMiss;
use crate::models::{DataType, Params};

/// Active alerts for a point
pub struct AlertsFetcher {
    nws: String,
}

impl AlertsFetcher {
    pub fn new(endpoints: &ApiEndpoints) -> Self {
        Self {
            nws: endpoints.nws.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl DomainFetcher for AlertsFetcher {
    fn data_type(&self) -> DataType {
        DataType::Alerts
    }

    fn snapshot_file(&self, params: &Params) -> Result<String, TierMiss> {
        Ok(format!("{}_alerts.json", slug(params.require("county")?)))
    }

    fn decode_snapshot(&self, _params: &Params, value: serde_json::Value) -> Result<RawRecord, TierMiss> {
        let snapshot: SnapshotAlerts = decode(DataType::Alerts, value)?;
        Ok(RawRecord::Alerts(RawAlerts::Snapshot(snapshot.alerts)))
    }

    async fn fetch_live(
        &self,
        transport: &dyn WeatherTransport,
        params: &Params,
    ) -> Result<RawRecord, TierMiss> {
        let (lat, lon) = point_params(params)?;
        let url = format!("{}/alerts/active?point={},{}", self.nws, lat, lon);
        let response: AlertsResponse = decode(DataType::Alerts, transport.get_json(&url).await?)?;
        Ok(RawRecord::Alerts(RawAlerts::Nws(response.features)))
    }
}
