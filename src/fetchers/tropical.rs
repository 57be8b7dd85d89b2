use async_trait::async_trait;

use super::{DomainFetcher, extract_preformatted};
use crate::client::models::{NhcStormsResponse, RawTropical, SnapshotOutlook, decode};
use crate::client::{RawRecord, SourceKind, WeatherTransport};
use crate::config::ApiEndpoints;
use crate::error::TierMiss;
use crate::models::{DataType, Params, TropicalSubType};

/// Active storms and tropical weather outlooks from the hurricane center
pub struct TropicalFetcher {
    nhc: String,
}

impl TropicalFetcher {
    pub fn new(endpoints: &ApiEndpoints) -> Self {
        Self {
            nhc: endpoints.nhc.trim_end_matches('/').to_string(),
        }
    }

    fn live_url(&self, sub_type: TropicalSubType) -> String {
        match sub_type {
            TropicalSubType::ActiveStorms => format!("{}/CurrentStorms.json", self.nhc),
            TropicalSubType::AtlanticOutlook => format!("{}/text/MIATWOAT.shtml", self.nhc),
            TropicalSubType::PacificOutlook => format!("{}/text/MIATWOEP.shtml", self.nhc),
        }
    }
}

#[async_trait]
impl DomainFetcher for TropicalFetcher {
    fn data_type(&self) -> DataType {
        DataType::Tropical
    }

    fn snapshot_file(&self, params: &Params) -> Result<String, TierMiss> {
        Ok(params.sub_type()?.snapshot_file().to_string())
    }

    fn decode_snapshot(&self, params: &Params, value: serde_json::Value) -> Result<RawRecord, TierMiss> {
        let data_type = DataType::Tropical;
        let raw = if params.sub_type()?.is_outlook() {
            let snapshot: SnapshotOutlook = decode(data_type, value)?;
            if snapshot.outlook.trim().is_empty() {
                return Err(TierMiss::malformed(data_type, "snapshot outlook is empty"));
            }
            RawTropical::Outlook {
                source: SourceKind::Snapshot,
                text: snapshot.outlook,
            }
        } else {
            let snapshot: NhcStormsResponse = decode(data_type, value)?;
            RawTropical::Storms {
                source: SourceKind::Snapshot,
                storms: snapshot.active_storms,
            }
        };
        Ok(RawRecord::Tropical(raw))
    }

    async fn fetch_live(
        &self,
        transport: &dyn WeatherTransport,
        params: &Params,
    ) -> Result<RawRecord, TierMiss> {
        let data_type = DataType::Tropical;
        let sub_type = params.sub_type()?;
        let url = self.live_url(sub_type);

        let raw = if sub_type.is_outlook() {
            let body = transport.get_text(&url).await?;
            let text = extract_preformatted(&body)
                .ok_or_else(|| TierMiss::malformed(data_type, "outlook page has no product text"))?;
            RawTropical::Outlook {
                source: SourceKind::NhcApi,
                text,
            }
        } else {
            let response: NhcStormsResponse = decode(data_type, transport.get_json(&url).await?)?;
            RawTropical::Storms {
                source: SourceKind::NhcApi,
                storms: response.active_storms,
            }
        };
        Ok(RawRecord::Tropical(raw))
    }
}
