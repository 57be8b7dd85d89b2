use std::sync::Arc;

use async_trait::async_trait;

use super::{DomainFetcher, extract_preformatted, slug};
use crate::cache::Clock;
use crate::client::models::{RawAfd, SnapshotAfd, decode};
use crate::client::{RawRecord, WeatherTransport};
use crate::config::ApiEndpoints;
use crate::error::TierMiss;
use crate::models::{DataType, Params};

/// Area forecast discussion for a forecast office
pub struct AfdFetcher {
    products: String,
    /// Stamps product pages, which carry no issuance time of their own
    clock: Arc<dyn Clock>,
}

impl AfdFetcher {
    pub fn new(endpoints: &ApiEndpoints, clock: Arc<dyn Clock>) -> Self {
        Self {
            products: endpoints.products.trim_end_matches('/').to_string(),
            clock,
        }
    }

    fn product_url(&self, wfo: &str) -> String {
        let wfo = wfo.to_uppercase();
        format!(
            "{}/product.php?site={wfo}&issuedby={wfo}&product=AFD&format=txt&version=1&glossary=0",
            self.products
        )
    }
}

#[async_trait]
impl DomainFetcher for AfdFetcher {
    fn data_type(&self) -> DataType {
        DataType::Afd
    }

    fn snapshot_file(&self, params: &Params) -> Result<String, TierMiss> {
        Ok(format!("{}_afd.json", slug(params.require("wfo")?)))
    }

    fn decode_snapshot(&self, _params: &Params, value: serde_json::Value) -> Result<RawRecord, TierMiss> {
        let snapshot: SnapshotAfd = decode(DataType::Afd, value)?;
        if snapshot.content.trim().is_empty() {
            return Err(TierMiss::malformed(DataType::Afd, "snapshot content is empty"));
        }
        Ok(RawRecord::Afd(RawAfd::Snapshot(snapshot)))
    }

    async fn fetch_live(
        &self,
        transport: &dyn WeatherTransport,
        params: &Params,
    ) -> Result<RawRecord, TierMiss> {
        let wfo = params.require("wfo")?;
        let body = transport.get_text(&self.product_url(wfo)).await?;
        let text = extract_preformatted(&body)
            .ok_or_else(|| TierMiss::malformed(DataType::Afd, "product page has no discussion text"))?;

        Ok(RawRecord::Afd(RawAfd::ProductPage {
            text,
            fetched_at: self.clock.now_ms() / 1000,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::clock::ManualClock;
    use crate::client::mock::MockTransport;
    use crate::fetchers::test_support::*;
    use serde_json::json;

    fn fetcher() -> AfdFetcher {
        AfdFetcher::new(&endpoints(), Arc::new(ManualClock::at(1_717_250_000_000)))
    }

    #[test]
    fn test_snapshot_file_lowercases_office() {
        assert_eq!(fetcher().snapshot_file(&Params::office("MHX")).unwrap(), "mhx_afd.json");
        assert!(fetcher().snapshot_file(&Params::office("  ")).is_err());
    }

    #[test]
    fn test_decode_snapshot() {
        let params = Params::office("MHX");
        let ok = json!({"content": "FXUS62 KMHX", "timestamp": 1717250000});
        assert!(fetcher().decode_snapshot(&params, ok).is_ok());

        let blank = json!({"content": "   ", "timestamp": 1717250000});
        assert!(fetcher().decode_snapshot(&params, blank).is_err());

        let missing = json!({"timestamp": 1717250000});
        assert!(fetcher().decode_snapshot(&params, missing).is_err());
    }

    #[tokio::test]
    async fn test_live_product_page() {
        let url = format!(
            "{}/product.php?site=MHX&issuedby=MHX&product=AFD&format=txt&version=1&glossary=0",
            PRODUCTS
        );
        let mock = MockTransport::new()
            .with_text(&url, "<html><body><pre>\nFXUS62 KMHX 011930\nAFDMHX\n</pre></body></html>")
            .await;

        match fetcher().fetch_live(&mock, &Params::office("mhx")).await.unwrap() {
            RawRecord::Afd(RawAfd::ProductPage { text, fetched_at }) => {
                assert_eq!(text, "FXUS62 KMHX 011930\nAFDMHX");
                assert_eq!(fetched_at, 1_717_250_000);
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_live_page_without_text() {
        let mock = MockTransport::new()
            .with_text(
                &format!("{}/product.php*", PRODUCTS),
                "<html><body>None issued by this office recently.</body></html>",
            )
            .await;
        let result = fetcher().fetch_live(&mock, &Params::office("MHX")).await;
        assert!(matches!(result, Err(TierMiss::Malformed { .. })));
    }
}
