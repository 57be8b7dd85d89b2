//! reqwest-backed transport with local snapshot file support

use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Response, StatusCode, header};

use super::WeatherTransport;
use crate::error::FetchError;

/// Accept header the NWS API expects; other hosts ignore it
const ACCEPT: &str = "application/geo+json, application/json;q=0.9, text/html;q=0.8";

/// Default wait when a 429 carries no `Retry-After`
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP transport shared by every fetcher.
///
/// Locations starting with `http://` or `https://` go over the network; any
/// other location is treated as a file path, so snapshot bases may be either
/// a URL prefix or a directory.
pub struct HttpTransport {
    http: HttpClient,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl HttpTransport {
    pub fn new(
        user_agent: &str,
        timeout: Duration,
        requests_per_second: u32,
    ) -> Result<Self, FetchError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));

        let http = HttpClient::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(rate)));

        Ok(Self { http, rate_limiter })
    }

    async fn send(&self, url: &str) -> Result<Response, FetchError> {
        self.rate_limiter.until_ready().await;

        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        match status {
            status if status.is_success() => Ok(response),
            StatusCode::NOT_FOUND => Err(FetchError::NotFound(url.to_string())),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                Err(FetchError::RateLimit(Duration::from_secs(retry_after)))
            }
            status if status.is_server_error() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(FetchError::ServerError(body))
            }
            status => Err(FetchError::UnexpectedStatus(status.as_u16())),
        }
    }
}

/// True when the location should be fetched over HTTP
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

async fn read_local(location: &str) -> Result<String, FetchError> {
    let path = Path::new(location);
    debug!("Reading {}", path.display());
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => FetchError::NotFound(location.to_string()),
        _ => FetchError::Network(format!("{}: {}", location, e)),
    })
}

#[async_trait]
impl WeatherTransport for HttpTransport {
    async fn get_json(&self, location: &str) -> Result<serde_json::Value, FetchError> {
        if is_remote(location) {
            self.send(location)
                .await?
                .json::<serde_json::Value>()
                .await
                .map_err(|e| FetchError::InvalidResponse(format!("{}: {}", location, e)))
        } else {
            let body = read_local(location).await?;
            serde_json::from_str(&body)
                .map_err(|e| FetchError::InvalidResponse(format!("{}: {}", location, e)))
        }
    }

    async fn get_text(&self, location: &str) -> Result<String, FetchError> {
        if is_remote(location) {
            Ok(self.send(location).await?.text().await?)
        } else {
            read_local(location).await
        }
    }
}
