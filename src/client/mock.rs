//! Mock transport for testing
//!
//! Routes map a location to a canned response. A route ending in `*` matches
//! any location with that prefix; unrouted locations answer `NotFound`, which
//! is how an absent snapshot file or missing product looks in production.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::WeatherTransport;
use crate::error::FetchError;

/// Canned response for one route
#[derive(Debug, Clone)]
pub enum MockResponse {
    Json(serde_json::Value),
    Text(String),
    /// HTTP status failure, mapped the way the real transport maps it
    Status(u16),
    /// Connection-level failure
    Network,
}

impl MockResponse {
    fn to_error(&self, location: &str) -> Option<FetchError> {
        match self {
            MockResponse::Status(404) => Some(FetchError::NotFound(location.to_string())),
            MockResponse::Status(429) => Some(FetchError::RateLimit(Duration::from_secs(60))),
            MockResponse::Status(code) if *code >= 500 => {
                Some(FetchError::ServerError(format!("status {}", code)))
            }
            MockResponse::Status(code) => Some(FetchError::UnexpectedStatus(*code)),
            MockResponse::Network => Some(FetchError::Network("connection refused".to_string())),
            _ => None,
        }
    }
}

/// Mock transport for testing.
///
/// # Example
/// ```ignore
/// let mock = MockTransport::new()
///     .with_json("data/pitt_alerts.json", json!({"alerts": []}))
///     .await
///     .with_status("https://api.weather.gov/*", 503)
///     .await;
/// ```
#[derive(Default, Clone)]
pub struct MockTransport {
    routes: Arc<Mutex<HashMap<String, MockResponse>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_response(self, location: &str, response: MockResponse) -> Self {
        self.routes
            .lock()
            .await
            .insert(location.to_string(), response);
        self
    }

    pub async fn with_json(self, location: &str, value: serde_json::Value) -> Self {
        self.with_response(location, MockResponse::Json(value)).await
    }

    pub async fn with_text(self, location: &str, text: &str) -> Self {
        self.with_response(location, MockResponse::Text(text.to_string()))
            .await
    }

    pub async fn with_status(self, location: &str, status: u16) -> Self {
        self.with_response(location, MockResponse::Status(status))
            .await
    }

    pub async fn with_network_error(self, location: &str) -> Self {
        self.with_response(location, MockResponse::Network).await
    }

    /// Every location requested so far, in order
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Number of requests whose location contains `fragment`
    pub async fn calls_matching(&self, fragment: &str) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.contains(fragment))
            .count()
    }

    async fn respond(&self, location: &str) -> Result<MockResponse, FetchError> {
        self.calls.lock().await.push(location.to_string());

        let routes = self.routes.lock().await;
        let response = routes.get(location).cloned().or_else(|| {
            routes
                .iter()
                .filter_map(|(route, response)| {
                    route
                        .strip_suffix('*')
                        .filter(|prefix| location.starts_with(prefix))
                        .map(|prefix| (prefix.len(), response))
                })
                .max_by_key(|(len, _)| *len)
                .map(|(_, response)| response.clone())
        });

        match response {
            None => Err(FetchError::NotFound(location.to_string())),
            Some(response) => match response.to_error(location) {
                Some(err) => Err(err),
                None => Ok(response),
            },
        }
    }
}

#[async_trait]
impl WeatherTransport for MockTransport {
    async fn get_json(&self, location: &str) -> Result<serde_json::Value, FetchError> {
        match self.respond(location).await? {
            MockResponse::Json(value) => Ok(value),
            MockResponse::Text(text) => serde_json::from_str(&text)
                .map_err(|e| FetchError::InvalidResponse(e.to_string())),
            _ => Err(FetchError::InvalidResponse(location.to_string())),
        }
    }

    async fn get_text(&self, location: &str) -> Result<String, FetchError> {
        match self.respond(location).await? {
            MockResponse::Text(text) => Ok(text),
            MockResponse::Json(value) => Ok(value.to_string()),
            _ => Err(FetchError::InvalidResponse(location.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_exact_and_prefix_routes() {
        let mock = MockTransport::new()
            .with_json("data/pitt_weather.json", json!({"weather": {}}))
            .await
            .with_status("https://api.weather.gov/*", 503)
            .await
            .with_json("https://api.weather.gov/alerts/*", json!({"features": []}))
            .await;

        assert!(mock.get_json("data/pitt_weather.json").await.is_ok());
        assert!(matches!(
            mock.get_json("https://api.weather.gov/points/1,2").await,
            Err(FetchError::ServerError(_))
        ));
        // Longest prefix wins
        assert!(
            mock.get_json("https://api.weather.gov/alerts/active?point=1,2")
                .await
                .is_ok()
        );
        assert!(matches!(
            mock.get_json("../data/pitt_weather.json").await,
            Err(FetchError::NotFound(_))
        ));
        assert_eq!(mock.call_count().await, 4);
        assert_eq!(mock.calls_matching("api.weather.gov").await, 2);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let mock = MockTransport::new().with_text("page", "<pre>x</pre>").await;
        let handle = mock.clone();
        assert_eq!(mock.get_text("page").await.unwrap(), "<pre>x</pre>");
        assert_eq!(handle.calls().await, vec!["page".to_string()]);
    }
}
