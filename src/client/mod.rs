//! Upstream access: the transport seam and raw wire shapes

use async_trait::async_trait;

use crate::error::FetchError;

pub mod http;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use http::HttpTransport;
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::{MockResponse, MockTransport};
pub use models::{RawRecord, SourceKind};

/// Fetch JSON or text from a location.
///
/// A location is either an absolute URL or a file path. Implementations map
/// "nothing there" (HTTP 404, missing file) to [`FetchError::NotFound`].
#[async_trait]
pub trait WeatherTransport: Send + Sync {
    async fn get_json(&self, location: &str) -> Result<serde_json::Value, FetchError>;

    async fn get_text(&self, location: &str) -> Result<String, FetchError>;
}

/// Join a base (URL prefix or directory) and a relative path with one `/`
pub fn join_location(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_location() {
        assert_eq!(join_location("data", "pitt_weather.json"), "data/pitt_weather.json");
        assert_eq!(join_location("../data/", "/mhx_afd.json"), "../data/mhx_afd.json");
        assert_eq!(
            join_location("https://wx.example.org/data", "tropical_storms.json"),
            "https://wx.example.org/data/tropical_storms.json"
        );
        assert_eq!(join_location("", "x.json"), "x.json");
    }
}
