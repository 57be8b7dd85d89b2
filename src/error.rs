//! Error types for CountyWX

use std::time::Duration;
use thiserror::Error;

use crate::models::DataType;

/// Result type alias for CountyWX operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport-level failures for HTTP and snapshot reads
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unexpected status code: {0}")]
    UnexpectedStatus(u16),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            FetchError::Network("Failed to connect".to_string())
        } else if err.is_decode() {
            FetchError::InvalidResponse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Why a single tier could not produce a record.
///
/// Every variant means "advance to the next tier"; none of them reach a consumer.
#[derive(Debug, Error)]
pub enum TierMiss {
    #[error("no fresh cache entry")]
    CacheMiss,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("malformed {data_type} data: {detail}")]
    Malformed { data_type: DataType, detail: String },

    #[error("missing required parameter `{0}`")]
    MissingParam(&'static str),

    #[error("invalid parameter `{name}`: {value}")]
    InvalidParam { name: &'static str, value: String },
}

impl TierMiss {
    /// Shorthand for a decoded-but-wrong-shape response
    pub fn malformed(data_type: DataType, detail: impl std::fmt::Display) -> Self {
        TierMiss::Malformed {
            data_type,
            detail: detail.to_string(),
        }
    }

    /// True for the expected "nothing there" outcomes that only deserve debug logging
    pub fn is_absent(&self) -> bool {
        matches!(
            self,
            TierMiss::CacheMiss | TierMiss::Fetch(FetchError::NotFound(_))
        )
    }
}

/// Local cache storage errors
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Cache I/O error: {0}")]
    Io(String),

    #[error("Could not determine cache directory")]
    NoHome,

    #[error("Cache lock poisoned")]
    Poisoned,
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Configuration already exists at {0}. Use --force to overwrite.")]
    AlreadyExists(String),

    #[error("Unknown county `{0}`. Pass --lat/--lon or add it to the config file.")]
    UnknownCounty(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
