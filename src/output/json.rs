//! JSON output formatting

use chrono::Utc;
use serde::Serialize;

use crate::models::{DataType, NormalizedRecord};

/// Record wrapped with metadata
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// When the output was produced
    pub timestamp: String,

    /// CLI version
    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<DataType>,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                data_type: None,
            },
        }
    }

    pub fn with_data_type(mut self, data_type: DataType) -> Self {
        self.meta.data_type = Some(data_type);
        self
    }
}

/// Format data as pretty-printed JSON
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

/// Format one normalized record, tagging the metadata with its type
pub fn format_record(record: &NormalizedRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(record).with_data_type(record.data_type()))
}
