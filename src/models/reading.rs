//! Numeric display value with an explicit "not available" sentinel

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Sentinel shown wherever a value is missing
pub const NOT_AVAILABLE: &str = "N/A";

/// A number or `"N/A"`.
///
/// Serializes as a plain JSON number (integers without a fraction) or the
/// string `"N/A"`, so consumers never see `null`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Reading {
    Value(f64),
    #[default]
    NotAvailable,
}

impl Reading {
    /// Non-finite inputs collapse to `NotAvailable`
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) if v.is_finite() => Reading::Value(v),
            _ => Reading::NotAvailable,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Value(v) => Some(*v),
            Reading::NotAvailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Reading::Value(_))
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reading::Value(v) if v.fract() == 0.0 => write!(f, "{}", *v as i64),
            Reading::Value(v) => write!(f, "{}", v),
            Reading::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl Serialize for Reading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Reading::Value(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => {
                serializer.serialize_i64(*v as i64)
            }
            Reading::Value(v) => serializer.serialize_f64(*v),
            Reading::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for Reading {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match raw {
            serde_json::Value::Number(n) => Reading::from_option(n.as_f64()),
            serde_json::Value::String(s) => Reading::from_option(s.trim().parse().ok()),
            _ => Reading::NotAvailable,
        })
    }
}
