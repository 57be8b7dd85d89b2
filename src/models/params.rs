//! Request parameters for a `get_data` call

use crate::error::TierMiss;

use super::TropicalSubType;

/// Parameter mapping for a request.
///
/// Insertion order is preserved so callers can build params however they like;
/// anything order-sensitive (cache keys) sorts explicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any existing value for `key`
    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl ToString) {
        let value = value.to_string();
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value,
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    /// Params for county-scoped data (current conditions, forecast, alerts)
    pub fn location(county: &str, lat: f64, lon: f64) -> Self {
        Self::new()
            .with("lat", lat)
            .with("lon", lon)
            .with("county", county)
    }

    /// Params for forecast-office-scoped data (AFD)
    pub fn office(wfo: &str) -> Self {
        Self::new().with("wfo", wfo)
    }

    /// Params for tropical products
    pub fn tropical(sub_type: TropicalSubType) -> Self {
        Self::new().with("subType", sub_type)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get a non-blank parameter or report it missing
    pub fn require(&self, key: &'static str) -> Result<&str, TierMiss> {
        match self.get(key).map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(TierMiss::MissingParam(key)),
        }
    }

    /// Parse a finite numeric parameter such as `lat` or `lon`
    pub fn coordinate(&self, key: &'static str) -> Result<f64, TierMiss> {
        let raw = self.require(key)?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| TierMiss::InvalidParam {
                name: key,
                value: raw.to_string(),
            })
    }

    /// Tropical subtype, defaulting to active storms when absent
    pub fn sub_type(&self) -> Result<TropicalSubType, TierMiss> {
        match self.get("subType") {
            None => Ok(TropicalSubType::ActiveStorms),
            Some(raw) => raw.parse().map_err(|_| TierMiss::InvalidParam {
                name: "subType",
                value: raw.to_string(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_replaces_existing_key() {
        let params = Params::new().with("county", "Pitt").with("county", "Craven");
        assert_eq!(params.get("county"), Some("Craven"));
        assert_eq!(params.iter().count(), 1);
    }

    #[test]
    fn test_location_params() {
        let params = Params::location("Pitt", 35.64, -77.39);
        assert_eq!(params.get("lat"), Some("35.64"));
        assert_eq!(params.get("lon"), Some("-77.39"));
        assert_eq!(params.get("county"), Some("Pitt"));
    }

    #[test]
    fn test_require_rejects_blank() {
        let params = Params::new().with("wfo", "  ");
        match params.require("wfo") {
            Err(TierMiss::MissingParam("wfo")) => (),
            other => panic!("Expected MissingParam, got {:?}", other),
        }
    }

    #[test]
    fn test_coordinate_parsing() {
        let params = Params::new().with("lat", "35.64").with("lon", "west");
        assert_eq!(params.coordinate("lat").unwrap(), 35.64);
        assert!(matches!(
            params.coordinate("lon"),
            Err(TierMiss::InvalidParam { name: "lon", .. })
        ));
        assert!(matches!(
            params.coordinate("county"),
            Err(TierMiss::MissingParam("county"))
        ));
    }

    #[test]
    fn test_sub_type_defaults_to_storms() {
        assert_eq!(
            Params::new().sub_type().unwrap(),
            TropicalSubType::ActiveStorms
        );
        assert_eq!(
            Params::tropical(TropicalSubType::AtlanticOutlook)
                .sub_type()
                .unwrap(),
            TropicalSubType::AtlanticOutlook
        );
        assert!(Params::new().with("subType", "indian").sub_type().is_err());
    }
}
