//! Configuration management for CountyWX

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cache::TtlTable;
use crate::error::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Counties the dashboard knows by name
    #[serde(default = "default_counties")]
    pub counties: Vec<County>,
}

/// Everything the weather data service needs, injected at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Cache lifetimes (minutes)
    pub ttl: TtlTable,

    /// Snapshot locations tried in order: directories or URL prefixes
    pub snapshot_bases: Vec<String>,

    pub endpoints: ApiEndpoints,

    /// api.weather.gov rejects requests without one
    pub user_agent: String,

    pub request_timeout_secs: u64,

    pub requests_per_second: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            ttl: TtlTable::default(),
            snapshot_bases: vec!["data".to_string(), "../data".to_string()],
            endpoints: ApiEndpoints::default(),
            user_agent: format!(
                "countywx/{} (https://github.com/countywx/countywx)",
                env!("CARGO_PKG_VERSION")
            ),
            request_timeout_secs: 15,
            requests_per_second: 5,
        }
    }
}

/// Upstream API base URLs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiEndpoints {
    /// National Weather Service API
    pub nws: String,
    /// Open-Meteo forecast API
    pub open_meteo: String,
    /// NWS text product pages
    pub products: String,
    /// National Hurricane Center
    pub nhc: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            nws: "https://api.weather.gov".to_string(),
            open_meteo: "https://api.open-meteo.com".to_string(),
            products: "https://forecast.weather.gov".to_string(),
            nhc: "https://www.nhc.noaa.gov".to_string(),
        }
    }
}

/// A named county and the forecast office that serves it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct County {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub wfo: String,
}

impl County {
    fn new(name: &str, lat: f64, lon: f64, wfo: &str) -> Self {
        Self {
            name: name.to_string(),
            lat,
            lon,
            wfo: wfo.to_string(),
        }
    }
}

fn default_counties() -> Vec<County> {
    vec![
        County::new("Pitt", 35.64, -77.39, "MHX"),
        County::new("Beaufort", 35.48, -76.84, "MHX"),
        County::new("Craven", 35.12, -77.08, "MHX"),
        County::new("Lenoir", 35.24, -77.64, "MHX"),
        County::new("Greene", 35.48, -77.68, "MHX"),
        County::new("Martin", 35.84, -77.11, "MHX"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            counties: default_counties(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".countywx").join("config.yaml"))
    }

    /// Load from an explicit path, or the default path.
    ///
    /// A missing default file yields the built-in defaults; a missing
    /// explicit file is an error.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(Path::new(path)),
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    log::debug!("No config at {}, using defaults", path.display());
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    /// Look up a county by name, ignoring case
    pub fn county(&self, name: &str) -> std::result::Result<&County, ConfigError> {
        let wanted = name.trim();
        self.counties
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConfigError::UnknownCounty(wanted.to_string()))
    }

    fn validate(&self) -> Result<()> {
        for county in &self.counties {
            if county.name.trim().is_empty() {
                return Err(ConfigError::Invalid("county with empty name".to_string()).into());
            }
            if !(-90.0..=90.0).contains(&county.lat) || !(-180.0..=180.0).contains(&county.lon) {
                return Err(ConfigError::Invalid(format!(
                    "county {} has coordinates out of range",
                    county.name
                ))
                .into());
            }
        }
        if self.service.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid("user_agent must not be empty".to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.service.snapshot_bases, vec!["data", "../data"]);
        assert_eq!(config.service.endpoints.nws, "https://api.weather.gov");
        assert_eq!(config.service.ttl.alerts, 2);
        assert_eq!(config.counties.len(), 6);
        assert!(config.service.user_agent.starts_with("countywx/"));
    }

    #[test]
    fn test_county_lookup() {
        let config = Config::default();
        let pitt = config.county("pitt").unwrap();
        assert_eq!(pitt.lat, 35.64);
        assert_eq!(pitt.wfo, "MHX");
        assert!(matches!(
            config.county("Atlantis"),
            Err(ConfigError::UnknownCounty(name)) if name == "Atlantis"
        ));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "service:\n  snapshot_bases: [\"/srv/wx\"]\n  ttl:\n    alerts: 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.service.snapshot_bases, vec!["/srv/wx"]);
        assert_eq!(config.service.ttl.alerts, 5);
        assert_eq!(config.service.ttl.afd, 180);
        assert_eq!(config.service.endpoints, ApiEndpoints::default());
        assert_eq!(config.counties.len(), 6);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let mut config = Config::default();
        config.counties.truncate(1);
        config.save_to(&path).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_load_errors() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(Config::load_at(missing.to_str()).is_err());

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "service: [not, a, map]").unwrap();
        assert!(Config::load_from(&bad).is_err());

        let out_of_range = dir.path().join("range.yaml");
        std::fs::write(
            &out_of_range,
            "counties:\n  - {name: Nowhere, lat: 123.0, lon: 0.0, wfo: XXX}\n",
        )
        .unwrap();
        assert!(Config::load_from(&out_of_range).is_err());
    }
}
