use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::error::ClearSkyError;
use crate::models::clear_sky::{Atmosphere, ClearSkyInputs};
use crate::services::bird;

fn default_log_level() -> String { "info".to_string() }

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("atmosphere preset '{name}': {source}")]
    Atmosphere {
        name: String,
        #[source]
        source: ClearSkyError,
    },
    #[error("duplicate site id '{0}'")]
    DuplicateSite(String),
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Substituted for atmospheric fields a request leaves out
    #[serde(default)]
    pub atmosphere: Atmosphere,
    #[serde(default)]
    pub sites: Vec<SiteConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

/// A named location whose atmosphere is fixed in configuration.
#[derive(Debug, Deserialize, Serialize, Clone, ToSchema)]
pub struct SiteConfig {
    pub id: String,
    pub name: String,
    pub atmosphere: Atmosphere,
}

impl Config {
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Every preset goes through the same range checks as a request.
    fn validate(&self) -> Result<(), ConfigError> {
        check_atmosphere("default", &self.atmosphere)?;
        let mut seen = std::collections::HashSet::new();
        for site in &self.sites {
            if !seen.insert(site.id.as_str()) {
                return Err(ConfigError::DuplicateSite(site.id.clone()));
            }
            check_atmosphere(&site.id, &site.atmosphere)?;
        }
        Ok(())
    }

    pub fn site(&self, id: &str) -> Option<&SiteConfig> {
        self.sites.iter().find(|s| s.id == id)
    }
}

fn check_atmosphere(name: &str, atmosphere: &Atmosphere) -> Result<(), ConfigError> {
    let probe = ClearSkyInputs::from_atmosphere(0.0, 1.0, atmosphere, None);
    bird::validate(&probe).map_err(|source| ConfigError::Atmosphere {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Parameter;

    const SAMPLE: &str = r#"{
        "server": { "port": 8080 },
        "atmosphere": { "pressure": 1013, "ozone": 0.3, "water": 1.5,
                        "taua": 0.08, "ba": 0.85, "albedo": 0.2 },
        "sites": [
            { "id": "golden", "name": "Golden, CO",
              "atmosphere": { "pressure": 820, "ozone": 0.3, "water": 1.5,
                              "taua": 0.08, "ba": 0.85, "albedo": 0.2 } }
        ]
    }"#;

    #[test]
    fn test_sample_config_parses() {
        let config = Config::from_json(SAMPLE).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.site("golden").unwrap().atmosphere.pressure, 820.0);
        assert!(config.site("denver").is_none());
    }

    #[test]
    fn test_missing_atmosphere_uses_default() {
        let config = Config::from_json(r#"{ "server": { "port": 1 } }"#).unwrap();
        assert_eq!(config.atmosphere, Atmosphere::default());
        assert!(config.sites.is_empty());
    }

    #[test]
    fn test_invalid_site_atmosphere_is_rejected() {
        let bad = SAMPLE.replace("\"albedo\": 0.2 } }", "\"albedo\": 140 } }");
        match Config::from_json(&bad) {
            Err(ConfigError::Atmosphere { name, source }) => {
                assert_eq!(name, "golden");
                assert_eq!(source.parameter(), Parameter::Albedo);
            }
            other => panic!("expected atmosphere error, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_site_is_rejected() {
        let json = r#"{
            "server": { "port": 1 },
            "sites": [
                { "id": "a", "name": "A", "atmosphere": { "pressure": 1013, "ozone": 0.3, "water": 1.5, "taua": 0.08, "ba": 0.85, "albedo": 0.2 } },
                { "id": "a", "name": "B", "atmosphere": { "pressure": 1013, "ozone": 0.3, "water": 1.5, "taua": 0.08, "ba": 0.85, "albedo": 0.2 } }
            ]
        }"#;
        assert!(matches!(Config::from_json(json), Err(ConfigError::DuplicateSite(id)) if id == "a"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Config::load("/nonexistent/bird.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/bird.json"));
    }
}
