use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{model::Coordinates, provider::ServiceId};

const DEFAULT_LANGUAGE: &str = "en";

/// Configuration for a single remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub api_key: String,

    /// Override for the service origin, e.g. a local mock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Language requested from both services.
    #[serde(default = "default_language")]
    pub language: String,

    /// Example TOML:
    /// [services.openweather]
    /// api_key = "..."
    /// base_url = "http://127.0.0.1:8080"  # optional
    #[serde(default)]
    pub services: HashMap<String, ServiceConfig>,

    /// Fixed position used by the "my location" action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            services: HashMap::new(),
            location: None,
        }
    }
}

impl Config {
    /// Load config from disk (or defaults on first run), then apply
    /// `SUNDAY_<SERVICE>_API_KEY` environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let mut cfg = Self::load_from(&path)?;
        cfg.apply_key_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "sunday", "sunday")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory for persisted UI preferences.
    pub fn data_dir() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    /// Replace API keys with values from `lookup`, keyed by
    /// [`ServiceId::env_var`].
    pub fn apply_key_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for id in ServiceId::all() {
            if let Some(key) = lookup(&id.env_var()).filter(|k| !k.trim().is_empty()) {
                tracing::debug!(service = %id, "API key taken from environment");
                self.upsert_service_api_key(*id, key);
            }
        }
    }

    /// Set or replace a service API key, keeping any base URL override.
    pub fn upsert_service_api_key(&mut self, id: ServiceId, api_key: String) {
        self.services
            .entry(id.as_str().to_string())
            .and_modify(|svc| svc.api_key = api_key.clone())
            .or_insert(ServiceConfig { api_key, base_url: None });
    }

    /// Returns API key for a service, if present.
    pub fn service_api_key(&self, id: ServiceId) -> Option<&str> {
        self.services.get(id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_service_configured(&self, id: ServiceId) -> bool {
        self.service_api_key(id).is_some()
    }

    /// Configured origin for a service, or its public default.
    pub fn service_base_url(&self, id: ServiceId) -> &str {
        self.services
            .get(id.as_str())
            .and_then(|cfg| cfg.base_url.as_deref())
            .unwrap_or(id.default_base_url())
    }

    pub fn set_location(&mut self, latitude: f64, longitude: f64) {
        self.location = Some(Coordinates { latitude, longitude });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ServiceId;

    #[test]
    fn defaults_to_english_without_services() {
        let cfg = Config::default();
        assert_eq!(cfg.language, "en");
        assert!(!cfg.is_service_configured(ServiceId::OpenWeather));
        assert!(!cfg.is_service_configured(ServiceId::OpenCage));
    }

    #[test]
    fn set_api_key_for_service() {
        let mut cfg = Config::default();

        cfg.upsert_service_api_key(ServiceId::OpenWeather, "OPEN_KEY".into());

        assert_eq!(cfg.service_api_key(ServiceId::OpenWeather), Some("OPEN_KEY"));
        assert!(cfg.is_service_configured(ServiceId::OpenWeather));
        assert!(!cfg.is_service_configured(ServiceId::OpenCage));
    }

    #[test]
    fn upsert_keeps_base_url_override() {
        let mut cfg = Config::default();
        cfg.services.insert(
            "opencage".into(),
            ServiceConfig { api_key: "OLD".into(), base_url: Some("http://localhost:1".into()) },
        );

        cfg.upsert_service_api_key(ServiceId::OpenCage, "NEW".into());

        assert_eq!(cfg.service_api_key(ServiceId::OpenCage), Some("NEW"));
        assert_eq!(cfg.service_base_url(ServiceId::OpenCage), "http://localhost:1");
    }

    #[test]
    fn base_url_defaults_per_service() {
        let cfg = Config::default();
        assert_eq!(cfg.service_base_url(ServiceId::OpenWeather), "https://api.openweathermap.org");
        assert_eq!(cfg.service_base_url(ServiceId::OpenCage), "https://api.opencagedata.com");
    }

    #[test]
    fn environment_overrides_replace_keys() {
        let mut cfg = Config::default();
        cfg.upsert_service_api_key(ServiceId::OpenWeather, "FILE_KEY".into());

        cfg.apply_key_overrides(|name| match name {
            "SUNDAY_OPENWEATHER_API_KEY" => Some("ENV_KEY".into()),
            "SUNDAY_OPENCAGE_API_KEY" => Some("   ".into()),
            _ => None,
        });

        assert_eq!(cfg.service_api_key(ServiceId::OpenWeather), Some("ENV_KEY"));
        assert!(!cfg.is_service_configured(ServiceId::OpenCage));
    }

    #[test]
    fn save_and_load_roundtrip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.language = "de".into();
        cfg.upsert_service_api_key(ServiceId::OpenWeather, "KEY".into());
        cfg.set_location(51.5, -0.12);
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.language, "de");
        assert_eq!(loaded.service_api_key(ServiceId::OpenWeather), Some("KEY"));
        assert_eq!(loaded.location, Some(Coordinates { latitude: 51.5, longitude: -0.12 }));
    }

    #[test]
    fn base_url_is_read_from_service_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[services.openweather]
api_key = "OW"
base_url = "http://127.0.0.1:8080"

[services.opencage]
api_key = "OC"
"#,
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.service_base_url(ServiceId::OpenWeather), "http://127.0.0.1:8080");
        assert_eq!(cfg.service_base_url(ServiceId::OpenCage), "https://api.opencagedata.com");
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.services.is_empty());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "language = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
