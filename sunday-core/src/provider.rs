use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, ForecastPayload},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug, sync::Arc};

pub mod openweather;

/// Remote services the app talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceId {
    /// Forecast provider.
    OpenWeather,
    /// Geocoding provider for city suggestions.
    OpenCage,
}

impl ServiceId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceId::OpenWeather => "openweather",
            ServiceId::OpenCage => "opencage",
        }
    }

    pub const fn all() -> &'static [ServiceId] {
        &[ServiceId::OpenWeather, ServiceId::OpenCage]
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ServiceId::OpenWeather => "https://api.openweathermap.org",
            ServiceId::OpenCage => "https://api.opencagedata.com",
        }
    }

    /// Environment variable that overrides the stored API key.
    pub fn env_var(&self) -> String {
        format!("SUNDAY_{}_API_KEY", self.as_str().to_uppercase())
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ServiceId::OpenWeather),
            "opencage" => Ok(ServiceId::OpenCage),
            _ => Err(anyhow::anyhow!(
                "Unknown service '{value}'. Supported services: openweather, opencage."
            )),
        }
    }
}

/// What to fetch a forecast for.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastQuery {
    City(String),
    Coordinates(Coordinates),
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Fetch the raw 5-day forecast. Provider-reported failures come back
    /// inside the payload; only transport and parse failures are errors here.
    async fn fetch_forecast(&self, query: &ForecastQuery) -> Result<ForecastPayload, WeatherError>;
}

/// Construct the forecast provider from config.
pub fn forecast_provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn ForecastProvider>> {
    let id = ServiceId::OpenWeather;
    let api_key = config.service_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for service '{id}'.\n\
                 Hint: run `sunday configure {id}` or set {}.",
            id.env_var()
        )
    })?;

    Ok(Arc::new(OpenWeatherClient::new(
        api_key.to_owned(),
        config.language.clone(),
        config.service_base_url(id).to_owned(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn service_id_as_str_roundtrip() {
        for id in ServiceId::all() {
            let s = id.as_str();
            let parsed = ServiceId::try_from(s).expect("roundtrip should succeed");
            assert_eq!(*id, parsed);
        }
    }

    #[test]
    fn service_id_parse_ignores_case() {
        assert_eq!(ServiceId::try_from("OpenCage").unwrap(), ServiceId::OpenCage);
    }

    #[test]
    fn unknown_service_error() {
        let err = ServiceId::try_from("doesnotexist").unwrap_err();
        assert!(err.to_string().contains("Unknown service"));
    }

    #[test]
    fn env_var_names() {
        assert_eq!(ServiceId::OpenWeather.env_var(), "SUNDAY_OPENWEATHER_API_KEY");
        assert_eq!(ServiceId::OpenCage.env_var(), "SUNDAY_OPENCAGE_API_KEY");
    }

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = forecast_provider_from_config(&cfg).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("No API key configured for service 'openweather'"));
        assert!(msg.contains("Hint: run `sunday configure openweather`"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.upsert_service_api_key(ServiceId::OpenWeather, "KEY".to_string());

        assert!(forecast_provider_from_config(&cfg).is_ok());
    }
}
