//! Forward geocoding for city suggestions, backed by OpenCage.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, sync::Arc};

use crate::{Config, error::WeatherError, provider::ServiceId};

const GEOCODE_PATH: &str = "/geocode/v1/json";

/// Maximum number of suggestions requested and shown.
pub const SUGGESTION_LIMIT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AddressComponents {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
    pub country: Option<String>,
}

impl AddressComponents {
    /// First non-empty of city, town, village.
    pub fn place_name(&self) -> Option<&str> {
        [&self.city, &self.town, &self.village]
            .into_iter()
            .filter_map(|c| c.as_deref())
            .find(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub components: AddressComponents,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

/// A city the user can pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitySuggestion {
    pub city: String,
    pub country: Option<String>,
}

impl CitySuggestion {
    /// Row text, e.g. `London, United Kingdom`.
    pub fn label(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.city, country),
            None => self.city.clone(),
        }
    }
}

/// Turn raw results into suggestion rows, skipping results without a usable place name.
pub fn suggestions_from_results(results: &[GeocodeResult]) -> Vec<CitySuggestion> {
    results
        .iter()
        .filter_map(|r| {
            let city = r.components.place_name()?;
            Some(CitySuggestion {
                city: city.to_string(),
                country: r.components.country.clone().filter(|c| !c.is_empty()),
            })
        })
        .take(SUGGESTION_LIMIT)
        .collect()
}

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeResult>, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct OpenCageGeocoder {
    api_key: String,
    language: String,
    base_url: String,
    http: Client,
}

impl OpenCageGeocoder {
    pub fn new(api_key: String, language: String, base_url: String) -> Self {
        Self {
            api_key,
            language,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Geocoder for OpenCageGeocoder {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<GeocodeResult>, WeatherError> {
        let url = format!("{}{}", self.base_url, GEOCODE_PATH);
        let limit = limit.to_string();

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("key", self.api_key.as_str()),
                ("language", self.language.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body = res.text().await?;
        let parsed: GeocodeResponse = serde_json::from_str(&body)?;

        tracing::debug!(query, results = parsed.results.len(), "geocoded");
        Ok(parsed.results)
    }
}

/// Construct the geocoder from config.
pub fn geocoder_from_config(config: &Config) -> anyhow::Result<Arc<dyn Geocoder>> {
    let id = ServiceId::OpenCage;
    let api_key = config.service_api_key(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for service '{id}'.\n\
                 Hint: run `sunday configure {id}` or set {}.",
            id.env_var()
        )
    })?;

    Ok(Arc::new(OpenCageGeocoder::new(
        api_key.to_owned(),
        config.language.clone(),
        config.service_base_url(id).to_owned(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn result(city: Option<&str>, town: Option<&str>, village: Option<&str>, country: &str) -> GeocodeResult {
        GeocodeResult {
            components: AddressComponents {
                city: city.map(Into::into),
                town: town.map(Into::into),
                village: village.map(Into::into),
                country: Some(country.into()),
            },
        }
    }

    #[test]
    fn empty_city_result_is_skipped() {
        let results = vec![
            result(Some("London"), None, None, "UK"),
            result(Some(""), None, None, "X"),
        ];
        let rows = suggestions_from_results(&results);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label(), "London, UK");
    }

    #[test]
    fn prefers_city_then_town_then_village() {
        let results = vec![
            result(None, Some("Hay-on-Wye"), Some("Ignored"), "UK"),
            result(None, None, Some("Grasmere"), "UK"),
            result(Some(""), Some("Kendal"), None, "UK"),
        ];
        let names: Vec<_> = suggestions_from_results(&results).into_iter().map(|s| s.city).collect();
        assert_eq!(names, ["Hay-on-Wye", "Grasmere", "Kendal"]);
    }

    #[test]
    fn missing_country_renders_city_only() {
        let r = GeocodeResult {
            components: AddressComponents { city: Some("Atlantis".into()), ..Default::default() },
        };
        assert_eq!(suggestions_from_results(&[r])[0].label(), "Atlantis");
    }

    #[test]
    fn no_results_gives_no_rows() {
        assert!(suggestions_from_results(&[]).is_empty());
    }

    #[tokio::test]
    async fn searches_opencage() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .and(query_param("q", "Lon"))
            .and(query_param("key", "test_key"))
            .and(query_param("language", "en"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"components": {"city": "London", "country": "United Kingdom"}},
                    {"components": {"town": "London", "country": "Canada"}},
                    {"components": {"country": "Nowhere"}}
                ]
            })))
            .mount(&mock_server)
            .await;

        let geocoder = OpenCageGeocoder::new("test_key".into(), "en".into(), mock_server.uri());
        let results = geocoder.search("Lon", SUGGESTION_LIMIT).await.unwrap();
        let rows = suggestions_from_results(&results);

        assert_eq!(results.len(), 3);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].label(), "London, Canada");
    }

    #[tokio::test]
    async fn http_failure_is_network_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let geocoder = OpenCageGeocoder::new("bad".into(), "en".into(), mock_server.uri());
        let err = geocoder.search("Lon", SUGGESTION_LIMIT).await.unwrap_err();
        assert!(matches!(err, WeatherError::Network(_)));
    }

    #[test]
    fn geocoder_from_config_requires_key() {
        let err = geocoder_from_config(&Config::default()).unwrap_err();
        assert!(err.to_string().contains("'opencage'"));
    }
}
