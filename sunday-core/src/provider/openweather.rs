use async_trait::async_trait;
use reqwest::Client;

use crate::{
    error::WeatherError,
    model::ForecastPayload,
    provider::{ForecastProvider, ForecastQuery},
};

const FORECAST_PATH: &str = "/data/2.5/forecast";
const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    language: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String, language: String, base_url: String) -> Self {
        Self {
            api_key,
            language,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn query_params(&self, query: &ForecastQuery) -> Vec<(&'static str, String)> {
        let mut params = match query {
            ForecastQuery::City(city) => vec![("q", city.clone())],
            ForecastQuery::Coordinates(c) => {
                vec![("lat", c.latitude.to_string()), ("lon", c.longitude.to_string())]
            }
        };
        params.extend([
            ("appid", self.api_key.clone()),
            ("units", UNITS.to_string()),
            ("lang", self.language.clone()),
        ]);
        params
    }
}

#[async_trait]
impl ForecastProvider for OpenWeatherClient {
    async fn fetch_forecast(&self, query: &ForecastQuery) -> Result<ForecastPayload, WeatherError> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);
        tracing::debug!(?query, "requesting forecast");

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        // Errors such as "city not found" are reported in-body with a
        // matching `cod`, so the body is parsed regardless of status.
        let payload: ForecastPayload = serde_json::from_str(&body).inspect_err(|e| {
            tracing::debug!(%status, body = %truncate_body(&body), "unparseable forecast: {e}");
        })?;

        Ok(payload)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
