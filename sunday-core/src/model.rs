use serde::{Deserialize, Serialize};

/// Status field of a forecast payload. OpenWeather sends it as a string on
/// success and sometimes as a number on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusCode {
    Text(String),
    Number(i64),
}

impl StatusCode {
    pub const SUCCESS: &'static str = "200";

    pub fn is_success(&self) -> bool {
        match self {
            StatusCode::Text(s) => s == Self::SUCCESS,
            StatusCode::Number(n) => n.to_string() == Self::SUCCESS,
        }
    }
}

/// Raw 5-day forecast response, as received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPayload {
    pub cod: StatusCode,
    /// A string on failure, the number `0` on success.
    #[serde(default)]
    pub message: Option<serde_json::Value>,
    #[serde(default)]
    pub city: Option<CityInfo>,
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}

impl ForecastPayload {
    /// The provider's error text, if it sent one.
    pub fn error_message(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    pub name: String,
    #[serde(default)]
    pub country: String,
    /// UTC offset in seconds.
    #[serde(default)]
    pub timezone: i32,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Condition group, e.g. "Rain" or "Clouds".
    pub main: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            main: "Clouds".to_string(),
            description: String::new(),
            icon: "03d".to_string(),
        }
    }
}

/// One 3-hourly forecast sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub dt_txt: String,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    /// Primary condition; a cloudy placeholder when the provider sent none.
    pub fn condition(&self) -> Condition {
        self.weather.first().cloned().unwrap_or_default()
    }
}

/// Latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
