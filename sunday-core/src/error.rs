use thiserror::Error;

/// Failures from the device location source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unsupported,
    #[error("Location permission denied")]
    Denied,
    #[error("Location unavailable: {0}")]
    Unavailable(String),
}

impl GeolocationError {
    /// Text shown in place of the forecast strip.
    pub fn user_message(&self) -> &'static str {
        match self {
            GeolocationError::Unsupported => "Geolocation is not supported",
            GeolocationError::Denied | GeolocationError::Unavailable(_) => {
                "Unable to retrieve your location"
            }
        }
    }
}

/// Everything that can go wrong between a user action and a rendered forecast.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider answered with a non-success status, or with nothing usable.
    #[error("{0}")]
    Provider(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed provider response: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    /// A blank city query. Callers ignore it rather than show it.
    #[error("Empty city query")]
    EmptyQuery,
}

impl WeatherError {
    /// Message rendered inline in place of the forecast strip.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Geolocation(e) => e.user_message().to_string(),
            other => other.to_string(),
        }
    }
}
