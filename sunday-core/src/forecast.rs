//! Reduces a raw 5-day/3-hour forecast to one sample per day.

use crate::{
    error::WeatherError,
    model::{CityInfo, ForecastEntry, ForecastPayload},
};

/// Substring of `dt_txt` that marks the sample picked for each day.
pub const MIDDAY_MARKER: &str = "12:00:00";

/// Number of days shown in the forecast strip.
pub const MAX_DAYS: usize = 5;

const FALLBACK_PROVIDER_MESSAGE: &str = "City not found";
const NO_MIDDAY_MESSAGE: &str = "No midday forecast available";

/// Midday samples, at most [`MAX_DAYS`], in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySelection(Vec<ForecastEntry>);

impl DailySelection {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ForecastEntry> {
        self.0.get(index)
    }

    pub fn first(&self) -> Option<&ForecastEntry> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ForecastEntry> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a DailySelection {
    type Item = &'a ForecastEntry;
    type IntoIter = std::slice::Iter<'a, ForecastEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A reduced forecast ready for display. `days` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub city: CityInfo,
    pub days: DailySelection,
}

/// Keep the first [`MAX_DAYS`] entries whose `dt_txt` contains [`MIDDAY_MARKER`].
pub fn select_daily<I>(entries: I) -> DailySelection
where
    I: IntoIterator<Item = ForecastEntry>,
{
    DailySelection(
        entries
            .into_iter()
            .filter(|e| e.dt_txt.contains(MIDDAY_MARKER))
            .take(MAX_DAYS)
            .collect(),
    )
}

/// Check the status, pick the daily samples and pair them with the city.
pub fn reduce(payload: ForecastPayload) -> Result<Forecast, WeatherError> {
    if !payload.cod.is_success() {
        let message = payload
            .error_message()
            .unwrap_or(FALLBACK_PROVIDER_MESSAGE)
            .to_string();
        return Err(WeatherError::Provider(message));
    }

    let city = payload.city.ok_or_else(|| {
        WeatherError::MalformedPayload(serde::de::Error::missing_field("city"))
    })?;

    let days = select_daily(payload.list);
    if days.is_empty() {
        return Err(WeatherError::Provider(NO_MIDDAY_MESSAGE.to_string()));
    }

    tracing::debug!(city = %city.name, days = days.len(), "reduced forecast");
    Ok(Forecast { city, days })
}
