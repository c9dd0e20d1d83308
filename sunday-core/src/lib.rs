//! Core library for the SUNDAY weather lookup.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Clients for the forecast and geocoding services
//! - The forecast reducer, icon resolver and precipitation overlay
//! - `ViewState`, the display model, and the `App` controller that drives it
//!
//! It is used by `sunday-cli`, but any front end that can draw a `ViewState`
//! and feed `AppEvent`s back can reuse it.

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod forecast;
pub mod geocode;
pub mod icon;
pub mod location;
pub mod model;
pub mod precipitation;
pub mod provider;
pub mod suggest;
pub mod theme;
pub mod view;

pub use app::{Action, App, AppEvent, Services};
pub use config::{Config, ServiceConfig};
pub use error::{GeolocationError, WeatherError};
pub use forecast::{DailySelection, Forecast};
pub use geocode::{CitySuggestion, Geocoder};
pub use model::{CityInfo, Coordinates, ForecastEntry, ForecastPayload};
pub use provider::{ForecastProvider, ForecastQuery, ServiceId};
pub use theme::{Theme, ThemeStore};
pub use view::ViewState;
