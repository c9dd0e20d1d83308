//! Top-level controller: owns the view, dispatches user actions and applies
//! completions coming back from background tasks.
//!
//! Network work runs on spawned tasks that report through an unbounded
//! channel. The owner of the receiver feeds each [`AppEvent`] back into
//! [`App::handle_event`], so all state changes happen in one place.
//! Every forecast and suggestion request carries a sequence number;
//! completions for anything but the latest request are dropped.

use std::sync::Arc;

use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    Config,
    clock::{self, LocalClock},
    error::{GeolocationError, WeatherError},
    forecast,
    geocode::{self, GeocodeResult, Geocoder, SUGGESTION_LIMIT},
    location::{ConfiguredLocator, Geolocator},
    model::{Coordinates, ForecastPayload},
    provider::{self, ForecastProvider, ForecastQuery},
    suggest,
    theme::{FileThemeStore, ThemeStore},
    view::ViewState,
};

/// Things the user can do.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The city input changed.
    Input(String),
    /// Submit whatever is in the city input.
    Submit,
    SubmitCity(String),
    UseLocation,
    ClickSuggestion(usize),
    ClickCard(usize),
    ToggleTheme,
    ToggleMenu,
    CloseMenu,
    CityLabelVisible(bool),
}

/// Completions delivered back to the controller.
#[derive(Debug)]
pub enum AppEvent {
    ForecastLoaded {
        seq: u64,
        result: Result<ForecastPayload, WeatherError>,
    },
    SuggestionsLoaded {
        seq: u64,
        result: Result<Vec<GeocodeResult>, WeatherError>,
    },
    LocationResolved {
        seq: u64,
        result: Result<Coordinates, GeolocationError>,
    },
    /// Clock text from the ticker started for forecast `generation`.
    ClockTick { generation: u64, text: String },
}

/// External collaborators the controller talks to.
#[derive(Debug, Clone)]
pub struct Services {
    pub forecast: Arc<dyn ForecastProvider>,
    /// Suggestions are disabled without a geocoder.
    pub geocoder: Option<Arc<dyn Geocoder>>,
    pub locator: Arc<dyn Geolocator>,
    pub themes: Arc<dyn ThemeStore>,
}

impl Services {
    /// Wire up the real clients. The forecast key is required; the
    /// geocoder is optional.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let forecast = provider::forecast_provider_from_config(config)?;
        let geocoder = match geocode::geocoder_from_config(config) {
            Ok(g) => Some(g),
            Err(e) => {
                tracing::debug!("suggestions disabled: {e}");
                None
            }
        };

        Ok(Self {
            forecast,
            geocoder,
            locator: Arc::new(ConfiguredLocator::from_config(config)),
            themes: Arc::new(FileThemeStore::in_dir(&Config::data_dir()?)),
        })
    }
}

pub struct App {
    view: ViewState,
    services: Services,
    clock: LocalClock,
    rng: StdRng,
    events: UnboundedSender<AppEvent>,
    forecast_seq: u64,
    suggestion_seq: u64,
    clock_generation: u64,
    forecast_in_flight: bool,
    suggestions_in_flight: bool,
}

impl App {
    /// Create the controller and the receiver its completions arrive on.
    pub fn new(services: Services) -> (Self, UnboundedReceiver<AppEvent>) {
        Self::with_rng(services, StdRng::from_entropy())
    }

    pub fn with_rng(services: Services, rng: StdRng) -> (Self, UnboundedReceiver<AppEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let view = ViewState::new(services.themes.load());

        let app = Self {
            view,
            services,
            clock: LocalClock::new(),
            rng,
            events,
            forecast_seq: 0,
            suggestion_seq: 0,
            clock_generation: 0,
            forecast_in_flight: false,
            suggestions_in_flight: false,
        };
        (app, rx)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn clock(&self) -> &LocalClock {
        &self.clock
    }

    /// A forecast (or the location lookup preceding it) is outstanding.
    pub fn is_loading(&self) -> bool {
        self.forecast_in_flight
    }

    pub fn suggestions_pending(&self) -> bool {
        self.suggestions_in_flight
    }

    pub fn dispatch(&mut self, action: Action) {
        tracing::trace!(?action, "dispatch");
        match action {
            Action::Input(text) => self.on_input(text),
            Action::Submit => {
                let city = self.view.input.clone();
                self.submit_city(&city);
            }
            Action::SubmitCity(city) => self.submit_city(&city),
            Action::UseLocation => self.use_location(),
            Action::ClickSuggestion(index) => self.click_suggestion(index),
            Action::ClickCard(index) => {
                if !self.view.select_card(index, &mut self.rng) {
                    tracing::debug!(index, "no forecast card at index");
                }
            }
            Action::ToggleTheme => self.toggle_theme(),
            Action::ToggleMenu => self.view.toggle_menu(),
            Action::CloseMenu => self.view.close_menu(),
            Action::CityLabelVisible(visible) => self.view.set_city_label_visible(visible),
        }
    }

    /// Apply a completion. Returns `false` when it was stale and dropped.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::ForecastLoaded { seq, result } => {
                if seq != self.forecast_seq {
                    tracing::debug!(seq, latest = self.forecast_seq, "dropping stale forecast");
                    return false;
                }
                self.forecast_in_flight = false;
                self.apply_forecast(result.and_then(forecast::reduce));
            }
            AppEvent::SuggestionsLoaded { seq, result } => {
                if seq != self.suggestion_seq {
                    tracing::debug!(seq, latest = self.suggestion_seq, "dropping stale suggestions");
                    return false;
                }
                self.suggestions_in_flight = false;
                match result {
                    Ok(results) => self
                        .view
                        .suggestions
                        .show(geocode::suggestions_from_results(&results)),
                    Err(e) => tracing::warn!("City suggestion error: {e}"),
                }
            }
            AppEvent::LocationResolved { seq, result } => {
                if seq != self.forecast_seq {
                    tracing::debug!(seq, latest = self.forecast_seq, "dropping stale location");
                    return false;
                }
                match result {
                    Ok(position) => {
                        self.spawn_forecast(seq, ForecastQuery::Coordinates(position));
                    }
                    Err(e) => {
                        tracing::error!("Location error: {e}");
                        self.forecast_in_flight = false;
                        self.view.show_error(WeatherError::from(e).user_message());
                    }
                }
            }
            AppEvent::ClockTick { generation, text } => {
                if generation != self.clock_generation {
                    tracing::trace!(generation, latest = self.clock_generation, "dropping old clock tick");
                    return false;
                }
                self.view.set_clock_text(text);
            }
        }
        true
    }

    fn apply_forecast(&mut self, result: Result<forecast::Forecast, WeatherError>) {
        match result {
            Ok(forecast) => {
                let offset = forecast.city.timezone;
                self.view.show_forecast(forecast, &mut self.rng);

                // Ticks from the previous city may still be queued.
                self.clock_generation += 1;
                let generation = self.clock_generation;
                self.view.set_clock_text(clock::local_time_label(Utc::now(), offset));

                let events = self.events.clone();
                self.clock.start(offset, move |text| {
                    let _ = events.send(AppEvent::ClockTick { generation, text });
                });
            }
            Err(e) => {
                tracing::error!("Weather fetch error: {e}");
                self.view.show_error(e.user_message());
            }
        }
    }

    fn on_input(&mut self, text: String) {
        // Any earlier lookup is now outdated, whatever happens below.
        self.suggestion_seq += 1;
        self.suggestions_in_flight = false;

        let query = suggest::query_for(&text).map(str::to_owned);
        self.view.input = text;

        let Some(query) = query else {
            self.view.suggestions.clear_and_hide();
            return;
        };
        let Some(geocoder) = self.services.geocoder.clone() else {
            tracing::debug!("no geocoder configured; skipping suggestions");
            return;
        };

        let seq = self.suggestion_seq;
        let events = self.events.clone();
        self.suggestions_in_flight = true;
        tokio::spawn(async move {
            let result = geocoder.search(&query, SUGGESTION_LIMIT).await;
            let _ = events.send(AppEvent::SuggestionsLoaded { seq, result });
        });
    }

    fn submit_city(&mut self, city: &str) {
        let city = city.trim();
        if city.is_empty() {
            tracing::debug!("{}", WeatherError::EmptyQuery);
            return;
        }

        let query = ForecastQuery::City(city.to_string());
        self.view.input.clear();
        self.view.suggestions.hide();
        self.suggestion_seq += 1;
        self.suggestions_in_flight = false;

        let seq = self.next_forecast_seq();
        self.spawn_forecast(seq, query);
    }

    fn use_location(&mut self) {
        let seq = self.next_forecast_seq();
        let locator = Arc::clone(&self.services.locator);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = locator.current_position().await;
            let _ = events.send(AppEvent::LocationResolved { seq, result });
        });
    }

    fn click_suggestion(&mut self, index: usize) {
        match self.view.suggestions.city_at(index).cloned() {
            Some(suggestion) => self.submit_city(&suggestion.city),
            None => tracing::debug!(index, "no city behind suggestion row"),
        }
    }

    fn toggle_theme(&mut self) {
        let theme = self.view.theme.toggled();
        self.view.set_theme(theme);
        if let Err(e) = self.services.themes.save(theme) {
            tracing::warn!("Failed to persist theme: {e:#}");
        }
    }

    fn next_forecast_seq(&mut self) -> u64 {
        self.forecast_seq += 1;
        self.forecast_in_flight = true;
        self.forecast_seq
    }

    fn spawn_forecast(&self, seq: u64, query: ForecastQuery) {
        let provider = Arc::clone(&self.services.forecast);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = provider.fetch_forecast(&query).await;
            let _ = events.send(AppEvent::ForecastLoaded { seq, result });
        });
    }
}
