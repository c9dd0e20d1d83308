//! Display state and the operations that keep it in sync with the forecast.
//!
//! `ViewState` is a plain value describing every display region. Renderers
//! draw it; nothing here touches a terminal or a document.

use chrono::DateTime;
use rand::Rng;

use crate::{
    clock,
    forecast::{DailySelection, Forecast},
    icon,
    model::{CityInfo, ForecastEntry},
    precipitation::Precipitation,
    suggest::SuggestionList,
    theme::{DARK_CLASS, Theme},
};

pub const APP_NAME: &str = "SUNDAY";
pub const MENU_OPEN_CLASS: &str = "menu-open";

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_half_up(value: f64) -> i64 {
    // `value - floor` is exact; `value + 0.5` is not.
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// One decimal place, with exact ties rounded away from zero (`0.25` is
/// `0.3`). Only multiples of `0.25` can be exact ties in binary.
pub fn one_decimal(value: f64) -> String {
    let scaled = value * 10.0;
    if (value * 4.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        let away = (scaled + 0.5 * scaled.signum()).trunc();
        return format!("{:.1}", away / 10.0);
    }
    format!("{value:.1}")
}

/// Three-letter weekday of an epoch timestamp, in UTC.
pub fn weekday_abbrev(epoch_secs: i64) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|ts| ts.format("%a").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub day_name: String,
    pub temperature_c: i64,
    pub condition: String,
    pub icon_svg: &'static str,
}

impl ForecastCard {
    fn from_entry(entry: &ForecastEntry) -> Self {
        let condition = entry.condition();
        Self {
            day_name: weekday_abbrev(entry.dt),
            temperature_c: round_half_up(entry.main.temp),
            icon_svg: icon::resolve(&condition.icon),
            condition: condition.main,
        }
    }
}

/// Contents of the forecast region.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ForecastStrip {
    #[default]
    Empty,
    /// One card per day; exactly one is selected.
    Cards {
        cards: Vec<ForecastCard>,
        selected: usize,
    },
    /// A single inline error message in place of the cards.
    Error(String),
}

impl ForecastStrip {
    pub fn cards(&self) -> &[ForecastCard] {
        match self {
            ForecastStrip::Cards { cards, .. } => cards,
            _ => &[],
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match self {
            ForecastStrip::Cards { selected, .. } => Some(*selected),
            _ => None,
        }
    }

    pub fn selected_count(&self) -> usize {
        self.cards()
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) == self.selected())
            .count()
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ForecastStrip::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailPanel {
    /// One decimal place, m/s.
    pub wind_speed: String,
    pub humidity_pct: u8,
    pub sunrise: String,
    pub sunset: String,
    pub feels_like_c: i64,
    pub pressure_hpa: u32,
}

impl DetailPanel {
    pub fn new(entry: &ForecastEntry, city: &CityInfo) -> Self {
        Self {
            wind_speed: one_decimal(entry.wind.speed),
            humidity_pct: entry.main.humidity,
            sunrise: clock::format_epoch_local(city.sunrise, city.timezone),
            sunset: clock::format_epoch_local(city.sunset, city.timezone),
            feels_like_c: round_half_up(entry.main.feels_like),
            pressure_hpa: entry.main.pressure,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub title: String,
    pub header_city: String,
    pub country_label: String,
    pub city_label: String,
    /// City and country labels have been revealed.
    pub labels_shown: bool,
    /// Header shows the city while the main city label is off screen.
    pub header_shows_city: bool,
    pub clock_text: Option<String>,
    pub theme: Theme,
    /// Lower-cased condition of the selected day.
    pub condition_class: Option<String>,
    pub menu_open: bool,
    pub welcome_visible: bool,
    pub precipitation: Option<Precipitation>,
    pub strip: ForecastStrip,
    /// `None` while hidden.
    pub detail: Option<DetailPanel>,
    pub input: String,
    pub suggestions: SuggestionList,
    /// Data behind the current cards, kept for card clicks.
    forecast: Option<Forecast>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl ViewState {
    pub fn new(theme: Theme) -> Self {
        Self {
            title: APP_NAME.to_string(),
            header_city: String::new(),
            country_label: String::new(),
            city_label: String::new(),
            labels_shown: false,
            header_shows_city: false,
            clock_text: None,
            theme,
            condition_class: None,
            menu_open: false,
            welcome_visible: true,
            precipitation: None,
            strip: ForecastStrip::Empty,
            detail: None,
            input: String::new(),
            suggestions: SuggestionList::default(),
            forecast: None,
        }
    }

    /// Classes on the page root, theme first.
    pub fn body_classes(&self) -> Vec<String> {
        let mut classes = Vec::new();
        if self.theme == Theme::Dark {
            classes.push(DARK_CLASS.to_string());
        }
        if let Some(cond) = &self.condition_class {
            classes.push(cond.clone());
        }
        if self.menu_open {
            classes.push(MENU_OPEN_CLASS.to_string());
        }
        classes
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn selected_day(&self) -> Option<&ForecastEntry> {
        let forecast = self.forecast.as_ref()?;
        forecast.days.get(self.strip.selected()?)
    }

    /// Reset transient classes (keeping the theme), show the condition and
    /// its precipitation, and retire the welcome banner.
    pub fn apply_weather_background<R: Rng + ?Sized>(&mut self, condition: &str, rng: &mut R) {
        self.menu_open = false;

        let lower = condition.to_lowercase();
        self.precipitation = Precipitation::for_condition(&lower, rng);
        self.condition_class = Some(lower);
        self.welcome_visible = false;
    }

    /// Rebuild one card per day, selecting the first.
    pub fn render_forecast_strip(&mut self, days: &DailySelection) {
        let cards: Vec<ForecastCard> = days.iter().map(ForecastCard::from_entry).collect();
        self.strip = if cards.is_empty() {
            ForecastStrip::Empty
        } else {
            ForecastStrip::Cards { cards, selected: 0 }
        };
    }

    pub fn render_detail_panel(&mut self, entry: &ForecastEntry, city: &CityInfo) {
        self.detail = Some(DetailPanel::new(entry, city));
    }

    /// Success path of a fetch: labels, background, strip and detail for day one.
    pub fn show_forecast<R: Rng + ?Sized>(&mut self, forecast: Forecast, rng: &mut R) {
        let city = &forecast.city;
        self.title = format!("{APP_NAME} - {}", city.name);
        self.country_label = city.country.clone();
        self.city_label = city.name.clone();
        self.header_city = city.name.clone();
        self.labels_shown = true;

        if let Some(first) = forecast.days.first() {
            self.apply_weather_background(&first.condition().main, rng);
            self.render_forecast_strip(&forecast.days);
            self.render_detail_panel(first, city);
        } else {
            self.render_forecast_strip(&forecast.days);
            self.detail = None;
        }

        self.forecast = Some(forecast);
    }

    /// Move the selection to card `index`. Returns `false` (and changes
    /// nothing) when there is no such card.
    pub fn select_card<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> bool {
        let in_range = index < self.strip.cards().len();
        let Some(forecast) = self.forecast.take() else {
            return false;
        };

        let changed = match forecast.days.get(index) {
            Some(day) if in_range => {
                if let ForecastStrip::Cards { selected, .. } = &mut self.strip {
                    *selected = index;
                }
                self.render_detail_panel(day, &forecast.city);
                self.apply_weather_background(&day.condition().main, rng);
                true
            }
            _ => false,
        };

        self.forecast = Some(forecast);
        changed
    }

    /// Replace the strip with an inline error and hide the detail panel.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.strip = ForecastStrip::Error(message.into());
        self.detail = None;
        self.forecast = None;
    }

    pub fn set_clock_text(&mut self, text: String) {
        self.clock_text = Some(text);
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Scroll-driven header: show the city there once the main label leaves view.
    pub fn set_city_label_visible(&mut self, visible: bool) {
        self.header_shows_city = !visible;
    }
}
