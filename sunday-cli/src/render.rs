//! Turn a [`ViewState`] into terminal text or a standalone HTML page.

use std::fmt::Write;

use sunday_core::view::{ForecastStrip, ViewState};

const WELCOME: &str = "Welcome! Search for a city to see its 5-day forecast.";

/// Human-readable rendering for the terminal.
pub fn text(view: &ViewState) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", view.title);
    if view.welcome_visible {
        let _ = writeln!(out, "{WELCOME}");
    }
    if view.labels_shown {
        let _ = write!(out, "{}, {}", view.city_label, view.country_label);
        if let Some(clock) = &view.clock_text {
            let _ = write!(out, "  {clock}");
        }
        let _ = writeln!(out);
    }

    if let Some(cond) = &view.condition_class {
        let _ = write!(out, "Sky: {cond}");
        if let Some(p) = &view.precipitation {
            let _ = write!(out, " ({} {}s)", p.len(), p.kind.class_name());
        }
        let _ = writeln!(out, "  Theme: {}", view.theme.as_str());
    }

    match &view.strip {
        ForecastStrip::Empty => {}
        ForecastStrip::Error(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
        ForecastStrip::Cards { cards, selected } => {
            let _ = writeln!(out);
            for (i, card) in cards.iter().enumerate() {
                let marker = if i == *selected { '>' } else { ' ' };
                let _ = writeln!(
                    out,
                    " {marker} {:<3} {:>4}°C  {}",
                    card.day_name, card.temperature_c, card.condition
                );
            }
        }
    }

    if let Some(d) = &view.detail {
        let _ = writeln!(out);
        let _ = writeln!(out, "  Wind        {} m/s", d.wind_speed);
        let _ = writeln!(out, "  Humidity    {}%", d.humidity_pct);
        let _ = writeln!(out, "  Sunrise     {}", d.sunrise);
        let _ = writeln!(out, "  Sunset      {}", d.sunset);
        let _ = writeln!(out, "  Feels Like  {}°C", d.feels_like_c);
        let _ = writeln!(out, "  Pressure    {} hPa", d.pressure_hpa);
    }

    out
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Static snapshot of the page, using the same class names and icon markup
/// a stylesheet would target.
pub fn html(view: &ViewState) -> String {
    let mut out = String::new();
    let classes = view.body_classes().join(" ");

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html><head><meta charset=\"utf-8\"><title>{}</title></head>", escape(&view.title));
    let _ = writeln!(out, "<body class=\"{}\">", escape(&classes));

    let header_class = if view.header_shows_city { "show-city" } else { "" };
    let _ = writeln!(
        out,
        "<header class=\"{header_class}\"><span id=\"header-logo-city\">{}</span></header>",
        escape(&view.header_city)
    );

    if view.welcome_visible {
        let _ = writeln!(out, "<div class=\"welcome-message\">{WELCOME}</div>");
    }

    let shown = if view.labels_shown { " class=\"show\"" } else { "" };
    let _ = writeln!(out, "<p id=\"country-name\"{shown}>{}</p>", escape(&view.country_label));
    let _ = writeln!(out, "<h1 id=\"city-name\"{shown}>{}</h1>", escape(&view.city_label));
    if let Some(clock) = &view.clock_text {
        let _ = writeln!(out, "<p id=\"current-time\" class=\"show\">{}</p>", escape(clock));
    }

    let _ = writeln!(out, "<div id=\"forecast\">");
    match &view.strip {
        ForecastStrip::Empty => {}
        ForecastStrip::Error(message) => {
            let _ = writeln!(out, "<p class=\"error\">{}</p>", escape(message));
        }
        ForecastStrip::Cards { cards, selected } => {
            for (i, card) in cards.iter().enumerate() {
                let class = if i == *selected { "forecast-card selected" } else { "forecast-card" };
                let _ = writeln!(
                    out,
                    "<div class=\"{class}\">{}<p class=\"day-name\">{}</p><p>{}°C</p></div>",
                    card.icon_svg,
                    escape(&card.day_name),
                    card.temperature_c
                );
            }
        }
    }
    let _ = writeln!(out, "</div>");

    match &view.detail {
        Some(d) => {
            let _ = writeln!(out, "<div id=\"detailed-weather\" class=\"show\"><div class=\"details-grid\">");
            for (label, value, unit) in [
                ("Wind", d.wind_speed.clone(), "m/s"),
                ("Humidity", d.humidity_pct.to_string(), "%"),
                ("Sunrise", d.sunrise.clone(), ""),
                ("Sunset", d.sunset.clone(), ""),
                ("Feels Like", d.feels_like_c.to_string(), "°C"),
                ("Pressure", d.pressure_hpa.to_string(), "hPa"),
            ] {
                let unit = if unit.is_empty() {
                    String::new()
                } else {
                    format!("<span class=\"unit\">{unit}</span>")
                };
                let _ = writeln!(
                    out,
                    "<div class=\"detail-item\"><div class=\"label\">{label}</div><div class=\"value\">{}{unit}</div></div>",
                    escape(&value)
                );
            }
            let _ = writeln!(out, "</div></div>");
        }
        None => {
            let _ = writeln!(out, "<div id=\"detailed-weather\"></div>");
        }
    }

    if let Some(p) = &view.precipitation {
        let class = p.kind.class_name();
        for drop in &p.particles {
            let mut style = format!(
                "left:{:.2}%;animation-duration:{:.2}s;animation-delay:{:.2}s",
                drop.left_pct, drop.duration_secs, drop.delay_secs
            );
            if let Some(size) = drop.size_px {
                let _ = write!(style, ";width:{size:.2}px;height:{size:.2}px");
            }
            let _ = writeln!(out, "<div class=\"{class}\" style=\"{style}\"></div>");
        }
    }

    let _ = writeln!(out, "</body></html>");
    out
}
