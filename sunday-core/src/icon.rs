//! Inline SVG glyphs for provider icon codes.

const CLEAR_DAY: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><circle class="sun" cx="32" cy="32" r="14"/></svg>"#;
const CLEAR_NIGHT: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><path class="moon" d="M42.2,33.7C40,35.5,37.1,36.5,34,36.5c-6.1,0-11-4.9-11-11c0-2.8,1.1-5.5,2.9-7.5c-1.8-0.8-3.8-1.3-5.9-1.3c-7.7,0-14,6.3-14,14s6.3,14,14,14s14-6.3,14-14C43.5,35.4,43,34.5,42.2,33.7z"/></svg>"#;
const FEW_CLOUDS_DAY: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><circle class="sun" cx="32" cy="22" r="9"/><path class="cloud" d="M47.7,34.4c0-4.6-3.7-8.3-8.3-8.3c-1,0-2,0.2-2.9,0.5c-0.4-4.8-4.3-8.6-9.2-8.6c-5.1,0-9.2,4.1-9.2,9.2v0.1c-3.7,1-6.4,4.2-6.4,8.2c0,4.7,3.8,8.5,8.5,8.5h27C44,42.9,47.7,39.1,47.7,34.4z"/></svg>"#;
const FEW_CLOUDS_NIGHT: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><path class="moon" d="M38.2,29.7C36,31.5,33.1,32.5,30,32.5c-6.1,0-11-4.9-11-11c0-2.8,1.1-5.5,2.9-7.5c-1.8-0.8-3.8-1.3-5.9-1.3c-7.7,0-14,6.3-14,14s6.3,14,14,14h27c4.7,0,8.5-3.8,8.5-8.5c0-4-2.7-7.2-6.4-8.2C40.2,29.5,39.2,29.7,38.2,29.7z"/><path class="cloud" d="M47.7,34.4c0-4.6-3.7-8.3-8.3-8.3c-1,0-2,0.2-2.9,0.5c-0.4-4.8-4.3-8.6-9.2-8.6c-5.1,0-9.2,4.1-9.2,9.2v0.1c-3.7,1-6.4,4.2-6.4,8.2c0,4.7,3.8,8.5,8.5,8.5h27C44,42.9,47.7,39.1,47.7,34.4z"/></svg>"#;
const CLOUDY: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><path class="cloud" d="M47.7,34.4c0-4.6-3.7-8.3-8.3-8.3c-1,0-2,0.2-2.9,0.5c-0.4-4.8-4.3-8.6-9.2-8.6c-5.1,0-9.2,4.1-9.2,9.2v0.1c-3.7,1-6.4,4.2-6.4,8.2c0,4.7,3.8,8.5,8.5,8.5h27C44,42.9,47.7,39.1,47.7,34.4z"/></svg>"#;
const BROKEN_CLOUDS: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><path class="cloud" d="M47.7,34.4c0-4.6-3.7-8.3-8.3-8.3c-1,0-2,0.2-2.9,0.5c-0.4-4.8-4.3-8.6-9.2-8.6c-5.1,0-9.2,4.1-9.2,9.2v0.1c-3.7,1-6.4,4.2-6.4,8.2c0,4.7,3.8,8.5,8.5,8.5h27C44,42.9,47.7,39.1,47.7,34.4z"/><path class="cloud" d="M37.7,44.4c0-4.6-3.7-8.3-8.3-8.3c-1,0-2,0.2-2.9,0.5c-0.4-4.8-4.3-8.6-9.2-8.6c-5.1,0-9.2,4.1-9.2,9.2v0.1c-3.7,1-6.4,4.2-6.4,8.2c0,4.7,3.8,8.5,8.5,8.5h27C34,52.9,37.7,49.1,37.7,44.4z"/></svg>"#;
const SHOWERS: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><path class="cloud" d="M47.7,34.4c0-4.6-3.7-8.3-8.3-8.3c-1,0-2,0.2-2.9,0.5c-0.4-4.8-4.3-8.6-9.2-8.6c-5.1,0-9.2,4.1-9.2,9.2v0.1c-3.7,1-6.4,4.2-6.4,8.2c0,4.7,3.8,8.5,8.5,8.5h27C44,42.9,47.7,39.1,47.7,34.4z"/><line class="rain" x1="24" y1="50" x2="24" y2="60"/><line class="rain" x1="32" y1="50" x2="32" y2="60"/><line class="rain" x1="40" y1="50" x2="40" y2="60"/></svg>"#;
const RAIN: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><circle class="sun" cx="32" cy="22" r="9"/><path class="cloud" d="M47.7,34.4c0-4.6-3.7-8.3-8.3-8.3c-1,0-2,0.2-2.9,0.5c-0.4-4.8-4.3-8.6-9.2-8.6c-5.1,0-9.2,4.1-9.2,9.2v0.1c-3.7,1-6.4,4.2-6.4,8.2c0,4.7,3.8,8.5,8.5,8.5h27C44,42.9,47.7,39.1,47.7,34.4z"/><line class="rain" x1="32" y1="50" x2="32" y2="60"/></svg>"#;
const THUNDERSTORM: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><path class="cloud" d="M47.7,34.4c0-4.6-3.7-8.3-8.3-8.3c-1,0-2,0.2-2.9,0.5c-0.4-4.8-4.3-8.6-9.2-8.6c-5.1,0-9.2,4.1-9.2,9.2v0.1c-3.7,1-6.4,4.2-6.4,8.2c0,4.7,3.8,8.5,8.5,8.5h27C44,42.9,47.7,39.1,47.7,34.4z"/><polygon class="lightning" points="32,46 28,54 36,54 32,62"/></svg>"#;
const SNOW: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><path class="cloud" d="M47.7,34.4c0-4.6-3.7-8.3-8.3-8.3c-1,0-2,0.2-2.9,0.5c-0.4-4.8-4.3-8.6-9.2-8.6c-5.1,0-9.2,4.1-9.2,9.2v0.1c-3.7,1-6.4,4.2-6.4,8.2c0,4.7,3.8,8.5,8.5,8.5h27C44,42.9,47.7,39.1,47.7,34.4z"/><line class="snow" x1="24" y1="50" x2="24" y2="60"/><line class="snow" x1="22" y1="55" x2="26" y2="55"/><line class="snow" x1="32" y1="50" x2="32" y2="60"/><line class="snow" x1="30" y1="55" x2="34" y2="55"/><line class="snow" x1="40" y1="50" x2="40" y2="60"/><line class="snow" x1="38" y1="55" x2="42" y2="55"/></svg>"#;
const MIST: &str = r#"<svg class="weather-icon" viewBox="0 0 64 64"><line class="fog" x1="16" y1="42" x2="48" y2="42"/><line class="fog" x1="18" y1="48" x2="46" y2="48"/><line class="fog" x1="20" y1="54" x2="44" y2="54"/></svg>"#;

/// Icon code used when nothing else matches.
pub const FALLBACK_CODE: &str = "03d";

fn lookup(code: &str) -> Option<&'static str> {
    let svg = match code {
        "01d" => CLEAR_DAY,
        "01n" => CLEAR_NIGHT,
        "02d" => FEW_CLOUDS_DAY,
        "02n" => FEW_CLOUDS_NIGHT,
        "03d" => CLOUDY,
        "04d" => BROKEN_CLOUDS,
        "09d" => SHOWERS,
        "10d" => RAIN,
        "11d" => THUNDERSTORM,
        "13d" => SNOW,
        "50d" => MIST,
        _ => return None,
    };
    Some(svg)
}

/// Resolve an icon code to its SVG fragment.
///
/// Tries the exact code, then the day variant of the same family (only
/// `01n` and `02n` have their own night glyphs), then the cloudy glyph.
pub fn resolve(code: &str) -> &'static str {
    let family: String = code.chars().take(2).chain(std::iter::once('d')).collect();

    lookup(code)
        .or_else(|| lookup(&family))
        .unwrap_or(CLOUDY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_code_wins() {
        assert_eq!(resolve("01d"), CLEAR_DAY);
        assert_eq!(resolve("01n"), CLEAR_NIGHT);
        assert_eq!(resolve("02n"), FEW_CLOUDS_NIGHT);
    }

    #[test]
    fn night_codes_without_own_glyph_collapse_to_day() {
        assert_eq!(resolve("10n"), RAIN);
        assert_eq!(resolve("13n"), SNOW);
        assert_eq!(resolve("04n"), BROKEN_CLOUDS);
    }

    #[test]
    fn unknown_codes_fall_back_to_cloudy() {
        for code in ["", "x", "99d", "zzzz", "ñ", "01"] {
            let svg = resolve(code);
            assert!(!svg.is_empty(), "empty glyph for {code:?}");
        }
        assert_eq!(resolve("99d"), resolve(FALLBACK_CODE));
        assert_eq!(resolve(""), CLOUDY);
    }

    #[test]
    fn short_code_uses_family_lookup() {
        // "01" has no exact entry but its family "01d" does.
        assert_eq!(resolve("01"), CLEAR_DAY);
    }

    #[test]
    fn every_glyph_is_an_svg_element() {
        for code in ["01d", "01n", "02d", "02n", "03d", "04d", "09d", "10d", "11d", "13d", "50d"] {
            let svg = resolve(code);
            assert!(svg.starts_with("<svg class=\"weather-icon\""));
            assert!(svg.ends_with("</svg>"));
        }
    }
}
