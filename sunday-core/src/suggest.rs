use crate::geocode::CitySuggestion;

/// Queries shorter than this clear the list instead of hitting the geocoder.
pub const MIN_QUERY_CHARS: usize = 2;

pub const NO_MATCHES: &str = "No matches found";

/// The text worth geocoding, or `None` when the input is too short.
pub fn query_for(input: &str) -> Option<&str> {
    (input.chars().count() >= MIN_QUERY_CHARS).then_some(input)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionRow {
    City(CitySuggestion),
    /// Inert placeholder shown when nothing usable came back.
    NoMatches,
}

impl SuggestionRow {
    pub fn label(&self) -> String {
        match self {
            SuggestionRow::City(s) => s.label(),
            SuggestionRow::NoMatches => NO_MATCHES.to_string(),
        }
    }
}

/// Suggestion dropdown under the city input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionList {
    rows: Vec<SuggestionRow>,
    visible: bool,
}

impl SuggestionList {
    pub fn rows(&self) -> &[SuggestionRow] {
        &self.rows
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn clear_and_hide(&mut self) {
        self.rows.clear();
        self.visible = false;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Replace the rows with fresh results, or the placeholder when empty.
    pub fn show(&mut self, suggestions: Vec<CitySuggestion>) {
        self.rows = if suggestions.is_empty() {
            vec![SuggestionRow::NoMatches]
        } else {
            suggestions.into_iter().map(SuggestionRow::City).collect()
        };
        self.visible = true;
    }

    /// City behind row `index`; `None` for the placeholder or a bad index.
    pub fn city_at(&self, index: usize) -> Option<&CitySuggestion> {
        match self.rows.get(index)? {
            SuggestionRow::City(s) => Some(s),
            SuggestionRow::NoMatches => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn london() -> CitySuggestion {
        CitySuggestion { city: "London".into(), country: Some("UK".into()) }
    }

    #[test]
    fn short_queries_are_not_sent() {
        assert_eq!(query_for(""), None);
        assert_eq!(query_for("L"), None);
        assert_eq!(query_for("Ö"), None);
        assert_eq!(query_for("Lo"), Some("Lo"));
        assert_eq!(query_for("Öl"), Some("Öl"));
    }

    #[test]
    fn empty_results_show_placeholder() {
        let mut list = SuggestionList::default();
        list.show(vec![]);

        assert!(list.is_visible());
        assert_eq!(list.rows(), [SuggestionRow::NoMatches]);
        assert_eq!(list.rows()[0].label(), "No matches found");
        assert_eq!(list.city_at(0), None);
    }

    #[test]
    fn rows_map_to_cities() {
        let mut list = SuggestionList::default();
        list.show(vec![london()]);

        assert_eq!(list.rows()[0].label(), "London, UK");
        assert_eq!(list.city_at(0), Some(&london()));
        assert_eq!(list.city_at(1), None);

        list.clear_and_hide();
        assert!(list.rows().is_empty());
        assert!(!list.is_visible());
    }
}
