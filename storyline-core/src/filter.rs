//! Character and place filters.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Label used for the unconstrained choice in filter pickers.
pub const ALL_LABEL: &str = "(All)";

/// One filter's current choice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Specific(String),
}

impl Selection {
    /// Parse a picker/CLI value. Empty and "(All)" mean no constraint; any
    /// other text, including a category literally named "All", is a value.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Selection::All,
            Some(v) if v == ALL_LABEL => Selection::All,
            Some(v) => Selection::Specific(v.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Specific(v) => Some(v),
        }
    }

    /// Reset to `All` if the selected value is no longer among `known`.
    /// Returns true when the selection changed.
    fn reconcile(&mut self, known: &[String]) -> bool {
        match self {
            Selection::Specific(v) if !known.iter().any(|k| k == v) => {
                tracing::warn!(selection = %v, "selected filter value no longer exists, resetting to all");
                *self = Selection::All;
                true
            }
            _ => false,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL_LABEL),
            Selection::Specific(v) => f.write_str(v),
        }
    }
}

/// Combined character AND place filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventFilter {
    pub character: Selection,
    pub place: Selection,
}

impl EventFilter {
    pub fn new(character: Selection, place: Selection) -> Self {
        EventFilter { character, place }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.character.is_all() && self.place.is_all()
    }

    /// Whether `event` passes both filters.
    pub fn matches(&self, event: &Event) -> bool {
        if let Selection::Specific(name) = &self.character {
            if !event.characters.iter().any(|c| c == name) {
                return false;
            }
        }
        if let Selection::Specific(place) = &self.place {
            if event.place != *place {
                return false;
            }
        }
        true
    }

    /// Events passing the filter, in their original order.
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }

    /// Drop selections whose value disappeared from the category lists.
    /// Returns true when either filter was reset.
    pub fn reconcile(&mut self, characters: &[String], places: &[String]) -> bool {
        let character_reset = self.character.reconcile(characters);
        let place_reset = self.place.reconcile(places);
        character_reset || place_reset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Event> {
        vec![
            Event::new("first").with_place("Paris").with_characters(["Alice"]),
            Event::new("second").with_place("Rome").with_characters(["Bob"]),
        ]
    }

    fn titles(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.title.clone()).collect()
    }

    fn specific(v: &str) -> Selection {
        Selection::Specific(v.to_string())
    }

    #[test]
    fn test_character_filter() {
        let events = sample();
        let filter = EventFilter::new(specific("Alice"), Selection::All);
        assert_eq!(titles(&filter.apply(&events)), vec!["first"]);
    }

    #[test]
    fn test_place_filter() {
        let events = sample();
        let filter = EventFilter::new(Selection::All, specific("Rome"));
        assert_eq!(titles(&filter.apply(&events)), vec!["second"]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let events = sample();
        let filter = EventFilter::new(specific("Alice"), specific("Rome"));
        assert!(filter.apply(&events).is_empty());
    }

    #[test]
    fn test_unconstrained_keeps_everything() {
        let events = sample();
        assert_eq!(EventFilter::default().apply(&events).len(), 2);
    }

    #[test]
    fn test_place_filter_hides_placeless_events() {
        let events = vec![Event::new("nowhere")];
        let filter = EventFilter::new(Selection::All, specific("Rome"));
        assert!(filter.apply(&events).is_empty());
    }

    #[test]
    fn test_reconcile_resets_stale_place() {
        let mut filter = EventFilter::new(specific("Alice"), specific("Rome"));
        let changed = filter.reconcile(&["Alice".to_string()], &["Paris".to_string()]);
        assert!(changed);
        assert_eq!(filter.character, specific("Alice"));
        assert_eq!(filter.place, Selection::All);
    }

    #[test]
    fn test_reconcile_keeps_valid_selection() {
        let mut filter = EventFilter::new(specific("Alice"), Selection::All);
        assert!(!filter.reconcile(&["Alice".to_string()], &[]));
        assert_eq!(filter.character, specific("Alice"));
    }

    #[test]
    fn test_selection_parse() {
        assert_eq!(Selection::parse(None), Selection::All);
        assert_eq!(Selection::parse(Some("(All)")), Selection::All);
        assert_eq!(Selection::parse(Some("")), Selection::All);
        assert_eq!(Selection::parse(Some("All")), specific("All"));
        assert_eq!(Selection::parse(Some("ALL")), specific("ALL"));
        assert_eq!(Selection::parse(Some(" Paris ")), specific("Paris"));
    }
}
