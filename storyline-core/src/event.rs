//! Story entities: events, characters and places.
//!
//! Only the fields the timeline reads are interpreted; everything else is
//! carried along with defaults so older project files still load.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::parse_date;

const DEFAULT_CHARACTER_COLOR: &str = "#cccccc";

fn default_character_color() -> String {
    DEFAULT_CHARACTER_COLOR.to_string()
}

/// A story event (point in time, optionally dated).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawEvent")]
pub struct Event {
    pub title: String,
    pub description: String,
    /// ISO `YYYY-MM-DD`, or empty when the event is undated
    pub date: String,
    /// Only shown in the table view; the graph has no durations
    pub end_date: String,
    pub characters: Vec<String>,
    /// Empty when the event has no place
    pub place: String,
}

/// On-disk shape of an event, including legacy keys.
#[derive(Deserialize)]
struct RawEvent {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    date: Option<String>,
    /// Legacy name of `date`
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: String,
    #[serde(default)]
    characters: Vec<String>,
    #[serde(default)]
    place: Option<String>,
    /// Legacy multi-place list; the first entry becomes `place`
    #[serde(default)]
    places: Vec<String>,
}

impl From<RawEvent> for Event {
    fn from(raw: RawEvent) -> Self {
        let date = raw.date.or(raw.start_date).unwrap_or_default();
        let place = raw
            .place
            .filter(|p| !p.is_empty())
            .or_else(|| raw.places.into_iter().next())
            .unwrap_or_default();

        Event {
            title: raw.title,
            description: raw.description,
            date,
            end_date: raw.end_date,
            characters: raw.characters,
            place,
        }
    }
}

impl Event {
    pub fn new(title: impl Into<String>) -> Self {
        Event {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = place.into();
        self
    }

    pub fn with_characters<I, S>(mut self, characters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.characters = characters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The parsed date, or `None` if the event cannot be positioned.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Multi-line inspection text shown when hovering a marker.
    pub fn tooltip(&self) -> String {
        let characters = self.characters.join(", ");
        [
            format!("Title: {}", self.title),
            format!("Date: {}", or_none(&self.date)),
            format!("Place: {}", or_none(&self.place)),
            format!("Characters: {}", or_none(&characters)),
            format!("Description: {}", self.description),
        ]
        .join("\n")
    }
}

fn or_none(s: &str) -> &str {
    if s.is_empty() { "(none)" } else { s }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// A character in the story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Editor-chosen color; the timeline derives its own from the name
    #[serde(default = "default_character_color")]
    pub color: String,
    #[serde(default)]
    pub texts: Vec<String>,
    /// Paths relative to the project's pictures folder
    #[serde(default)]
    pub images: Vec<String>,
}

impl Character {
    pub fn named(name: impl Into<String>) -> Self {
        Character {
            name: name.into(),
            description: String::new(),
            color: default_character_color(),
            texts: Vec::new(),
            images: Vec::new(),
        }
    }
}

/// A place in the story.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub texts: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Place {
    pub fn named(name: impl Into<String>) -> Self {
        Place {
            name: name.into(),
            description: String::new(),
            texts: Vec::new(),
            images: Vec::new(),
        }
    }
}
