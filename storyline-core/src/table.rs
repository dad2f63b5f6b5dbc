//! Plain, date-sorted listing of filtered events.
//!
//! Unlike the graph, the listing keeps undated events: they sort after every
//! dated one, in their original order.

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::Event;
use crate::filter::EventFilter;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    /// Index of the event in the source list
    pub event: usize,
    pub date: Option<NaiveDate>,
    /// `start`, `start – end`, or empty
    pub date_label: String,
    pub title: String,
    pub description: String,
}

fn date_label(event: &Event) -> String {
    let start = event.date.trim();
    let end = event.end_date.trim();
    if !start.is_empty() && !end.is_empty() && end != start {
        format!("{start} – {end}")
    } else {
        start.to_string()
    }
}

/// Rows for the events passing `filter`, sorted by date with undated last.
pub fn table_rows(events: &[Event], filter: &EventFilter) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| filter.matches(e))
        .map(|(i, e)| TableRow {
            event: i,
            date: e.parsed_date(),
            date_label: date_label(e),
            title: e.title.clone(),
            description: e.description.clone(),
        })
        .collect();

    // Stable: equal dates keep source order
    rows.sort_by_key(|r| (r.date.is_none(), r.date));
    rows
}
