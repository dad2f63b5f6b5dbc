//! Date helpers for the timeline.
//!
//! Dates are plain calendar days (`NaiveDate`). An empty or malformed date is
//! not an error: it just means the event cannot be positioned.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// Parse an ISO `YYYY-MM-DD` date. Anything else yields `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if !is_iso_date_shape(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// chrono accepts single-digit months/days and signed years; the timeline
/// only accepts the strict 10-character form.
fn is_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Days from `a` to `b`, clamped to zero when `b` precedes `a`.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().max(0)
}

/// First day of the month after `date`.
pub fn next_month_start(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// First day of `date`'s month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Inclusive range of dates covered by a set of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateRange {
    /// Range covering the given dates, or `None` if there are none.
    pub fn from_dates<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().fold(None, |acc, d| match acc {
            None => Some(DateRange { min: d, max: d }),
            Some(r) => Some(DateRange {
                min: r.min.min(d),
                max: r.max.max(d),
            }),
        })
    }

    /// Whether the range collapses to a single day.
    pub fn is_single_day(&self) -> bool {
        self.min == self.max
    }

    /// Span in days, never less than 1.
    pub fn total_days(&self) -> i64 {
        days_between(self.min, self.max).max(1)
    }
}

/// Min and max of the parseable event dates, ignoring the rest.
pub fn min_max_dates(events: &[Event]) -> Option<DateRange> {
    DateRange::from_dates(events.iter().filter_map(Event::parsed_date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_date_accepts_iso() {
        assert_eq!(parse_date("2023-04-02"), Some(d("2023-04-02")));
        assert_eq!(parse_date("  2023-04-02 "), Some(d("2023-04-02")));
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        for s in ["", "   ", "2023-4-2", "02/04/2023", "2023-02-30", "20230402", "+2023-04-0", "abcd-ef-gh"] {
            assert_eq!(parse_date(s), None, "{s:?} should not parse");
        }
    }

    #[test]
    fn test_days_between_clamps() {
        assert_eq!(days_between(d("2023-01-01"), d("2023-01-31")), 30);
        assert_eq!(days_between(d("2023-01-31"), d("2023-01-01")), 0);
    }

    #[test]
    fn test_next_month_start_wraps_year() {
        assert_eq!(next_month_start(d("2023-12-15")), Some(d("2024-01-01")));
        assert_eq!(next_month_start(d("2023-01-31")), Some(d("2023-02-01")));
    }

    #[test]
    fn test_min_max_ignores_unparseable() {
        let events = vec![
            Event::new("a").with_date("2023-05-01"),
            Event::new("b").with_date("not a date"),
            Event::new("c").with_date("2021-02-03"),
            Event::new("d"),
            Event::new("e").with_date("2024-12-31"),
        ];
        let range = min_max_dates(&events).unwrap();
        assert_eq!(range.min, d("2021-02-03"));
        assert_eq!(range.max, d("2024-12-31"));
    }

    #[test]
    fn test_min_max_none_without_dates() {
        assert_eq!(min_max_dates(&[]), None);
        let undated = vec![Event::new("a"), Event::new("b").with_date("soon")];
        assert_eq!(min_max_dates(&undated), None);
    }

    #[test]
    fn test_single_day_range_has_span_of_one() {
        let range = DateRange::from_dates([d("2023-03-03"), d("2023-03-03")]).unwrap();
        assert!(range.is_single_day());
        assert_eq!(range.total_days(), 1);
    }
}
