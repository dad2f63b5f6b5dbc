//! Date axis: linear date → x mapping and month ticks.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::LayoutConfig;
use crate::date::{days_between, month_start, next_month_start, DateRange};

/// Upper bound on generated month ticks (1000 years).
pub const MAX_MONTH_TICKS: usize = 12_000;

/// A month boundary on the axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    pub x: f64,
    pub date: NaiveDate,
    /// `YYYY-MM`
    pub label: String,
}

/// Linear mapping from the dates of a [`DateRange`] onto the plot width.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLayout {
    range: DateRange,
    total_days: i64,
    left_pad: f64,
    plot_width: f64,
}

impl AxisLayout {
    pub fn new(range: DateRange, config: &LayoutConfig) -> Self {
        AxisLayout {
            range,
            total_days: range.total_days(),
            left_pad: config.left_pad,
            plot_width: config.plot_width(),
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Span used as the denominator of the mapping (at least one day).
    pub fn total_days(&self) -> i64 {
        self.total_days
    }

    /// First and last x of the plot area.
    pub fn x_extent(&self) -> (f64, f64) {
        (self.left_pad, self.left_pad + self.plot_width)
    }

    /// X position of `date`. Dates before the range's min clamp to the left edge.
    pub fn x_for(&self, date: NaiveDate) -> f64 {
        self.x_for_offset(days_between(self.range.min, date))
    }

    /// X position of `date` without clamping; dates before min land left of
    /// the left pad.
    pub fn x_for_unclamped(&self, date: NaiveDate) -> f64 {
        self.x_for_offset((date - self.range.min).num_days())
    }

    fn x_for_offset(&self, days: i64) -> f64 {
        self.left_pad + self.plot_width * days as f64 / self.total_days as f64
    }

    /// One tick per month, starting at the first of `min`'s month and
    /// continuing while the month start is not after `max`. The first tick
    /// usually precedes `min` and sits left of the plot area.
    pub fn month_ticks(&self) -> Vec<Tick> {
        let mut ticks = Vec::new();
        let mut cur = month_start(self.range.min);

        while cur <= self.range.max {
            if ticks.len() >= MAX_MONTH_TICKS {
                tracing::warn!(
                    min = %self.range.min,
                    max = %self.range.max,
                    "month tick cap reached, truncating axis labels"
                );
                break;
            }
            ticks.push(Tick {
                x: self.x_for_unclamped(cur),
                date: cur,
                label: cur.format("%Y-%m").to_string(),
            });
            match next_month_start(cur) {
                Some(next) => cur = next,
                None => break,
            }
        }

        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn axis(min: &str, max: &str) -> AxisLayout {
        let range = DateRange { min: d(min), max: d(max) };
        AxisLayout::new(range, &LayoutConfig::default())
    }

    fn labels(axis: &AxisLayout) -> Vec<String> {
        axis.month_ticks().into_iter().map(|t| t.label).collect()
    }

    #[test]
    fn test_endpoints_map_to_paddings() {
        let axis = axis("2023-01-01", "2023-12-31");
        assert!((axis.x_for(d("2023-01-01")) - 60.0).abs() < 1e-9);
        assert!((axis.x_for(d("2023-12-31")) - 960.0).abs() < 1e-9);
    }

    #[test]
    fn test_x_is_monotonic() {
        let axis = axis("2022-06-10", "2023-02-20");
        let mut day = d("2022-06-10");
        let mut last = f64::MIN;
        while day <= d("2023-02-20") {
            let x = axis.x_for(day);
            assert!(x >= last);
            last = x;
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_single_date_maps_to_left_pad() {
        let axis = axis("2023-03-03", "2023-03-03");
        assert_eq!(axis.total_days(), 1);
        assert_eq!(axis.x_for(d("2023-03-03")), 60.0);
        assert_eq!(labels(&axis), vec!["2023-03"]);
    }

    #[test]
    fn test_ticks_within_year() {
        let axis = axis("2023-01-15", "2023-04-02");
        assert_eq!(labels(&axis), vec!["2023-01", "2023-02", "2023-03", "2023-04"]);
    }

    #[test]
    fn test_ticks_across_year_boundary() {
        let axis = axis("2023-11-10", "2024-02-05");
        assert_eq!(labels(&axis), vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn test_first_tick_left_of_min() {
        let axis = axis("2023-01-31", "2023-02-02");
        let ticks = axis.month_ticks();
        assert_eq!(ticks.len(), 2);
        assert_eq!(ticks[0].date, d("2023-01-01"));
        // 30 days before min over a 2-day span
        assert_eq!(ticks[0].x, 60.0 + 900.0 * -30.0 / 2.0);
        assert!(ticks[0].x < axis.x_for(d("2023-01-31")));
        assert_eq!(ticks[1].x, 510.0);
    }

    #[test]
    fn test_tick_on_min_stays_at_left_pad() {
        let axis = axis("2023-01-01", "2023-03-01");
        let ticks = axis.month_ticks();
        assert_eq!(ticks[0].x, 60.0);
        assert_eq!(ticks.last().unwrap().x, 960.0);
    }

    #[test]
    fn test_x_for_clamps_but_unclamped_does_not() {
        let axis = axis("2023-01-11", "2023-01-21");
        assert_eq!(axis.x_for(d("2023-01-01")), 60.0);
        assert_eq!(axis.x_for_unclamped(d("2023-01-01")), -840.0);
    }

    #[test]
    fn test_long_range_terminates() {
        let axis = axis("1900-01-01", "2099-12-31");
        assert_eq!(axis.month_ticks().len(), 200 * 12);
    }

    #[test]
    fn test_tick_cap() {
        let axis = axis("0001-01-01", "9999-12-31");
        assert_eq!(axis.month_ticks().len(), MAX_MONTH_TICKS);
    }
}
