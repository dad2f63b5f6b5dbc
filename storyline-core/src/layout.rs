//! Event placement strategies.
//!
//! Both strategies share the date axis; they only differ in where an event
//! lands vertically, how it is colored and which markers get a title label.

use std::sync::Arc;

use kurbo::Point;

use crate::axis::AxisLayout;
use crate::color::{color_for, Color, OUTLINE_DARKNESS};
use crate::config::{ColorMode, LayoutConfig, LayoutMode};
use crate::event::Event;
use crate::scene::{Label, Lane, Marker};

/// Name of the lane collecting events without characters.
pub const UNASSIGNED_LANE: &str = "(unassigned)";

/// Input to a placement pass.
pub struct PlacementContext<'a> {
    pub axis: &'a AxisLayout,
    /// Filtered events with their index in the source list
    pub events: &'a [(usize, &'a Event)],
    /// Known characters, in catalog order
    pub characters: &'a [String],
    pub config: &'a LayoutConfig,
}

/// Output of a placement pass.
#[derive(Debug, Clone, Default)]
pub struct Placement {
    pub axis_y: f64,
    pub height: f64,
    pub lanes: Vec<Lane>,
    pub markers: Vec<Marker>,
    pub labels: Vec<Label>,
}

pub trait LayoutStrategy {
    fn name(&self) -> &'static str;

    /// Position every event of `ctx` that has a parseable date.
    fn place(&self, ctx: &PlacementContext<'_>) -> Placement;
}

/// Build the strategy selected by configuration.
pub fn strategy_for(config: &LayoutConfig) -> Box<dyn LayoutStrategy> {
    match config.mode {
        LayoutMode::Simple => Box::new(SimpleLayout::new(config.color_by)),
        LayoutMode::Swimlane => Box::new(SwimlaneLayout),
    }
}

fn marker(
    center: Point,
    fill: Color,
    event: usize,
    lane: Option<usize>,
    tooltip: &Arc<str>,
    config: &LayoutConfig,
) -> Marker {
    Marker {
        center,
        radius: config.marker_radius,
        fill,
        stroke: fill.darker(OUTLINE_DARKNESS),
        event,
        lane,
        tooltip: Arc::clone(tooltip),
    }
}

fn title_label(event: &Event, center: Point, tooltip: &Arc<str>, config: &LayoutConfig) -> Label {
    Label {
        text: event.title.clone(),
        position: Point::new(center.x + config.label_offset_x, center.y + config.label_offset_y),
        color: Color::LABEL,
        tooltip: Some(Arc::clone(tooltip)),
    }
}

/// All events on the shared axis line, colored by place or first character.
///
/// Same-day events overlap; there is no collision avoidance.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleLayout {
    pub color_by: ColorMode,
}

impl SimpleLayout {
    pub fn new(color_by: ColorMode) -> Self {
        SimpleLayout { color_by }
    }

    fn color_key<'e>(&self, event: &'e Event) -> &'e str {
        match self.color_by {
            ColorMode::ByPlace => &event.place,
            ColorMode::ByCharacter => event.characters.first().map(String::as_str).unwrap_or(""),
        }
    }
}

impl LayoutStrategy for SimpleLayout {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn place(&self, ctx: &PlacementContext<'_>) -> Placement {
        let config = ctx.config;
        let axis_y = config.axis_y();
        let mut placement = Placement {
            axis_y,
            height: config.top_pad + config.band_height + config.bottom_margin,
            ..Default::default()
        };

        for &(index, event) in ctx.events {
            let Some(date) = event.parsed_date() else {
                continue;
            };
            let center = Point::new(ctx.axis.x_for(date), axis_y);
            let tooltip: Arc<str> = event.tooltip().into();
            let fill = color_for(self.color_key(event));

            placement.markers.push(marker(center, fill, index, None, &tooltip, config));
            placement.labels.push(title_label(event, center, &tooltip, config));
        }

        placement
    }
}

/// One lane per character. An event appears in every lane of its characters
/// but is labeled only in the lane of the first character it lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwimlaneLayout;

impl SwimlaneLayout {
    /// Catalog characters first, then characters only seen on events, then
    /// the unassigned lane if any event has no characters.
    fn lane_names(ctx: &PlacementContext<'_>) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let mut push = |name: &str| {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        };

        for name in ctx.characters {
            push(name);
        }
        for (_, event) in ctx.events {
            for name in &event.characters {
                push(name);
            }
        }
        if ctx.events.iter().any(|(_, e)| e.characters.is_empty()) {
            push(UNASSIGNED_LANE);
        }

        names
    }
}

impl LayoutStrategy for SwimlaneLayout {
    fn name(&self) -> &'static str {
        "swimlane"
    }

    fn place(&self, ctx: &PlacementContext<'_>) -> Placement {
        let config = ctx.config;
        let names = Self::lane_names(ctx);
        let lane_y = |i: usize| config.top_pad + config.lane_height * (i as f64 + 0.5);

        let lanes: Vec<Lane> = names
            .iter()
            .enumerate()
            .map(|(i, name)| Lane {
                name: name.clone(),
                y: lane_y(i),
                color: if name == UNASSIGNED_LANE { Color::FALLBACK } else { color_for(name) },
            })
            .collect();

        let axis_y = lane_y(lanes.len());
        let mut placement = Placement {
            axis_y,
            height: axis_y + config.bottom_margin,
            ..Default::default()
        };

        let lane_of = |name: &str| lanes.iter().position(|l| l.name == name);

        for &(index, event) in ctx.events {
            let Some(date) = event.parsed_date() else {
                continue;
            };
            let x = ctx.axis.x_for(date);
            let tooltip: Arc<str> = event.tooltip().into();

            let mut drawn: Vec<usize> = Vec::new();
            let lane_indices: Vec<usize> = if event.characters.is_empty() {
                lane_of(UNASSIGNED_LANE).into_iter().collect()
            } else {
                event.characters.iter().filter_map(|c| lane_of(c.as_str())).collect()
            };

            for lane in lane_indices {
                if drawn.contains(&lane) {
                    continue;
                }
                let center = Point::new(x, lanes[lane].y);
                placement
                    .markers
                    .push(marker(center, lanes[lane].color, index, Some(lane), &tooltip, config));
                if drawn.is_empty() {
                    placement.labels.push(title_label(event, center, &tooltip, config));
                }
                drawn.push(lane);
            }
        }

        placement.lanes = lanes;
        placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::min_max_dates;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn run(strategy: &dyn LayoutStrategy, events: &[Event], characters: &[String]) -> Placement {
        let config = LayoutConfig::default();
        let range = min_max_dates(events).unwrap();
        let axis = AxisLayout::new(range, &config);
        let indexed: Vec<(usize, &Event)> = events.iter().enumerate().collect();
        strategy.place(&PlacementContext {
            axis: &axis,
            events: &indexed,
            characters,
            config: &config,
        })
    }

    #[test]
    fn test_simple_places_on_axis_line() {
        let events = vec![
            Event::new("a").with_date("2023-01-01").with_place("Paris"),
            Event::new("b").with_date("2023-01-11"),
            Event::new("undated").with_place("Paris"),
            Event::new("c").with_date("2023-01-21").with_place("Paris"),
        ];
        let placement = run(&SimpleLayout::new(ColorMode::ByPlace), &events, &[]);

        assert_eq!(placement.markers.len(), 3);
        assert!(placement.markers.iter().all(|m| m.center.y == 160.0));
        assert_eq!(placement.markers[0].center.x, 60.0);
        assert_eq!(placement.markers[1].center.x, 510.0);
        assert_eq!(placement.markers[2].center.x, 960.0);
        assert_eq!(placement.markers[2].event, 3);
        assert_eq!(placement.markers[0].fill, color_for("Paris"));
        assert_eq!(placement.markers[1].fill, Color::FALLBACK);
        assert_eq!(placement.labels[0].position, Point::new(68.0, 136.0));
        assert_eq!(placement.height, 360.0);
    }

    #[test]
    fn test_simple_color_by_first_character() {
        let events = vec![Event::new("a").with_date("2023-01-01").with_characters(["Bob", "Alice"])];
        let placement = run(&SimpleLayout::new(ColorMode::ByCharacter), &events, &[]);
        assert_eq!(placement.markers[0].fill, color_for("Bob"));
        assert_eq!(placement.markers[0].stroke, color_for("Bob").darker(150));
    }

    #[test]
    fn test_same_day_events_overlap() {
        let events = vec![
            Event::new("a").with_date("2023-05-05"),
            Event::new("b").with_date("2023-05-05"),
        ];
        let placement = run(&SimpleLayout::default(), &events, &[]);
        assert_eq!(placement.markers[0].center, placement.markers[1].center);
        assert_eq!(placement.labels.len(), 2);
    }

    #[test]
    fn test_tooltip_shared_per_event() {
        let events = vec![Event::new("Feast").with_date("2023-01-01").with_characters(["Alice", "Bob"])];
        let placement = run(&SwimlaneLayout, &events, &names(&["Alice", "Bob"]));
        assert_eq!(placement.markers.len(), 2);
        assert!(Arc::ptr_eq(&placement.markers[0].tooltip, &placement.markers[1].tooltip));
    }

    #[test]
    fn test_swimlane_label_on_first_listed_character() {
        let events = vec![
            Event::new("Duel").with_date("2023-01-01").with_characters(["Bob", "Alice"]),
            Event::new("Walk").with_date("2023-02-01").with_characters(["Alice"]),
        ];
        let placement = run(&SwimlaneLayout, &events, &names(&["Alice", "Bob"]));

        assert_eq!(placement.lanes.len(), 2);
        assert_eq!(placement.lanes[0].name, "Alice");
        assert_eq!(placement.lanes[1].name, "Bob");
        assert_eq!(placement.markers.len(), 3);

        let duel: Vec<_> = placement.labels.iter().filter(|l| l.text == "Duel").collect();
        assert_eq!(duel.len(), 1);
        // Bob is listed first on the event, so the label sits in Bob's lane.
        assert_eq!(duel[0].position.y, placement.lanes[1].y - 24.0);
    }

    #[test]
    fn test_swimlane_colors_by_lane() {
        let events = vec![Event::new("Duel").with_date("2023-01-01").with_characters(["Alice", "Bob"])];
        let placement = run(&SwimlaneLayout, &events, &names(&["Alice", "Bob"]));
        assert_eq!(placement.markers[0].fill, color_for("Alice"));
        assert_eq!(placement.markers[1].fill, color_for("Bob"));
        assert_eq!(placement.markers[1].lane, Some(1));
    }

    #[test]
    fn test_swimlane_extra_and_unassigned_lanes() {
        let events = vec![
            Event::new("a").with_date("2023-01-01").with_characters(["Zed"]),
            Event::new("b").with_date("2023-01-02"),
        ];
        let placement = run(&SwimlaneLayout, &events, &names(&["Alice"]));
        let lane_names: Vec<_> = placement.lanes.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(lane_names, vec!["Alice", "Zed", UNASSIGNED_LANE]);
        assert_eq!(placement.markers[1].lane, Some(2));
        assert_eq!(placement.markers[1].fill, Color::FALLBACK);
        assert_eq!(placement.axis_y, 40.0 + 40.0 * 3.5);
    }

    #[test]
    fn test_swimlane_duplicate_character_drawn_once() {
        let events = vec![Event::new("a").with_date("2023-01-01").with_characters(["Alice", "Alice"])];
        let placement = run(&SwimlaneLayout, &events, &names(&["Alice"]));
        assert_eq!(placement.markers.len(), 1);
        assert_eq!(placement.labels.len(), 1);
    }

    #[test]
    fn test_strategy_for_mode() {
        let mut config = LayoutConfig::default();
        assert_eq!(strategy_for(&config).name(), "simple");
        config.mode = LayoutMode::Swimlane;
        assert_eq!(strategy_for(&config).name(), "swimlane");
    }
}
