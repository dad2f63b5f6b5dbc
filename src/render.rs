//! Terminal rendering of timeline scenes.
//!
//! The scene is projected through the current view transform onto a fixed
//! number of character columns, so zooming and panning change what is shown.

use std::sync::Arc;

use kurbo::Point;
use owo_colors::OwoColorize;
use storyline_core::color::Color;
use storyline_core::scene::{Lane, Marker, Scene, TimelineScene};
use storyline_core::viewport::ViewTransform;

/// Width of the plotted strip in terminal columns
const COLUMNS: usize = 72;
/// Width reserved for lane names in swimlane mode
const LANE_NAME_WIDTH: usize = 14;

const MARKER_GLYPH: char = '●';
const AXIS_GLYPH: char = '─';
const TICK_GLYPH: char = '┼';

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Color {
    fn render(&self) -> String {
        MARKER_GLYPH.truecolor(self.r, self.g, self.b).to_string()
    }
}

impl Render for Lane {
    fn render(&self) -> String {
        let name: String = self.name.chars().take(LANE_NAME_WIDTH - 1).collect();
        format!("{:<width$}", name, width = LANE_NAME_WIDTH)
            .truecolor(self.color.r, self.color.g, self.color.b)
            .to_string()
    }
}

/// Maps scene x coordinates to terminal columns.
struct Projection<'a> {
    transform: &'a ViewTransform,
    view_width: f64,
}

impl Projection<'_> {
    /// Fractional column of `scene_x`; may fall outside the strip.
    fn raw_column(&self, scene_x: f64) -> f64 {
        let view_x = self.transform.world_to_view(Point::new(scene_x, 0.0)).x;
        view_x / self.view_width * (COLUMNS - 1) as f64
    }

    fn column(&self, scene_x: f64) -> Option<usize> {
        let col = self.raw_column(scene_x).round();
        if col < 0.0 || col > (COLUMNS - 1) as f64 {
            return None;
        }
        Some(col as usize)
    }
}

pub fn render_scene(
    project: &str,
    scene: &Scene,
    transform: &ViewTransform,
    view_width: f64,
) -> String {
    let mut lines = vec![format!("🕰  {}", project.bold())];

    match scene {
        Scene::Placeholder { message, .. } => lines.push(format!("   {}", message.dimmed())),
        Scene::Timeline(timeline) => {
            let projection = Projection { transform, view_width };
            render_timeline(timeline, &projection, &mut lines);
        }
    }

    lines.join("\n")
}

fn render_timeline(timeline: &TimelineScene, projection: &Projection<'_>, lines: &mut Vec<String>) {
    let indent = " ".repeat(LANE_NAME_WIDTH);
    let mut hidden = 0;

    if timeline.lanes.is_empty() {
        let markers: Vec<&Marker> = timeline.markers.iter().collect();
        hidden += markers.iter().filter(|m| projection.column(m.center.x).is_none()).count();
        lines.push(format!("{}{}", indent, marker_row(&markers, projection)));
    } else {
        for (i, lane) in timeline.lanes.iter().enumerate() {
            let markers: Vec<&Marker> =
                timeline.markers.iter().filter(|m| m.lane == Some(i)).collect();
            hidden += markers.iter().filter(|m| projection.column(m.center.x).is_none()).count();
            lines.push(format!("{}{}", lane.render(), marker_row(&markers, projection)));
        }
    }

    lines.push(format!("{}{}", indent, axis_row(timeline, projection).dimmed()));
    lines.push(format!("{}{}", indent, tick_label_row(timeline, projection).dimmed()));
    lines.push(String::new());

    for (marker, label) in legend(timeline) {
        lines.push(format!("   {} {}", marker.fill.render(), label));
    }

    let mut notes = Vec::new();
    if hidden > 0 {
        notes.push(format!("{} markers outside the view", hidden));
    }
    if timeline.unplaced > 0 {
        notes.push(format!("{} events without a date not shown", timeline.unplaced));
    }
    if !notes.is_empty() {
        lines.push(String::new());
        lines.push(format!("   {}", notes.join(", ").dimmed()));
    }
}

/// One marker per labeled event, paired with its title and date.
fn legend(timeline: &TimelineScene) -> Vec<(&Marker, String)> {
    timeline
        .labels
        .iter()
        .filter_map(|label| {
            let tooltip = label.tooltip.as_ref()?;
            let marker = timeline.markers.iter().find(|m| Arc::ptr_eq(&m.tooltip, tooltip))?;
            let date = tooltip
                .lines()
                .find_map(|l| l.strip_prefix("Date: "))
                .unwrap_or_default();
            Some((marker, format!("{} {}", label.text, date.dimmed())))
        })
        .collect()
}

fn marker_row(markers: &[&Marker], projection: &Projection<'_>) -> String {
    let mut cells: Vec<Option<Color>> = vec![None; COLUMNS];
    for marker in markers {
        if let Some(col) = projection.column(marker.center.x) {
            cells[col] = Some(marker.fill);
        }
    }
    cells
        .into_iter()
        .map(|cell| match cell {
            Some(color) => color.render(),
            None => " ".to_string(),
        })
        .collect()
}

fn axis_row(timeline: &TimelineScene, projection: &Projection<'_>) -> String {
    let mut row = vec![' '; COLUMNS];
    let from = projection.raw_column(timeline.axis.p0.x).round().max(0.0);
    let to = projection.raw_column(timeline.axis.p1.x).round().min((COLUMNS - 1) as f64);
    if from <= to {
        for cell in row.iter_mut().take(to as usize + 1).skip(from as usize) {
            *cell = AXIS_GLYPH;
        }
    }
    for tick in &timeline.ticks {
        if let Some(col) = projection.column(tick.x) {
            row[col] = TICK_GLYPH;
        }
    }
    row.into_iter().collect()
}

/// Tick labels placed at their columns, skipping any that would overlap.
fn tick_label_row(timeline: &TimelineScene, projection: &Projection<'_>) -> String {
    let mut row = vec![' '; COLUMNS];
    let mut next_free = 0;
    for tick in &timeline.ticks {
        let Some(col) = projection.column(tick.x) else {
            continue;
        };
        let len = tick.label.chars().count();
        if col < next_free || col + len > COLUMNS {
            continue;
        }
        for (i, ch) in tick.label.chars().enumerate() {
            row[col + i] = ch;
        }
        next_free = col + len + 1;
    }
    row.into_iter().collect::<String>().trim_end().to_string()
}
