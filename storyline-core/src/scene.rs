//! Renderable scene description.
//!
//! A scene is what a render pass produces: either a placeholder message for
//! one of the terminal states, or the axis, ticks, lanes and markers of a
//! populated timeline. Drawing it is up to the caller.

use std::sync::Arc;

use kurbo::{Line, Point, Rect};
use serde::Serialize;

use crate::axis::Tick;
use crate::color::Color;
use crate::date::DateRange;

/// How a render pass ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderState {
    /// The source returned no events at all
    NoEvents,
    /// Events exist but none pass the filters
    NoMatches,
    /// Some events pass the filters but none has a usable date
    NoDates,
    Populated,
}

impl RenderState {
    /// Placeholder text for terminal states.
    pub fn message(self) -> Option<&'static str> {
        match self {
            RenderState::NoEvents => Some("No events yet. Add events to see them on the timeline."),
            RenderState::NoMatches => Some("No events match the current filters."),
            RenderState::NoDates => {
                Some("Some events lack dates. Add dates to see them on the timeline.")
            }
            RenderState::Populated => None,
        }
    }
}

/// A dot for one event (in swimlane mode, one per event and character).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub center: Point,
    pub radius: f64,
    pub fill: Color,
    pub stroke: Color,
    /// Index of the event in the source's event list
    pub event: usize,
    /// Lane the marker sits in, for swimlane layouts
    pub lane: Option<usize>,
    /// Shared with every other marker and label of the same event
    pub tooltip: Arc<str>,
}

impl Marker {
    /// Whether `point` falls inside the marker's circle.
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }
}

/// Text anchored at a scene position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub text: String,
    pub position: Point,
    pub color: Color,
    pub tooltip: Option<Arc<str>>,
}

/// A horizontal band dedicated to one character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lane {
    pub name: String,
    pub y: f64,
    pub color: Color,
}

/// Populated timeline content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineScene {
    pub range: DateRange,
    pub axis: Line,
    pub axis_color: Color,
    pub ticks: Vec<Tick>,
    /// Tick marks, parallel to `ticks`
    pub tick_lines: Vec<Line>,
    pub tick_labels: Vec<Label>,
    pub lanes: Vec<Lane>,
    pub markers: Vec<Marker>,
    pub labels: Vec<Label>,
    pub bounds: Rect,
    /// Filtered events left off the axis because their date does not parse
    pub unplaced: usize,
}

/// Result of a render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scene {
    Placeholder {
        state: RenderState,
        message: String,
        bounds: Rect,
    },
    Timeline(TimelineScene),
}

impl Scene {
    pub fn placeholder(state: RenderState, width: f64) -> Self {
        Scene::Placeholder {
            state,
            message: state.message().unwrap_or_default().to_string(),
            bounds: Rect::new(0.0, 0.0, width, 40.0),
        }
    }

    pub fn state(&self) -> RenderState {
        match self {
            Scene::Placeholder { state, .. } => *state,
            Scene::Timeline(_) => RenderState::Populated,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Scene::Placeholder { bounds, .. } => *bounds,
            Scene::Timeline(t) => t.bounds,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        match self {
            Scene::Placeholder { .. } => &[],
            Scene::Timeline(t) => &t.markers,
        }
    }

    pub fn labels(&self) -> &[Label] {
        match self {
            Scene::Placeholder { .. } => &[],
            Scene::Timeline(t) => &t.labels,
        }
    }

    pub fn as_timeline(&self) -> Option<&TimelineScene> {
        match self {
            Scene::Timeline(t) => Some(t),
            Scene::Placeholder { .. } => None,
        }
    }

    /// Tooltip of the topmost marker under `point` (scene coordinates).
    pub fn tooltip_at(&self, point: Point) -> Option<&str> {
        self.markers()
            .iter()
            .rev()
            .find(|m| m.contains(point))
            .map(|m| &*m.tooltip)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Scene::placeholder(RenderState::NoEvents, 0.0)
    }
}
