//! Timeline view: pulls events, filters, lays out and fits a scene.
//!
//! A render pass runs the whole pipeline synchronously and replaces the
//! previous scene. Passes do not nest: a render requested while one is in
//! progress (from a source callback or the filter-reset observer) is skipped.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use kurbo::{Line, Point, Rect, Vec2};

use crate::axis::AxisLayout;
use crate::color::Color;
use crate::config::{LayoutConfig, LayoutMode, ViewportConfig};
use crate::date::DateRange;
use crate::event::Event;
use crate::filter::EventFilter;
use crate::layout::{strategy_for, LayoutStrategy, PlacementContext};
use crate::scene::{Label, RenderState, Scene, TimelineScene};
use crate::viewport::{ViewTransform, Viewport, ZoomDirection};

/// Supplies the current events, re-queried on every render.
pub trait EventSource {
    fn events(&self) -> Vec<Event>;
}

/// Supplies the known character and place names, re-queried on every render.
pub trait CategorySource {
    fn characters(&self) -> Vec<String>;
    fn places(&self) -> Vec<String>;
}

impl<T: EventSource + ?Sized> EventSource for Rc<T> {
    fn events(&self) -> Vec<Event> {
        (**self).events()
    }
}

impl<T: CategorySource + ?Sized> CategorySource for Rc<T> {
    fn characters(&self) -> Vec<String> {
        (**self).characters()
    }

    fn places(&self) -> Vec<String> {
        (**self).places()
    }
}

impl EventSource for Vec<Event> {
    fn events(&self) -> Vec<Event> {
        self.clone()
    }
}

/// Fixed category lists.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub characters: Vec<String>,
    pub places: Vec<String>,
}

impl CategorySource for Catalog {
    fn characters(&self) -> Vec<String> {
        self.characters.clone()
    }

    fn places(&self) -> Vec<String> {
        self.places.clone()
    }
}

/// What a call to [`TimelineView::render`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(RenderState),
    /// Another render was already running
    Skipped,
}

/// Called with the new filter when a stale selection was reset to "all".
pub type FilterObserver = Box<dyn Fn(&EventFilter)>;

/// Holds the rendering flag for the duration of a pass.
struct RenderGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> RenderGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(RenderGuard { flag })
    }
}

impl Drop for RenderGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

pub struct TimelineView {
    events: Box<dyn EventSource>,
    categories: Box<dyn CategorySource>,
    config: LayoutConfig,
    strategy: Box<dyn LayoutStrategy>,
    filter: RefCell<EventFilter>,
    scene: RefCell<Scene>,
    viewport: RefCell<Viewport>,
    is_rendering: Cell<bool>,
    filter_observer: RefCell<Option<FilterObserver>>,
}

impl TimelineView {
    /// Create a view. Call [`render`](Self::render) to produce the first scene.
    pub fn new(
        events: Box<dyn EventSource>,
        categories: Box<dyn CategorySource>,
        config: LayoutConfig,
        viewport: &ViewportConfig,
    ) -> Self {
        TimelineView {
            events,
            categories,
            strategy: strategy_for(&config),
            config,
            filter: RefCell::new(EventFilter::default()),
            scene: RefCell::new(Scene::default()),
            viewport: RefCell::new(Viewport::new(viewport)),
            is_rendering: Cell::new(false),
            filter_observer: RefCell::new(None),
        }
    }

    pub fn is_rendering(&self) -> bool {
        self.is_rendering.get()
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn filter(&self) -> EventFilter {
        self.filter.borrow().clone()
    }

    /// Replace the filter and re-render.
    pub fn set_filter(&self, filter: EventFilter) -> RenderOutcome {
        *self.filter.borrow_mut() = filter;
        self.render()
    }

    /// Switch layout mode (and with it the placement strategy) and re-render.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) -> RenderOutcome {
        self.config.mode = mode;
        self.strategy = strategy_for(&self.config);
        self.render()
    }

    pub fn set_filter_observer(&self, observer: FilterObserver) {
        *self.filter_observer.borrow_mut() = Some(observer);
    }

    /// The observer is taken out of its cell while it runs so it may replace
    /// itself; a replacement installed during the call wins.
    fn notify_filter_reset(&self) {
        let filter = self.filter();
        let Some(observer) = self.filter_observer.borrow_mut().take() else {
            return;
        };
        observer(&filter);
        let mut slot = self.filter_observer.borrow_mut();
        if slot.is_none() {
            *slot = Some(observer);
        }
    }

    pub fn scene(&self) -> Ref<'_, Scene> {
        self.scene.borrow()
    }

    pub fn transform(&self) -> ViewTransform {
        self.viewport.borrow().transform()
    }

    pub fn zoom_at(&self, anchor: Point, direction: ZoomDirection) {
        self.viewport.borrow_mut().zoom_at(anchor, direction);
    }

    pub fn pan_by(&self, delta: Vec2) {
        self.viewport.borrow_mut().pan_by(delta);
    }

    /// Drop zoom/pan and show the whole scene.
    pub fn fit_to_content(&self) {
        let bounds = self.scene.borrow().bounds();
        self.viewport.borrow_mut().fit(bounds);
    }

    /// Tooltip of the marker under a view-space point.
    pub fn tooltip_at_view(&self, point: Point) -> Option<String> {
        let world = self.transform().view_to_world(point);
        self.scene.borrow().tooltip_at(world).map(str::to_string)
    }

    /// Run a full render pass.
    pub fn render(&self) -> RenderOutcome {
        let Some(_guard) = RenderGuard::acquire(&self.is_rendering) else {
            tracing::debug!("render requested while rendering, skipping");
            return RenderOutcome::Skipped;
        };

        let characters = self.categories.characters();
        let places = self.categories.places();

        let reset = self.filter.borrow_mut().reconcile(&characters, &places);
        if reset {
            self.notify_filter_reset();
        }

        let events = self.events.events();
        let filter = self.filter();
        let scene = build_scene(&events, &filter, &characters, &self.config, self.strategy.as_ref());
        let state = scene.state();

        tracing::debug!(
            ?state,
            events = events.len(),
            markers = scene.markers().len(),
            strategy = self.strategy.name(),
            "rendered timeline"
        );

        *self.scene.borrow_mut() = scene;
        self.fit_to_content();

        RenderOutcome::Rendered(state)
    }
}

/// Filter, lay out and assemble a scene. Never fails: empty inputs produce
/// a placeholder scene.
pub fn build_scene(
    events: &[Event],
    filter: &EventFilter,
    characters: &[String],
    config: &LayoutConfig,
    strategy: &dyn LayoutStrategy,
) -> Scene {
    if events.is_empty() {
        return Scene::placeholder(RenderState::NoEvents, config.canvas_width);
    }

    let visible: Vec<(usize, &Event)> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| filter.matches(e))
        .collect();
    if visible.is_empty() {
        return Scene::placeholder(RenderState::NoMatches, config.canvas_width);
    }

    let Some(range) = DateRange::from_dates(visible.iter().filter_map(|(_, e)| e.parsed_date())) else {
        return Scene::placeholder(RenderState::NoDates, config.canvas_width);
    };

    let axis = AxisLayout::new(range, config);
    let placement = strategy.place(&PlacementContext {
        axis: &axis,
        events: &visible,
        characters,
        config,
    });

    let axis_y = placement.axis_y;
    let (x0, x1) = axis.x_extent();
    let ticks = axis.month_ticks();
    let tick_lines = ticks
        .iter()
        .map(|t| {
            Line::new(
                (t.x, axis_y - config.tick_half_height),
                (t.x, axis_y + config.tick_half_height),
            )
        })
        .collect();
    let tick_labels = ticks
        .iter()
        .map(|t| Label {
            text: t.label.clone(),
            position: Point::new(t.x + config.tick_label_offset_x, axis_y + config.tick_label_offset_y),
            color: Color::TICK_LABEL,
            tooltip: None,
        })
        .collect();

    let unplaced = visible.iter().filter(|(_, e)| e.parsed_date().is_none()).count();

    Scene::Timeline(TimelineScene {
        range,
        axis: Line::new((x0, axis_y), (x1, axis_y)),
        axis_color: Color::AXIS,
        ticks,
        tick_lines,
        tick_labels,
        lanes: placement.lanes,
        markers: placement.markers,
        labels: placement.labels,
        bounds: Rect::new(0.0, 0.0, config.canvas_width, placement.height),
        unplaced,
    })
}
