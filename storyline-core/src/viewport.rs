//! Zoom and pan over a rendered scene.
//!
//! Zooming only stretches the time axis: the vertical scale set by the last
//! fit is left alone so lanes keep their height.

use kurbo::{Point, Rect, Size, Vec2};
use serde::Serialize;

use crate::config::ViewportConfig;

const MIN_SCALE: f64 = 1e-6;
const MAX_SCALE: f64 = 1e6;

/// Wheel direction for a zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Positive wheel deltas zoom in, everything else zooms out.
    pub fn from_wheel_delta(delta_y: f64) -> Self {
        if delta_y > 0.0 { ZoomDirection::In } else { ZoomDirection::Out }
    }
}

/// Scene → view mapping: `view = scene * scale + pan`, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewTransform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub pan: Vec2,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        scale_x: 1.0,
        scale_y: 1.0,
        pan: Vec2::ZERO,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn world_to_view(&self, p: Point) -> Point {
        Point::new(p.x * self.scale_x + self.pan.x, p.y * self.scale_y + self.pan.y)
    }

    pub fn view_to_world(&self, p: Point) -> Point {
        Point::new((p.x - self.pan.x) / self.scale_x, (p.y - self.pan.y) / self.scale_y)
    }

    /// Scale the time axis by `factor`, keeping the scene point under
    /// `anchor` (view coordinates) where it is.
    pub fn zoom_x_about(&mut self, anchor: Point, factor: f64) {
        if factor <= 0.0 || !factor.is_finite() {
            return;
        }
        let new_scale = (self.scale_x * factor).clamp(MIN_SCALE, MAX_SCALE);
        if (new_scale - self.scale_x).abs() < f64::EPSILON {
            return;
        }
        let world_x = (anchor.x - self.pan.x) / self.scale_x;
        self.scale_x = new_scale;
        self.pan.x = anchor.x - world_x * new_scale;
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Identity, then a uniform scale that shows all of `bounds` inside a
    /// view of `view` size, centered.
    pub fn fitted(bounds: Rect, view: Size) -> Self {
        let mut t = Self::IDENTITY;
        if bounds.width() <= 0.0 || bounds.height() <= 0.0 || view.width <= 0.0 || view.height <= 0.0 {
            return t;
        }
        let scale = (view.width / bounds.width())
            .min(view.height / bounds.height())
            .clamp(MIN_SCALE, MAX_SCALE);
        let center = bounds.center();
        t.scale_x = scale;
        t.scale_y = scale;
        t.pan = Vec2::new(view.width / 2.0 - center.x * scale, view.height / 2.0 - center.y * scale);
        t
    }
}

/// Interactive view state: the transform plus the view size and zoom step.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    transform: ViewTransform,
    view_size: Size,
    zoom_step: f64,
}

impl Viewport {
    pub fn new(config: &ViewportConfig) -> Self {
        Viewport {
            transform: ViewTransform::IDENTITY,
            view_size: Size::new(config.width, config.height),
            zoom_step: config.zoom_step,
        }
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Resize the view. Takes effect at the next fit.
    pub fn set_view_size(&mut self, size: Size) {
        self.view_size = size;
    }

    /// One wheel notch at `anchor` (view coordinates).
    pub fn zoom_at(&mut self, anchor: Point, direction: ZoomDirection) {
        let factor = match direction {
            ZoomDirection::In => self.zoom_step,
            ZoomDirection::Out => 1.0 / self.zoom_step,
        };
        self.transform.zoom_x_about(anchor, factor);
    }

    /// Drag by `delta` view units. Panning past the content is allowed.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.transform.pan_by(delta);
    }

    pub fn reset(&mut self) {
        self.transform = ViewTransform::IDENTITY;
    }

    /// Discard zoom/pan and fit `bounds` into the view.
    pub fn fit(&mut self, bounds: Rect) {
        self.transform = ViewTransform::fitted(bounds, self.view_size);
    }
}
