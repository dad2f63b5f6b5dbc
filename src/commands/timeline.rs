use std::rc::Rc;

use anyhow::Result;
use kurbo::{Point, Vec2};
use serde::Serialize;
use storyline_core::config::StorylineConfig;
use storyline_core::filter::EventFilter;
use storyline_core::project::Project;
use storyline_core::scene::Scene;
use storyline_core::timeline::{RenderOutcome, TimelineView};
use storyline_core::viewport::{ViewTransform, ZoomDirection};

use crate::render::render_scene;

pub struct Options {
    pub filter: EventFilter,
    pub json: bool,
    pub zoom: i32,
    pub anchor: Option<f64>,
    pub pan: f64,
}

#[derive(Serialize)]
struct SceneOutput<'a> {
    project: &'a str,
    filter: &'a EventFilter,
    transform: ViewTransform,
    scene: &'a Scene,
}

pub fn run(project: Project, config: &StorylineConfig, options: Options) -> Result<()> {
    let project = Rc::new(project);
    let view = TimelineView::new(
        Box::new(Rc::clone(&project)),
        Box::new(Rc::clone(&project)),
        config.layout.clone(),
        &config.viewport,
    );

    if let RenderOutcome::Skipped = view.set_filter(options.filter) {
        anyhow::bail!("Timeline render was skipped");
    }

    let anchor = Point::new(
        options.anchor.unwrap_or(config.viewport.width / 2.0),
        config.viewport.height / 2.0,
    );
    let direction = if options.zoom >= 0 { ZoomDirection::In } else { ZoomDirection::Out };
    for _ in 0..options.zoom.unsigned_abs() {
        view.zoom_at(anchor, direction);
    }
    if options.pan != 0.0 {
        view.pan_by(Vec2::new(options.pan, 0.0));
    }

    tracing::debug!(zoom = options.zoom, pan = options.pan, transform = ?view.transform(), "applied view gestures");

    let scene = view.scene();
    let filter = view.filter();

    if options.json {
        let output = SceneOutput {
            project: &project.name,
            filter: &filter,
            transform: view.transform(),
            scene: &scene,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", render_scene(&project.name, &scene, &view.transform(), config.viewport.width));
    }

    Ok(())
}
