//! Core types and layout engine for storyline.
//!
//! This crate turns a list of story events (with optional dates, characters
//! and a place) into a renderable timeline scene:
//! - `date`, `color` and `filter` are the small building blocks
//! - `axis` and `layout` map events onto a date-scaled horizontal axis
//! - `viewport` holds the zoom/pan transform applied to a scene
//! - `timeline` ties them together behind the `EventSource`/`CategorySource` traits

pub mod axis;
pub mod color;
pub mod config;
pub mod date;
pub mod error;
pub mod event;
pub mod filter;
pub mod layout;
pub mod project;
pub mod scene;
pub mod table;
pub mod timeline;
pub mod viewport;

pub use error::{StorylineError, StorylineResult};
pub use event::{Character, Event, Place};
