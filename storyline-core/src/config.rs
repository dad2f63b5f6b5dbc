//! Storyline configuration.
//!
//! Global settings live at `~/.config/storyline/config.toml`. Every key is
//! optional; missing keys fall back to the reference layout constants.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::error::{StorylineError, StorylineResult};

static DEFAULT_PROJECTS_PATH: &str = "~/storyline";

fn default_projects_dir() -> PathBuf {
    PathBuf::from(DEFAULT_PROJECTS_PATH)
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorylineConfig {
    /// Folder holding one sub-folder per project
    #[serde(default = "default_projects_dir")]
    pub projects_dir: PathBuf,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub viewport: ViewportConfig,
}

impl Default for StorylineConfig {
    fn default() -> Self {
        StorylineConfig {
            projects_dir: default_projects_dir(),
            layout: LayoutConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

/// Scene geometry and placement policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas_width: f64,
    pub left_pad: f64,
    pub right_pad: f64,
    pub top_pad: f64,
    /// Height of the band the axis sits in
    pub band_height: f64,
    /// Extra room under the band for tick labels
    pub bottom_margin: f64,
    pub marker_radius: f64,
    pub label_offset_x: f64,
    pub label_offset_y: f64,
    pub tick_half_height: f64,
    pub tick_label_offset_x: f64,
    pub tick_label_offset_y: f64,
    /// Vertical distance between swimlanes
    pub lane_height: f64,
    pub mode: LayoutMode,
    pub color_by: ColorMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            canvas_width: 1000.0,
            left_pad: 60.0,
            right_pad: 40.0,
            top_pad: 40.0,
            band_height: 240.0,
            bottom_margin: 80.0,
            marker_radius: 6.0,
            label_offset_x: 8.0,
            label_offset_y: -24.0,
            tick_half_height: 6.0,
            tick_label_offset_x: -20.0,
            tick_label_offset_y: 8.0,
            lane_height: 40.0,
            mode: LayoutMode::Simple,
            color_by: ColorMode::ByPlace,
        }
    }
}

impl LayoutConfig {
    /// Horizontal room between the paddings.
    pub fn plot_width(&self) -> f64 {
        self.canvas_width - self.left_pad - self.right_pad
    }

    /// Y of the shared axis line.
    pub fn axis_y(&self) -> f64 {
        self.top_pad + self.band_height / 2.0
    }
}

/// Interactive view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Multiplicative zoom per wheel notch
    pub zoom_step: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        ViewportConfig {
            zoom_step: 1.2,
            width: 1000.0,
            height: 400.0,
        }
    }
}

/// How events are arranged vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Every event on the shared axis line
    #[default]
    Simple,
    /// One horizontal lane per character
    Swimlane,
}

impl FromStr for LayoutMode {
    type Err = StorylineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(LayoutMode::Simple),
            "swimlane" | "lanes" => Ok(LayoutMode::Swimlane),
            other => Err(StorylineError::InvalidArgument(format!(
                "Unknown layout '{other}'. Expected simple or swimlane"
            ))),
        }
    }
}

/// Which category colors a marker in the simple layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    #[default]
    #[serde(rename = "place")]
    ByPlace,
    #[serde(rename = "character")]
    ByCharacter,
}

impl FromStr for ColorMode {
    type Err = StorylineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "place" => Ok(ColorMode::ByPlace),
            "character" => Ok(ColorMode::ByCharacter),
            other => Err(StorylineError::InvalidArgument(format!(
                "Unknown color mode '{other}'. Expected place or character"
            ))),
        }
    }
}

impl StorylineConfig {
    pub fn config_path() -> StorylineResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StorylineError::Config("Could not determine config directory".into()))?
            .join("storyline");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented template first
    /// if none exists.
    pub fn load() -> StorylineResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> StorylineResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| StorylineError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| StorylineError::Config(e.to_string()))
    }

    /// Projects folder with `~` expanded.
    pub fn projects_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.projects_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> StorylineResult<String> {
        toml::to_string_pretty(self).map_err(|e| StorylineError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> StorylineResult<()> {
        let contents = format!(
            "\
# storyline configuration

# Where your projects live (one folder per project, each with a project.json):
# projects_dir = \"{}\"

# [layout]
# canvas_width = 1000.0
# mode = \"simple\"      # or \"swimlane\"
# color_by = \"place\"   # or \"character\"

# [viewport]
# zoom_step = 1.2
",
            DEFAULT_PROJECTS_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorylineError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| StorylineError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorylineConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.layout, LayoutConfig::default());
        assert_eq!(config.viewport.zoom_step, 1.2);
        assert_eq!(config.projects_dir, PathBuf::from("~/storyline"));
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        StorylineConfig::create_default_config(&path).unwrap();
        let config = StorylineConfig::load_from(&path).unwrap();
        assert_eq!(config.layout.mode, LayoutMode::Simple);
    }

    #[test]
    fn test_partial_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "projects_dir = \"/tmp/stories\"\n[layout]\ncanvas_width = 2000.0\nmode = \"swimlane\"\ncolor_by = \"character\"\n",
        )
        .unwrap();

        let config = StorylineConfig::load_from(&path).unwrap();
        assert_eq!(config.projects_path(), PathBuf::from("/tmp/stories"));
        assert_eq!(config.layout.canvas_width, 2000.0);
        assert_eq!(config.layout.left_pad, 60.0);
        assert_eq!(config.layout.mode, LayoutMode::Swimlane);
        assert_eq!(config.layout.color_by, ColorMode::ByCharacter);
    }

    #[test]
    fn test_default_geometry() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.plot_width(), 900.0);
        assert_eq!(layout.axis_y(), 160.0);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Swimlane".parse::<LayoutMode>().unwrap(), LayoutMode::Swimlane);
        assert_eq!("character".parse::<ColorMode>().unwrap(), ColorMode::ByCharacter);
        assert!("diagonal".parse::<LayoutMode>().is_err());
    }
}
