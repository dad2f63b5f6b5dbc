//! Read-only access to project folders.
//!
//! Each project is a folder under the projects directory holding a
//! `project.json` with `name`, `characters`, `places` and `events`. Missing
//! fields are backfilled, and bare strings are accepted where older files
//! stored only names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer};

use crate::error::{StorylineError, StorylineResult};
use crate::event::{Character, Event, Place};
use crate::timeline::{CategorySource, EventSource};

pub const PROJECT_FILE: &str = "project.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "characters_or_names")]
    pub characters: Vec<Character>,
    #[serde(default, deserialize_with = "places_or_names")]
    pub places: Vec<Place>,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Entry<T> {
    Name(String),
    Full(T),
}

fn characters_or_names<'de, D>(deserializer: D) -> Result<Vec<Character>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Entry<Character>> = Vec::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            Entry::Name(name) => Character::named(name),
            Entry::Full(c) => c,
        })
        .collect())
}

fn places_or_names<'de, D>(deserializer: D) -> Result<Vec<Place>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Vec<Entry<Place>> = Vec::deserialize(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|entry| match entry {
            Entry::Name(name) => Place::named(name),
            Entry::Full(p) => p,
        })
        .collect())
}

impl Project {
    /// Load `<dir>/project.json`. The folder name stands in for a missing name.
    pub fn load(dir: &Path) -> StorylineResult<Self> {
        let path = dir.join(PROJECT_FILE);
        if !path.exists() {
            return Err(StorylineError::ProjectNotFound(dir.display().to_string()));
        }

        let content = std::fs::read_to_string(&path)?;
        let mut project: Project = serde_json::from_str(&content)?;

        if project.name.trim().is_empty() {
            project.name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
        }

        tracing::debug!(
            project = %project.name,
            events = project.events.len(),
            characters = project.characters.len(),
            places = project.places.len(),
            "loaded project"
        );

        Ok(project)
    }

    /// Load the project called `name` from `projects_dir`.
    pub fn open(projects_dir: &Path, name: &str) -> StorylineResult<Self> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(StorylineError::InvalidArgument(format!(
                "Invalid project name '{name}'"
            )));
        }
        Self::load(&projects_dir.join(name))
    }

    /// Folder names under `projects_dir` that contain a project file, sorted.
    pub fn list(projects_dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(projects_dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && path.join(PROJECT_FILE).exists())
            .filter_map(|path: PathBuf| path.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect();

        names.sort();
        names
    }

    pub fn character_names(&self) -> Vec<String> {
        self.characters.iter().map(|c| c.name.clone()).collect()
    }

    pub fn place_names(&self) -> Vec<String> {
        self.places.iter().map(|p| p.name.clone()).collect()
    }
}

impl EventSource for Project {
    fn events(&self) -> Vec<Event> {
        self.events.clone()
    }
}

impl CategorySource for Project {
    fn characters(&self) -> Vec<String> {
        self.character_names()
    }

    fn places(&self) -> Vec<String> {
        self.place_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_project(root: &Path, folder: &str, json: &str) {
        let dir = root.join(folder);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(PROJECT_FILE), json).unwrap();
    }

    #[test]
    fn test_load_backfills_fields() {
        let root = tempfile::tempdir().unwrap();
        write_project(
            root.path(),
            "saga",
            r##"{
                "characters": ["Alice", {"name": "Bob", "color": "#ff0000"}],
                "places": [{"name": "Paris"}],
                "events": [{"title": "Arrival", "date": "2023-01-01", "place": "Paris"}]
            }"##,
        );

        let project = Project::open(root.path(), "saga").unwrap();
        assert_eq!(project.name, "saga");
        assert_eq!(project.character_names(), vec!["Alice", "Bob"]);
        assert_eq!(project.characters[0].color, "#cccccc");
        assert_eq!(project.characters[1].color, "#ff0000");
        assert_eq!(project.place_names(), vec!["Paris"]);
        assert_eq!(project.events()[0].place, "Paris");
    }

    #[test]
    fn test_list_only_project_folders() {
        let root = tempfile::tempdir().unwrap();
        write_project(root.path(), "zeta", r#"{"name": "Zeta"}"#);
        write_project(root.path(), "alpha", r#"{}"#);
        std::fs::create_dir_all(root.path().join("notes")).unwrap();
        std::fs::write(root.path().join("loose.json"), "{}").unwrap();

        assert_eq!(Project::list(root.path()), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let root = tempfile::tempdir().unwrap();
        assert!(Project::list(&root.path().join("nope")).is_empty());
    }

    #[test]
    fn test_missing_project() {
        let root = tempfile::tempdir().unwrap();
        let err = Project::open(root.path(), "ghost").unwrap_err();
        assert!(matches!(err, StorylineError::ProjectNotFound(_)));
    }

    #[test]
    fn test_rejects_path_like_names() {
        let root = tempfile::tempdir().unwrap();
        let err = Project::open(root.path(), "../etc").unwrap_err();
        assert!(matches!(err, StorylineError::InvalidArgument(_)));
    }

    #[test]
    fn test_malformed_json() {
        let root = tempfile::tempdir().unwrap();
        write_project(root.path(), "broken", "{ not json");
        let err = Project::open(root.path(), "broken").unwrap_err();
        assert!(matches!(err, StorylineError::Serialization(_)));
    }
}
