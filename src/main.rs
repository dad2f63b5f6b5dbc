mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storyline_core::config::StorylineConfig;
use storyline_core::filter::{EventFilter, Selection};
use storyline_core::project::Project;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "storyline")]
#[command(about = "Lay out the events of a story project on a timeline")]
struct Cli {
    /// Use this config file instead of ~/.config/storyline/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log render decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List projects in the projects folder
    Projects,
    /// Show the effective configuration
    Config,
    /// List a project's events sorted by date
    Events {
        project: String,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Render a project's timeline
    Timeline {
        project: String,

        #[command(flatten)]
        filter: FilterArgs,

        /// Color markers by "place" or "character" (simple layout)
        #[arg(long)]
        color_by: Option<String>,

        /// "simple" or "swimlane"
        #[arg(long)]
        layout: Option<String>,

        /// Print the scene as JSON
        #[arg(long)]
        json: bool,

        /// Wheel notches to zoom after fitting (negative zooms out)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        zoom: i32,

        /// View x the zoom is anchored at (defaults to the view center)
        #[arg(long)]
        anchor: Option<f64>,

        /// Horizontal drag applied after zooming, in view units
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pan: f64,
    },
}

#[derive(clap::Args)]
struct FilterArgs {
    /// Only events featuring this character
    #[arg(short, long)]
    character: Option<String>,

    /// Only events at this place
    #[arg(short, long)]
    place: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> EventFilter {
        EventFilter::new(
            Selection::parse(self.character.as_deref()),
            Selection::parse(self.place.as_deref()),
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => StorylineConfig::load_from(path)?,
        None => StorylineConfig::load()?,
    };

    match cli.command {
        Commands::Projects => commands::projects::run(&config),
        Commands::Config => commands::config::run(&config, cli.config.as_deref()),
        Commands::Events { project, filter } => {
            let project = open_project(&config, &project)?;
            commands::events::run(&project, filter.to_filter())
        }
        Commands::Timeline {
            project,
            filter,
            color_by,
            layout,
            json,
            zoom,
            anchor,
            pan,
        } => {
            let project = open_project(&config, &project)?;
            let mut config = config;
            if let Some(color_by) = color_by {
                config.layout.color_by = color_by.parse()?;
            }
            if let Some(layout) = layout {
                config.layout.mode = layout.parse()?;
            }
            let options = commands::timeline::Options {
                filter: filter.to_filter(),
                json,
                zoom,
                anchor,
                pan,
            };
            commands::timeline::run(project, &config, options)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "storyline_core=debug,storyline=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_project(config: &StorylineConfig, name: &str) -> Result<Project> {
    let projects_dir = config.projects_path();

    match Project::open(&projects_dir, name) {
        Ok(project) => Ok(project),
        Err(storyline_core::StorylineError::ProjectNotFound(_)) => {
            let available = Project::list(&projects_dir);
            if available.is_empty() {
                anyhow::bail!(
                    "Project '{}' not found. No projects in {}",
                    name,
                    projects_dir.display()
                );
            }
            anyhow::bail!(
                "Project '{}' not found. Available: {}",
                name,
                available.join(", ")
            );
        }
        Err(e) => Err(e.into()),
    }
}
