use anyhow::Result;
use owo_colors::OwoColorize;
use storyline_core::config::StorylineConfig;
use storyline_core::project::Project;

pub fn run(config: &StorylineConfig) -> Result<()> {
    let projects_dir = config.projects_path();
    let names = Project::list(&projects_dir);

    if names.is_empty() {
        println!(
            "{}",
            format!("No projects found in {}", projects_dir.display()).dimmed()
        );
        return Ok(());
    }

    for name in names {
        println!("📖 {}", name);
    }

    Ok(())
}
