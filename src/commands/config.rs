use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use storyline_core::config::StorylineConfig;

pub fn run(config: &StorylineConfig, explicit_path: Option<&Path>) -> Result<()> {
    let config_path = match explicit_path {
        Some(path) => path.to_path_buf(),
        None => StorylineConfig::config_path()?,
    };

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!("  Projects:  {}", config.projects_path().display());
    println!();
    println!("{}", "Effective settings".bold());
    print!("{}", config.to_toml()?);

    Ok(())
}
