use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kawaii_core::config::PlannerConfig;
use owo_colors::OwoColorize;

use super::resolve_data_dir;

pub fn run(data_dir: Option<&Path>, set_data_dir: Option<PathBuf>) -> Result<()> {
    if let Some(dir) = set_data_dir {
        let mut config = PlannerConfig::load().context("Could not load config")?;
        config.data_dir = dir;
        config.save().context("Could not save config")?;
        println!("{}", "Data directory updated".green());
    }

    let config_path = PlannerConfig::config_path()?;
    let data_path = resolve_data_dir(data_dir)?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!("  Data:    {}", data_path.display());

    Ok(())
}
