pub mod backup;
pub mod config;
pub mod countdown;
pub mod day;
pub mod month;
pub mod period;
pub mod settings;
pub mod todo;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use kawaii_core::Planner;
use kawaii_core::config::PlannerConfig;
use kawaii_core::day::parse_day;
use kawaii_core::store::FileStore;

use crate::render::Palette;

pub type CliPlanner = Planner<FileStore>;

/// The directory records are kept in: `--data-dir` if given, the configured one otherwise.
pub fn resolve_data_dir(data_dir: Option<&Path>) -> Result<PathBuf> {
    match data_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => {
            let config = PlannerConfig::load().context("Could not load config")?;
            Ok(config.data_path())
        }
    }
}

pub fn open_planner(data_dir: Option<&Path>) -> Result<CliPlanner> {
    let dir = resolve_data_dir(data_dir)?;
    let store = FileStore::open(&dir)
        .with_context(|| format!("Could not open data directory {}", dir.display()))?;

    Ok(Planner::load(store)?)
}

pub fn palette(planner: &CliPlanner) -> Palette {
    Palette::from_settings(&planner.state().settings)
}

/// Parse a day given on the command line.
///
/// Accepts `today`, `tomorrow`, `yesterday`, and `Y-M-D` with or without
/// zero padding.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let parsed = match input.trim().to_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        other => parse_day(other),
    };

    parsed.with_context(|| format!("Could not understand the date '{}' (try YYYY-MM-DD)", input))
}

/// Map a 1-based list number onto an index.
pub fn list_index(number: usize, len: usize, what: &str) -> Result<usize> {
    if number == 0 || number > len {
        anyhow::bail!("There is no {} number {} (there are {})", what, number, len);
    }
    Ok(number - 1)
}
