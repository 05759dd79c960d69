use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use kawaii_core::{Intent, Interaction};

use super::CliPlanner;

pub fn backup(planner: &CliPlanner, ui: &mut dyn Interaction, out: Option<PathBuf>) -> Result<()> {
    let dir = out.unwrap_or_else(|| PathBuf::from("."));
    let (filename, json) = planner.backup()?;

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Could not create {}", dir.display()))?;
    let path = dir.join(filename);
    std::fs::write(&path, json).with_context(|| format!("Could not write {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote backup");
    ui.notify(&format!("Backup saved to {} 💾", path.display()));
    Ok(())
}

pub fn restore(planner: &mut CliPlanner, ui: &mut dyn Interaction, file: &Path) -> Result<()> {
    if !file.is_file() {
        ui.alert(&format!("Please pick a backup file ({} was not found)", file.display()));
        return Ok(());
    }

    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Could not read {}", file.display()))?;

    planner.dispatch(Intent::Restore(json), ui)?;
    Ok(())
}
