//! Global planner configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

static DEFAULT_DATA_DIR: &str = "~/.kawaii-plan";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

/// Configuration at ~/.config/kawaii-plan/config.toml
///
/// Every key can be overridden from the environment with a `KAWAII_PLAN_`
/// prefix, e.g. `KAWAII_PLAN_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Where the record files live.
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            data_dir: default_data_dir(),
        }
    }
}

impl PlannerConfig {
    pub fn config_path() -> PlannerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlannerError::Config("Could not determine config directory".into()))?
            .join("kawaii-plan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config, writing a commented default file on first run.
    pub fn load() -> PlannerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PlannerResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("KAWAII_PLAN"))
            .build()
            .map_err(|e| PlannerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlannerError::Config(e.to_string()))
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Save the current config to ~/.config/kawaii-plan/config.toml
    pub fn save(&self) -> PlannerResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> PlannerResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| PlannerError::Config(e.to_string()))?;
        write_config_file(path, &content)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlannerResult<()> {
        let contents = format!(
            "\
# kawaii-plan configuration

# Where your todos, events and settings are stored:
# data_dir = \"{}\"
",
            DEFAULT_DATA_DIR
        );
        write_config_file(path, &contents)
    }
}

/// Write `contents` to `path`, creating missing parent directories.
fn write_config_file(path: &Path, contents: &str) -> PlannerResult<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir)
            .map_err(|e| PlannerError::Config(format!("{}: {e}", dir.display())))?;
    }

    std::fs::write(path, contents)
        .map_err(|e| PlannerError::Config(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commented_default_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kawaii-plan/config.toml");

        PlannerConfig::create_default_config(&path).unwrap();
        let config = PlannerConfig::load_from(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("~/.kawaii-plan"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = PlannerConfig {
            data_dir: dir.path().join("data"),
        };
        config.save_to(&path).unwrap();
        assert_eq!(PlannerConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn default_dir_is_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        PlannerConfig::default().save_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("data_dir"));
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/config.toml");

        let config = PlannerConfig {
            data_dir: PathBuf::from("/srv/planner"),
        };
        config.save_to(&path).unwrap();
        assert_eq!(PlannerConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn write_failure_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let err = PlannerConfig::create_default_config(&blocker.join("config.toml")).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
        assert!(err.to_string().contains("not-a-dir"));
    }
}
