use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{PlannerError, PlannerResult};

/// One `<key>.json` file per record inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) the data directory.
    pub fn open(dir: impl Into<PathBuf>) -> PlannerResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PlannerResult<PathBuf> {
        if key.is_empty() || key.contains(|c: char| c == '/' || c == '\\') || key.starts_with('.') {
            return Err(PlannerError::Storage(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PlannerResult<Option<String>> {
        let path = self.path_for(key)?;

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> PlannerResult<()> {
        let path = self.path_for(key)?;
        let temp = path.with_extension("json.tmp");

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        tracing::debug!(key, path = %path.display(), "saved record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert_eq!(store.get("kawaiiTodos").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("nested")).unwrap();

        store.set("kawaiiTodos", "[]").unwrap();
        assert_eq!(store.get("kawaiiTodos").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/kawaiiTodos.json").exists());
        assert!(!dir.path().join("nested/kawaiiTodos.json.tmp").exists());
    }

    #[test]
    fn rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path()).unwrap();
        assert!(store.set("../escape", "{}").is_err());
        assert!(store.get("a/b").is_err());
    }
}
