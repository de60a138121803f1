use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;

/// Key under which the current user is persisted.
pub const STORAGE_KEY: &str = "school_auth_user";

/// A single persisted string slot, the way a browser's local storage holds
/// one key.
pub trait SessionStorage: Send + Sync {
    /// The stored value, or `None` when nothing is persisted.
    fn load(&self) -> Result<Option<String>>;

    fn save(&self, value: &str) -> Result<()>;

    /// Remove the stored value. Clearing an empty slot is not an error.
    fn clear(&self) -> Result<()>;
}

/// Persists the session as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/school_auth_user.json` in the platform data directory.
    pub fn open_default() -> anyhow::Result<Self> {
        let dirs = directories::ProjectDirs::from("", "", "edumanage")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(Self::new(
            dirs.data_dir().join(format!("{}.json", STORAGE_KEY)),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, value: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, value)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the session in memory only (for tests and the JSON API).
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    value: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `value`, as if persisted by a prior run.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(value.into())),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.value.lock().expect("session lock poisoned").clone())
    }

    fn save(&self, value: &str) -> Result<()> {
        *self.value.lock().expect("session lock poisoned") = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.value.lock().expect("session lock poisoned") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("nested").join("session.json"));

        assert_eq!(storage.load().unwrap(), None);

        storage.save("{\"id\":\"1\"}").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("{\"id\":\"1\"}"));

        storage.clear().unwrap();
        assert_eq!(storage.load().unwrap(), None);

        // Clearing twice is harmless
        storage.clear().unwrap();
    }

    #[test]
    fn memory_storage_starts_empty() {
        let storage = MemorySessionStorage::new();
        assert_eq!(storage.load().unwrap(), None);
        storage.save("x").unwrap();
        assert_eq!(storage.load().unwrap().as_deref(), Some("x"));
    }
}
