//! Key-value backends
//!
//! The entry store only ever needs three operations on string keys: get,
//! set (replace) and remove. Backends implement `KeyValueBackend`; the
//! store picks one at startup and probes it once.

use crate::store::error::{StoreError, StoreResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Key used by the startup probe
const PROBE_KEY: &str = "__moodtrack_probe";

/// A minimal persistent key-value store
pub trait KeyValueBackend {
    /// Short name for logs and status output
    fn name(&self) -> &'static str;

    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> StoreResult<()>;

    /// Check the backend can round-trip a value
    ///
    /// Writes a probe key, reads it back and removes it.
    fn probe(&mut self) -> StoreResult<()> {
        self.set(PROBE_KEY, "probe")?;
        let read_back = self.get(PROBE_KEY)?;
        self.remove(PROBE_KEY)?;

        match read_back.as_deref() {
            Some("probe") => Ok(()),
            other => Err(StoreError::Unavailable(format!(
                "{} backend returned {:?} for probe key",
                self.name(),
                other
            ))),
        }
    }
}

/// Volatile in-process backend
#[derive(Debug, Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a data directory
///
/// Writes go to a temporary file that is renamed over the target, so a
/// crash mid-write leaves the previous list intact.
#[derive(Debug)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create the backend, creating `dir` if needed
    pub fn new(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Get path to the file holding `key`
    pub fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !key.starts_with('.');

        if !valid {
            return Err(StoreError::Config(format!("invalid storage key: {:?}", key)));
        }

        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueBackend for FileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");

        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_memory_backend() {
        let mut backend = MemoryBackend::new();

        assert_eq!(backend.get("moodEntries").unwrap(), None);
        backend.set("moodEntries", "[]").unwrap();
        assert_eq!(backend.get("moodEntries").unwrap().as_deref(), Some("[]"));

        backend.remove("moodEntries").unwrap();
        assert_eq!(backend.get("moodEntries").unwrap(), None);

        // Removing twice is fine
        backend.remove("moodEntries").unwrap();
        backend.probe().unwrap();
    }

    #[test]
    fn test_file_backend_persistence() {
        let dir = tempdir().unwrap();

        {
            let mut backend = FileBackend::new(dir.path()).unwrap();
            backend.set("moodEntries", "[1,2,3]").unwrap();
        }

        let backend = FileBackend::new(dir.path()).unwrap();
        assert_eq!(backend.get("moodEntries").unwrap().as_deref(), Some("[1,2,3]"));
        assert!(dir.path().join("moodEntries.json").exists());
        assert!(!dir.path().join("moodEntries.json.tmp").exists());
    }

    #[test]
    fn test_file_backend_remove_missing() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path()).unwrap();

        backend.remove("never_written").unwrap();
        assert_eq!(backend.get("never_written").unwrap(), None);
    }

    #[test]
    fn test_file_backend_rejects_path_keys() {
        let dir = tempdir().unwrap();
        let backend = FileBackend::new(dir.path()).unwrap();

        assert!(backend.path_for("../escape").is_err());
        assert!(backend.path_for("").is_err());
        assert!(backend.path_for(".hidden").is_err());
        assert!(backend.path_for("moodEntries").is_ok());
    }

    #[test]
    fn test_file_backend_probe() {
        let dir = tempdir().unwrap();
        let mut backend = FileBackend::new(dir.path()).unwrap();

        backend.probe().unwrap();
        assert!(!dir.path().join(format!("{}.json", PROBE_KEY)).exists());
    }
}
