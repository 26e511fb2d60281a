//! Entry store
//!
//! Loads, appends and clears the full list of mood entries over any
//! `KeyValueBackend`. The list is always read and written as a whole.

use crate::entry::MoodEntry;
use crate::store::backend::{FileBackend, KeyValueBackend, MemoryBackend};
use crate::store::error::StoreResult;
use crate::store::sqlite::SqliteBackend;
use crate::store::BackendKind;
use std::path::Path;

/// Key the entry list is stored under
pub const DEFAULT_ENTRIES_KEY: &str = "moodEntries";

/// Persistent list of mood entries
pub struct EntryStore {
    backend: Box<dyn KeyValueBackend>,
    key: String,
    degraded: bool,
}

impl EntryStore {
    /// Wrap an already-constructed backend
    pub fn new(backend: Box<dyn KeyValueBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            degraded: false,
        }
    }

    /// Volatile store, used by tests and degraded mode
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryBackend::new()), DEFAULT_ENTRIES_KEY)
    }

    /// Open the configured backend and probe it once
    ///
    /// If the backend cannot be opened or fails the probe, a warning is
    /// logged and the store falls back to memory. Entries written in that
    /// mode do not survive the process.
    pub fn open(kind: BackendKind, data_dir: &Path, key: &str) -> Self {
        let opened: StoreResult<Box<dyn KeyValueBackend>> = match kind {
            BackendKind::File => {
                FileBackend::new(data_dir).map(|b| Box::new(b) as Box<dyn KeyValueBackend>)
            }
            BackendKind::Sqlite => {
                SqliteBackend::new(data_dir).map(|b| Box::new(b) as Box<dyn KeyValueBackend>)
            }
            BackendKind::Memory => Ok(Box::new(MemoryBackend::new())),
        };

        let probed = opened.and_then(|mut backend| {
            backend.probe()?;
            Ok(backend)
        });

        match probed {
            Ok(backend) => {
                tracing::debug!(backend = backend.name(), data_dir = ?data_dir, "Entry store opened");
                Self::new(backend, key)
            }
            Err(e) => {
                tracing::warn!(
                    backend = %kind,
                    error = %e,
                    "Storage unavailable, entries will not survive a restart"
                );
                let mut store = Self::new(Box::new(MemoryBackend::new()), key);
                store.degraded = true;
                store
            }
        }
    }

    /// True when running on the memory fallback after a failed probe
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key a corrupt list is copied to before it is overwritten
    pub fn backup_key(&self) -> String {
        format!("{}.corrupt", self.key)
    }

    /// Load every entry in store order (newest first)
    ///
    /// A stored list that cannot be parsed is treated as empty.
    pub fn load_all(&self) -> StoreResult<Vec<MoodEntry>> {
        let (entries, _) = self.read_entries()?;
        Ok(entries)
    }

    /// Append one entry and write the whole list back
    pub fn append_and_persist(&mut self, entry: MoodEntry) -> StoreResult<()> {
        let (mut entries, corrupt) = self.read_entries()?;

        if let Some(raw) = corrupt {
            let backup_key = self.backup_key();
            self.backend.set(&backup_key, &raw)?;
            tracing::warn!(backup_key = %backup_key, "Preserved unreadable entry list before overwrite");
        }

        tracing::info!(
            id = %entry.id,
            date = %entry.date,
            mood = entry.mood.key(),
            "Saving mood entry"
        );

        entries.push(entry);
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let content = serde_json::to_string(&entries)?;
        self.backend.set(&self.key, &content)?;
        Ok(())
    }

    /// Remove every entry
    pub fn clear_all(&mut self) -> StoreResult<()> {
        self.backend.remove(&self.key)?;
        tracing::info!(key = %self.key, "Cleared all mood entries");
        Ok(())
    }

    /// Read the list, returning the raw text alongside an empty list if it
    /// could not be parsed
    fn read_entries(&self) -> StoreResult<(Vec<MoodEntry>, Option<String>)> {
        let raw = match self.backend.get(&self.key)? {
            Some(raw) => raw,
            None => return Ok((Vec::new(), None)),
        };

        if raw.trim().is_empty() {
            return Ok((Vec::new(), None));
        }

        match serde_json::from_str::<Vec<MoodEntry>>(&raw) {
            Ok(entries) => Ok((entries, None)),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Stored entries are unreadable, treating as empty");
                Ok((Vec::new(), Some(raw)))
            }
        }
    }
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore")
            .field("backend", &self.backend.name())
            .field("key", &self.key)
            .field("degraded", &self.degraded)
            .finish()
    }
}
