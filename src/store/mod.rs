//! Moodtrack Entry Store
//!
//! Persists the full list of mood entries as one serialized record under a
//! single key, the way a browser keeps it in local storage:
//!
//! - **backend**: The `KeyValueBackend` trait plus in-memory and file backends
//! - **sqlite**: A SQLite-backed key-value table
//! - **entries**: `EntryStore`, the load / append / clear API over a backend
//! - **error**: Error types
//!
//! # Write Path
//!
//! ```text
//!   load whole list → push entry → sort newest-first → replace whole list
//! ```
//!
//! Within one process `EntryStore` takes `&mut self` for every write, so the
//! read-modify-write cannot interleave. Two processes sharing the same file
//! or database can still lose updates: whichever writes last wins.

pub mod backend;
pub mod entries;
pub mod error;
pub mod sqlite;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use entries::{EntryStore, DEFAULT_ENTRIES_KEY};
pub use error::{StoreError, StoreResult};
pub use sqlite::SqliteBackend;

/// Which persistence mechanism backs the entry store
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// One JSON file per key in the data directory
    #[default]
    File,
    /// A key-value table in a SQLite database
    Sqlite,
    /// Volatile, lost when the process exits
    Memory,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::File => write!(f, "file"),
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" | "json" => Ok(BackendKind::File),
            "sqlite" => Ok(BackendKind::Sqlite),
            "memory" => Ok(BackendKind::Memory),
            other => Err(StoreError::Config(format!("unknown storage backend: {}", other))),
        }
    }
}
