//! # Moodtrack
//!
//! Personal mood tracking - log how you feel on a seven-level scale, keep
//! the history on disk, and get pattern insights once a few days of data
//! exist.
//!
//! ## Features
//!
//! - **Entry store**: The whole entry list kept under one key, in a JSON
//!   file or SQLite, with an in-memory fallback when storage is unavailable
//! - **Pattern analysis**: Best and worst weekday, weekly trend from a
//!   least-squares slope, and variability from the standard deviation
//! - **Insights**: Rule-based insight text and suggestions, including
//!   Broaden & Build suggestions when mood is positive
//! - **Chart and export**: Week or month chart points, CSV and JSON export
//!
//! ## Modules
//!
//! - [`entry`]: The mood scale and entry record
//! - [`store`]: Key-value backends and the entry store
//! - [`analysis`]: Pure pattern analysis over the entry list
//! - [`insights`]: Insight and suggestion rendering
//! - [`chart`]: Chart points for a recent window
//! - [`export`]: CSV and JSON export
//! - [`app`]: The application state and view trait
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use moodtrack::{analyze_if_ready, EntryStore, Mood, MoodEntry};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut store = EntryStore::in_memory();
//!
//!     let entry = MoodEntry::record(Mood::Happy, "sunny walk", &chrono::Local::now())?;
//!     store.append_and_persist(entry)?;
//!
//!     let entries = store.load_all()?;
//!     match analyze_if_ready(&entries, 3) {
//!         Some(summary) => println!("Overall: {}", summary.overall_label()),
//!         None => println!("Keep logging, insights need three days of data"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod app;
pub mod chart;
pub mod config;
pub mod entry;
pub mod export;
pub mod insights;
pub mod store;

// Re-export top-level types for convenience
pub use entry::{Mood, MoodEntry, MoodError};

pub use store::{
    BackendKind, EntryStore, FileBackend, KeyValueBackend, MemoryBackend, SqliteBackend,
    StoreError, StoreResult,
};

pub use analysis::{
    analyze, analyze_if_ready, classify_average, distinct_dates, PatternSummary, TrendDirection,
    VariabilityLevel,
};

pub use insights::{InsightRenderer, InsightReport, Suggestion, SuggestionKind};

pub use chart::{chart_points, ChartPeriod, ChartPoint};

pub use export::{ExportError, ExportFormat};

pub use app::{parse_entry_date, App, AppError, AppResult, AppStatus, InsightsOutcome, MoodView};

pub use config::{Config, ConfigError, LoggingConfig};
