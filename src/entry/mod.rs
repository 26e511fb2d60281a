//! Mood entries
//!
//! The data model shared by every other module:
//!
//! - **types**: `Mood` (the seven-level scale) and `MoodEntry`
//! - **error**: Validation errors for moods, notes and stored records
//!
//! The mood scale is a single table. Every label, value, display name,
//! emoji and chart colour is looked up through `Mood`, never re-derived.

pub mod error;
pub mod types;

pub use error::MoodError;
pub use types::{weekday_name, Mood, MoodEntry, NOTE_MAX_CHARS, WEEKDAY_NAMES};
