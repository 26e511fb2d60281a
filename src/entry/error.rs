//! Mood entry error types

use thiserror::Error;

/// Errors raised while building or decoding mood entries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoodError {
    /// Label or number does not name a mood on the scale
    #[error("Unknown mood: {0}")]
    UnknownMood(String),

    /// Numeric mood outside 1..=7
    #[error("Mood value out of range (1-7): {0}")]
    ValueOutOfRange(u8),

    /// Stored label and value disagree
    #[error("Mood label '{label}' does not match value {value}")]
    LabelMismatch { label: String, value: u8 },

    /// Stored weekday outside 0..=6
    #[error("Invalid weekday: {0}")]
    InvalidWeekday(u8),

    /// Note longer than the allowed maximum
    #[error("Note is too long ({len} characters, max {max})")]
    NoteTooLong { len: usize, max: usize },
}
