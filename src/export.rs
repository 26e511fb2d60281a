//! Export
//!
//! Serializes the stored entries as CSV or pretty JSON.

use crate::entry::MoodEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// CSV column headers
pub const CSV_HEADER: [&str; 5] = ["Date", "Time", "Mood", "Mood Value", "Note"];

/// Export errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error("Unknown export format: {0}")]
    UnknownFormat(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnknownFormat(other.to_string())),
        }
    }
}

/// Format entries as CSV, in store order
pub fn to_csv(entries: &[MoodEntry]) -> ExportResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for entry in entries {
        writer.write_record([
            entry.date.format("%d/%m/%Y").to_string(),
            entry.exact_time.clone(),
            entry.mood.display_name().to_string(),
            entry.mood_value().to_string(),
            entry.note.clone(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}

/// Format entries as a pretty-printed JSON array of stored records
pub fn to_json(entries: &[MoodEntry]) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}

/// Format entries in `format`
pub fn export(entries: &[MoodEntry], format: ExportFormat) -> ExportResult<String> {
    let body = match format {
        ExportFormat::Csv => to_csv(entries)?,
        ExportFormat::Json => to_json(entries)?,
    };

    tracing::debug!(format = %format, entries = entries.len(), bytes = body.len(), "Exported entries");
    Ok(body)
}

/// Suggested download name, e.g. `mood_tracker_data_2024-01-20.csv`
pub fn default_file_name(format: ExportFormat, today: NaiveDate) -> String {
    format!(
        "mood_tracker_data_{}.{}",
        today.format("%Y-%m-%d"),
        format.extension()
    )
}
