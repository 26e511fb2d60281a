//! Core data types for mood tracking
//!
//! - `Mood`: The seven-level mood scale (1 = very sad, 7 = very happy)
//! - `MoodEntry`: One logged mood with its date, time and optional note
//!
//! Entries are immutable once recorded. The persisted shape uses camelCase
//! field names and carries both the mood label and its numeric value; a
//! record whose label and value disagree is rejected when decoded.

use crate::entry::error::MoodError;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum note length in characters
pub const NOTE_MAX_CHARS: usize = 200;

/// Weekday names indexed by `MoodEntry::weekday` (0 = Sunday)
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Name of a weekday index, or "Unknown" outside 0..=6
pub fn weekday_name(weekday: u8) -> &'static str {
    WEEKDAY_NAMES
        .get(weekday as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// A level on the seven-point mood scale
///
/// The discriminant is the mood value, so `Ord` follows the scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Mood {
    VerySad = 1,
    Sad = 2,
    Angry = 3,
    Frustrated = 4,
    Neutral = 5,
    Happy = 6,
    VeryHappy = 7,
}

/// One row of the mood scale
struct Level {
    mood: Mood,
    key: &'static str,
    name: &'static str,
    emoji: &'static str,
    color: &'static str,
}

/// The mood scale, indexed by `value - 1`
static SCALE: [Level; 7] = [
    Level { mood: Mood::VerySad, key: "very_sad", name: "Very Sad", emoji: "😢", color: "#f44336" },
    Level { mood: Mood::Sad, key: "sad", name: "Sad", emoji: "😔", color: "#ff9800" },
    Level { mood: Mood::Angry, key: "angry", name: "Angry", emoji: "😠", color: "#e53935" },
    Level { mood: Mood::Frustrated, key: "frustrated", name: "Frustrated", emoji: "😤", color: "#ff5722" },
    Level { mood: Mood::Neutral, key: "neutral", name: "Neutral", emoji: "😐", color: "#ffeb3b" },
    Level { mood: Mood::Happy, key: "happy", name: "Happy", emoji: "🙂", color: "#8bc34a" },
    Level { mood: Mood::VeryHappy, key: "very_happy", name: "Very Happy", emoji: "😊", color: "#4caf50" },
];

impl Mood {
    /// All moods, most negative first
    pub fn all() -> [Mood; 7] {
        std::array::from_fn(|idx| SCALE[idx].mood)
    }

    /// Numeric value on the 1..=7 scale
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Look up a mood by its numeric value
    pub fn from_value(value: u8) -> Result<Self, MoodError> {
        value
            .checked_sub(1)
            .and_then(|idx| SCALE.get(idx as usize))
            .map(|level| level.mood)
            .ok_or(MoodError::ValueOutOfRange(value))
    }

    /// Look up a mood by its storage key (e.g. "very_happy")
    pub fn from_key(key: &str) -> Option<Self> {
        SCALE.iter().find(|level| level.key == key).map(|level| level.mood)
    }

    fn level(self) -> &'static Level {
        &SCALE[self as usize - 1]
    }

    /// Storage key, e.g. "very_happy"
    pub fn key(self) -> &'static str {
        self.level().key
    }

    /// Human-readable name, e.g. "Very Happy"
    pub fn display_name(self) -> &'static str {
        self.level().name
    }

    pub fn emoji(self) -> &'static str {
        self.level().emoji
    }

    /// Chart point colour
    pub fn color(self) -> &'static str {
        self.level().color
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Mood {
    type Err = MoodError;

    /// Accepts a storage key ("very_happy"), a display name ("Very Happy",
    /// any case, spaces or dashes) or a number 1-7.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Ok(value) = trimmed.parse::<u8>() {
            return Mood::from_value(value);
        }

        let normalized = trimmed.to_lowercase().replace([' ', '-'], "_");
        Mood::from_key(&normalized).ok_or_else(|| MoodError::UnknownMood(s.to_string()))
    }
}

/// A single logged mood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredEntry", into = "StoredEntry")]
pub struct MoodEntry {
    /// Unique identifier, assigned at creation
    pub(crate) id: String,
    /// Calendar day the entry belongs to
    pub(crate) date: NaiveDate,
    /// Wall-clock time of creation (HH:MM:SS)
    pub(crate) exact_time: String,
    /// Creation instant, Unix milliseconds
    pub(crate) timestamp: i64,
    /// The logged mood
    pub(crate) mood: Mood,
    /// Free-text note, possibly empty
    pub(crate) note: String,
    /// Day of week of `date`, 0 = Sunday
    pub(crate) weekday: u8,
}

impl MoodEntry {
    /// Record a mood at the given instant
    ///
    /// The note is trimmed and must not exceed `NOTE_MAX_CHARS`.
    pub fn record<Tz: TimeZone>(
        mood: Mood,
        note: &str,
        at: &DateTime<Tz>,
    ) -> Result<Self, MoodError>
    where
        Tz::Offset: fmt::Display,
    {
        let note = note.trim();
        let len = note.chars().count();
        if len > NOTE_MAX_CHARS {
            return Err(MoodError::NoteTooLong {
                len,
                max: NOTE_MAX_CHARS,
            });
        }

        let date = at.date_naive();

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            exact_time: at.format("%H:%M:%S").to_string(),
            timestamp: at.timestamp_millis(),
            mood,
            note: note.to_string(),
            weekday: date.weekday().num_days_from_sunday() as u8,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Wall-clock time of creation, "HH:MM:SS"
    pub fn exact_time(&self) -> &str {
        &self.exact_time
    }

    /// Creation instant, Unix milliseconds
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    /// Day of week, 0 = Sunday
    pub fn weekday(&self) -> u8 {
        self.weekday
    }

    /// Numeric mood value (1..=7)
    pub fn mood_value(&self) -> u8 {
        self.mood.value()
    }

    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }

    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

/// Persisted shape of a `MoodEntry`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredEntry {
    id: String,
    date: NaiveDate,
    #[serde(default)]
    exact_time: String,
    timestamp: i64,
    mood: String,
    mood_value: u8,
    #[serde(default)]
    note: String,
    weekday: u8,
}

impl TryFrom<StoredEntry> for MoodEntry {
    type Error = MoodError;

    fn try_from(stored: StoredEntry) -> Result<Self, Self::Error> {
        let mood = Mood::from_value(stored.mood_value)?;
        if mood.key() != stored.mood {
            return Err(MoodError::LabelMismatch {
                label: stored.mood,
                value: stored.mood_value,
            });
        }
        if stored.weekday as usize >= WEEKDAY_NAMES.len() {
            return Err(MoodError::InvalidWeekday(stored.weekday));
        }

        Ok(Self {
            id: stored.id,
            date: stored.date,
            exact_time: stored.exact_time,
            timestamp: stored.timestamp,
            mood,
            note: stored.note,
            weekday: stored.weekday,
        })
    }
}

impl From<MoodEntry> for StoredEntry {
    fn from(entry: MoodEntry) -> Self {
        Self {
            id: entry.id,
            date: entry.date,
            exact_time: entry.exact_time,
            timestamp: entry.timestamp,
            mood: entry.mood.key().to_string(),
            mood_value: entry.mood.value(),
            note: entry.note,
            weekday: entry.weekday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 30, 0).unwrap()
    }

    #[test]
    fn test_scale_is_bijective() {
        for (idx, mood) in Mood::all().into_iter().enumerate() {
            let value = idx as u8 + 1;
            assert_eq!(mood.value(), value);
            assert_eq!(Mood::from_value(value).unwrap(), mood);
            assert_eq!(Mood::from_key(mood.key()), Some(mood));
        }
        assert_eq!(Mood::from_value(0), Err(MoodError::ValueOutOfRange(0)));
        assert_eq!(Mood::from_value(8), Err(MoodError::ValueOutOfRange(8)));
    }

    #[test]
    fn test_mood_parsing() {
        assert_eq!("very_happy".parse::<Mood>().unwrap(), Mood::VeryHappy);
        assert_eq!("Very Happy".parse::<Mood>().unwrap(), Mood::VeryHappy);
        assert_eq!("very-sad".parse::<Mood>().unwrap(), Mood::VerySad);
        assert_eq!("5".parse::<Mood>().unwrap(), Mood::Neutral);
        assert!(matches!(
            "ecstatic".parse::<Mood>(),
            Err(MoodError::UnknownMood(_))
        ));
        assert_eq!("9".parse::<Mood>(), Err(MoodError::ValueOutOfRange(9)));
    }

    #[test]
    fn test_record_derives_date_fields() {
        // 2024-01-15 was a Monday
        let entry = MoodEntry::record(Mood::Happy, "  chai with team  ", &at(2024, 1, 15, 9)).unwrap();

        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(entry.weekday, 1);
        assert_eq!(entry.weekday_name(), "Monday");
        assert_eq!(entry.exact_time, "09:30:00");
        assert_eq!(entry.mood_value(), 6);
        assert_eq!(entry.note, "chai with team");
        assert!(!entry.id.is_empty());
    }

    #[test]
    fn test_accessors_expose_recorded_fields() {
        let when = at(2024, 1, 14, 21);
        let entry = MoodEntry::record(Mood::Frustrated, "late train", &when).unwrap();

        assert_eq!(entry.id(), entry.id.as_str());
        assert_eq!(entry.date(), NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
        assert_eq!(entry.exact_time(), "21:30:00");
        assert_eq!(entry.timestamp(), when.timestamp_millis());
        assert_eq!(entry.mood(), Mood::Frustrated);
        assert_eq!(entry.note(), "late train");
        assert_eq!(entry.weekday(), 0);
    }

    #[test]
    fn test_record_assigns_unique_ids() {
        let when = at(2024, 1, 15, 9);
        let a = MoodEntry::record(Mood::Happy, "", &when).unwrap();
        let b = MoodEntry::record(Mood::Happy, "", &when).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_record_rejects_long_note() {
        let note = "x".repeat(NOTE_MAX_CHARS + 1);
        let err = MoodEntry::record(Mood::Sad, &note, &at(2024, 1, 15, 9)).unwrap_err();
        assert_eq!(
            err,
            MoodError::NoteTooLong {
                len: NOTE_MAX_CHARS + 1,
                max: NOTE_MAX_CHARS
            }
        );
    }

    #[test]
    fn test_entry_serialization() {
        let entry = MoodEntry::record(Mood::Frustrated, "traffic", &at(2024, 3, 2, 18)).unwrap();
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"moodValue\":4"));
        assert!(json.contains("\"mood\":\"frustrated\""));
        assert!(json.contains("\"date\":\"2024-03-02\""));
        assert!(json.contains("\"exactTime\":\"18:30:00\""));

        let restored: MoodEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, entry);
    }

    #[test]
    fn test_mismatched_record_rejected() {
        let json = r#"{"id":"1","date":"2024-03-02","exactTime":"","timestamp":0,
            "mood":"happy","moodValue":2,"note":"","weekday":6}"#;
        let err = serde_json::from_str::<MoodEntry>(json).unwrap_err();
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_invalid_weekday_rejected() {
        let json = r#"{"id":"1","date":"2024-03-02","timestamp":0,
            "mood":"sad","moodValue":2,"weekday":7}"#;
        assert!(serde_json::from_str::<MoodEntry>(json).is_err());
    }
}
