//! Insight activation gate
//!
//! Insights stay hidden until the entries span enough distinct calendar
//! days. Several entries on the same date count once.

use crate::analysis::summary::{analyze, PatternSummary};
use crate::entry::MoodEntry;
use std::collections::HashSet;

/// Distinct days of data needed before insights appear
pub const MIN_DISTINCT_DAYS: usize = 3;

/// Number of distinct calendar dates covered by `entries`
pub fn distinct_dates(entries: &[MoodEntry]) -> usize {
    entries.iter().map(|e| e.date).collect::<HashSet<_>>().len()
}

/// Whether `entries` cover at least `min_days` distinct dates
pub fn insights_ready(entries: &[MoodEntry], min_days: usize) -> bool {
    distinct_dates(entries) >= min_days
}

/// Analyze only once the distinct-day threshold is met
pub fn analyze_if_ready(entries: &[MoodEntry], min_days: usize) -> Option<PatternSummary> {
    let days = distinct_dates(entries);
    if days < min_days {
        tracing::debug!(days, required = min_days, "Not enough distinct days for insights");
        return None;
    }
    Some(analyze(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Mood;
    use chrono::{TimeZone, Utc};

    fn on(day: u32, hour: u32) -> MoodEntry {
        let at = Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap();
        MoodEntry::record(Mood::Neutral, "", &at).unwrap()
    }

    #[test]
    fn test_same_day_entries_count_once() {
        let entries = vec![on(1, 8), on(1, 12), on(1, 22), on(2, 9)];
        assert_eq!(distinct_dates(&entries), 2);
        assert!(!insights_ready(&entries, MIN_DISTINCT_DAYS));
        assert!(analyze_if_ready(&entries, MIN_DISTINCT_DAYS).is_none());
    }

    #[test]
    fn test_third_day_activates() {
        let entries = vec![on(1, 8), on(2, 8), on(3, 8)];
        assert!(insights_ready(&entries, MIN_DISTINCT_DAYS));

        let summary = analyze_if_ready(&entries, MIN_DISTINCT_DAYS).unwrap();
        assert_eq!(summary.entry_count, 3);
    }

    #[test]
    fn test_empty_is_not_ready() {
        assert_eq!(distinct_dates(&[]), 0);
        assert!(analyze_if_ready(&[], MIN_DISTINCT_DAYS).is_none());
    }

    #[test]
    fn test_custom_threshold() {
        let entries: Vec<MoodEntry> = (1..=6).map(|d| on(d, 9)).collect();
        assert!(!insights_ready(&entries, 7));
        assert!(insights_ready(&entries, 6));
    }
}
