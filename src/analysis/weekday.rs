//! Weekday aggregation
//!
//! Buckets entries by their stored weekday and averages each bucket.
//! Empty buckets stay empty rather than counting as zero.

use crate::entry::MoodEntry;
use serde::Serialize;

/// Mean mood per weekday, index 0 = Sunday
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekdayAverages {
    averages: [Option<f64>; 7],
    counts: [usize; 7],
}

/// Average every weekday bucket
pub fn weekday_averages(entries: &[MoodEntry]) -> WeekdayAverages {
    let mut sums = [0.0_f64; 7];
    let mut counts = [0_usize; 7];

    for entry in entries {
        let idx = entry.weekday as usize;
        if let (Some(sum), Some(count)) = (sums.get_mut(idx), counts.get_mut(idx)) {
            *sum += entry.mood_value() as f64;
            *count += 1;
        }
    }

    let mut averages = [None; 7];
    for (idx, avg) in averages.iter_mut().enumerate() {
        if counts[idx] > 0 {
            *avg = Some(sums[idx] / counts[idx] as f64);
        }
    }

    WeekdayAverages { averages, counts }
}

impl WeekdayAverages {
    /// Mean mood for a weekday, if it has entries
    pub fn get(&self, weekday: u8) -> Option<f64> {
        self.averages.get(weekday as usize).copied().flatten()
    }

    /// Number of entries on a weekday
    pub fn count(&self, weekday: u8) -> usize {
        self.counts.get(weekday as usize).copied().unwrap_or(0)
    }

    /// Weekdays with data, in weekday order
    pub fn iter(&self) -> impl Iterator<Item = (u8, f64)> + '_ {
        self.averages
            .iter()
            .enumerate()
            .filter_map(|(idx, avg)| avg.map(|a| (idx as u8, a)))
    }

    /// Weekday with the highest mean; ties go to the earlier weekday
    pub fn highest(&self) -> Option<(u8, f64)> {
        self.iter().fold(None, |best, (day, avg)| match best {
            Some((_, best_avg)) if avg <= best_avg => best,
            _ => Some((day, avg)),
        })
    }

    /// Weekday with the lowest mean; ties go to the earlier weekday
    pub fn lowest(&self) -> Option<(u8, f64)> {
        self.iter().fold(None, |worst, (day, avg)| match worst {
            Some((_, worst_avg)) if avg >= worst_avg => worst,
            _ => Some((day, avg)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Mood;
    use chrono::{TimeZone, Utc};

    // 2024-01-14 is a Sunday, so day 14 + n has weekday n
    fn on(day: u32, value: u8) -> MoodEntry {
        let at = Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap();
        MoodEntry::record(Mood::from_value(value).unwrap(), "", &at).unwrap()
    }

    #[test]
    fn test_bucket_means() {
        let entries = vec![on(15, 7), on(15, 4), on(22, 1), on(17, 5)];
        let averages = weekday_averages(&entries);

        assert_eq!(averages.get(1), Some(4.0));
        assert_eq!(averages.count(1), 3);
        assert_eq!(averages.get(3), Some(5.0));
        assert_eq!(averages.get(0), None);
        assert_eq!(averages.count(0), 0);
    }

    #[test]
    fn test_empty_buckets_excluded_from_extremes() {
        let entries = vec![on(16, 6), on(18, 6)];
        let averages = weekday_averages(&entries);

        assert_eq!(averages.highest(), Some((2, 6.0)));
        assert_eq!(averages.lowest(), Some((2, 6.0)));
    }

    #[test]
    fn test_ties_resolve_to_lower_weekday() {
        // Mon 7, Tue 7, Wed 1, Thu 1
        let entries = vec![on(15, 7), on(16, 7), on(17, 1), on(18, 1)];
        let averages = weekday_averages(&entries);

        assert_eq!(averages.highest(), Some((1, 7.0)));
        assert_eq!(averages.lowest(), Some((3, 1.0)));
    }

    #[test]
    fn test_high_only_week_still_has_lowest() {
        let entries = vec![on(19, 7), on(20, 7)];
        let averages = weekday_averages(&entries);

        assert_eq!(averages.lowest(), Some((5, 7.0)));
    }

    #[test]
    fn test_no_entries() {
        let averages = weekday_averages(&[]);
        assert_eq!(averages.highest(), None);
        assert_eq!(averages.lowest(), None);
        assert_eq!(averages.iter().count(), 0);
    }
}
