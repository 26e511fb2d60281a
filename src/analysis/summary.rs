//! Pattern summary
//!
//! Combines weekday aggregation, trend and variability into one
//! `PatternSummary`, recomputed from scratch on every call.

use crate::analysis::trend::{estimate_trend, TrendDirection};
use crate::analysis::variability::{population_std_dev, VariabilityLevel};
use crate::analysis::weekday::{weekday_averages, WeekdayAverages};
use crate::entry::{weekday_name, Mood, MoodEntry};
use serde::Serialize;

/// Descriptive statistics over the full entry list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSummary {
    /// Weekday (0 = Sunday) with the highest mean mood
    pub highest_day: Option<u8>,
    pub highest_average: Option<f64>,
    /// Weekday with the lowest mean mood
    pub lowest_day: Option<u8>,
    pub lowest_average: Option<f64>,
    pub weekday_averages: WeekdayAverages,
    pub trend_direction: TrendDirection,
    /// Regression slope, absent when fewer than five distinct days exist
    pub trend_slope: Option<f64>,
    /// Mean of every entry's mood value
    pub overall_average: f64,
    /// Population standard deviation of every entry's mood value
    pub variability: f64,
    pub variability_level: VariabilityLevel,
    pub entry_count: usize,
}

impl PatternSummary {
    pub fn highest_day_name(&self) -> Option<&'static str> {
        self.highest_day.map(weekday_name)
    }

    pub fn lowest_day_name(&self) -> Option<&'static str> {
        self.lowest_day.map(weekday_name)
    }

    /// Overall average as displayed, to one decimal place
    pub fn rounded_overall_average(&self) -> f64 {
        round_to_tenth(self.overall_average)
    }

    /// Mood label of the displayed overall average
    pub fn overall_label(&self) -> Mood {
        classify_average(self.rounded_overall_average())
    }

    /// Mood label of the best weekday's displayed average
    pub fn highest_label(&self) -> Option<Mood> {
        self.highest_average.map(|avg| classify_average(round_to_tenth(avg)))
    }

    /// Mood label of the worst weekday's displayed average
    pub fn lowest_label(&self) -> Option<Mood> {
        self.lowest_average.map(|avg| classify_average(round_to_tenth(avg)))
    }
}

/// Analyze the full list of entries
///
/// An empty list yields an all-absent summary with a zero average; callers
/// normally gate on `insights_ready` first.
pub fn analyze(entries: &[MoodEntry]) -> PatternSummary {
    let averages = weekday_averages(entries);
    let highest = averages.highest();
    let lowest = averages.lowest();

    let trend = estimate_trend(entries);

    let values: Vec<f64> = entries.iter().map(|e| e.mood_value() as f64).collect();
    let overall_average = if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    };
    let variability = population_std_dev(&values).unwrap_or(0.0);

    tracing::debug!(
        entries = entries.len(),
        overall_average,
        variability,
        trend = %trend.direction,
        "Analyzed mood patterns"
    );

    PatternSummary {
        highest_day: highest.map(|(day, _)| day),
        highest_average: highest.map(|(_, avg)| avg),
        lowest_day: lowest.map(|(day, _)| day),
        lowest_average: lowest.map(|(_, avg)| avg),
        weekday_averages: averages,
        trend_direction: trend.direction,
        trend_slope: trend.slope,
        overall_average,
        variability,
        variability_level: VariabilityLevel::from_std_dev(variability),
        entry_count: entries.len(),
    }
}

/// Map an average mood onto the seven-level scale
///
/// Half-open bands: ≥6.5, ≥5.5, ≥4.5, ≥3.5, ≥2.5, ≥1.5, below.
pub fn classify_average(average: f64) -> Mood {
    if average >= 6.5 {
        Mood::VeryHappy
    } else if average >= 5.5 {
        Mood::Happy
    } else if average >= 4.5 {
        Mood::Neutral
    } else if average >= 3.5 {
        Mood::Frustrated
    } else if average >= 2.5 {
        Mood::Angry
    } else if average >= 1.5 {
        Mood::Sad
    } else {
        Mood::VerySad
    }
}

/// Round to one decimal place
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
