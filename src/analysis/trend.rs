//! Trend estimation
//!
//! Reduces the entries to one per calendar day (the latest by timestamp),
//! keeps the most recent `TREND_WINDOW_DAYS` days and fits an ordinary
//! least-squares line against the day index.

use crate::entry::MoodEntry;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// How many distinct days the trend looks back over
pub const TREND_WINDOW_DAYS: usize = 7;

/// Fewer distinct days than this always reads as stable
pub const MIN_TREND_DAYS: usize = 5;

/// Slopes within ±this are stable
pub const TREND_SLOPE_THRESHOLD: f64 = 0.1;

/// Short-term direction of mood
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

impl TrendDirection {
    /// Classify a regression slope
    pub fn from_slope(slope: f64) -> Self {
        if slope > TREND_SLOPE_THRESHOLD {
            TrendDirection::Improving
        } else if slope < -TREND_SLOPE_THRESHOLD {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Improving => write!(f, "improving"),
            TrendDirection::Declining => write!(f, "declining"),
            TrendDirection::Stable => write!(f, "stable"),
        }
    }
}

/// Result of trend estimation
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Regression slope, absent when too few days were available
    pub slope: Option<f64>,
    /// Distinct days considered
    pub days: usize,
}

/// Latest entry for each of the most recent `window` distinct dates,
/// oldest first
pub fn latest_per_day(entries: &[MoodEntry], window: usize) -> Vec<&MoodEntry> {
    let mut by_date: BTreeMap<NaiveDate, &MoodEntry> = BTreeMap::new();

    for entry in entries {
        by_date
            .entry(entry.date)
            .and_modify(|kept| {
                if entry.timestamp > kept.timestamp {
                    *kept = entry;
                }
            })
            .or_insert(entry);
    }

    let skip = by_date.len().saturating_sub(window);
    by_date.into_values().skip(skip).collect()
}

/// Least-squares slope of `values` against their index 0, 1, 2, ...
///
/// Returns 0.0 for fewer than two values.
pub fn linear_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }

    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_x2 = 0.0;

    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }

    (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x)
}

/// Estimate the short-term trend over the most recent distinct days
pub fn estimate_trend(entries: &[MoodEntry]) -> Trend {
    let recent = latest_per_day(entries, TREND_WINDOW_DAYS);

    if recent.len() < MIN_TREND_DAYS {
        return Trend {
            direction: TrendDirection::Stable,
            slope: None,
            days: recent.len(),
        };
    }

    let values: Vec<f64> = recent.iter().map(|e| e.mood_value() as f64).collect();
    let slope = linear_slope(&values);

    tracing::debug!(days = recent.len(), slope, "Estimated mood trend");

    Trend {
        direction: TrendDirection::from_slope(slope),
        slope: Some(slope),
        days: recent.len(),
    }
}
