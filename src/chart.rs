//! Chart adapter
//!
//! Filters entries to a recent window and turns them into plot points.
//! Rendering is left to the caller; `render_text` gives a plain terminal
//! bar chart.

use crate::entry::{Mood, MoodEntry};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time window shown on the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartPeriod {
    #[default]
    Week,
    Month,
}

impl ChartPeriod {
    /// Number of calendar days in the window, today included
    pub fn days(&self) -> i64 {
        match self {
            ChartPeriod::Week => 7,
            ChartPeriod::Month => 30,
        }
    }

    /// First date inside the window
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.days() - 1)
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartPeriod::Week => write!(f, "week"),
            ChartPeriod::Month => write!(f, "month"),
        }
    }
}

impl FromStr for ChartPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "7d" => Ok(ChartPeriod::Week),
            "month" | "30d" => Ok(ChartPeriod::Month),
            other => Err(format!("Unknown chart period: {} (expected week or month)", other)),
        }
    }
}

/// One plotted entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    /// "DD Mon HH:MM:SS"
    pub label: String,
    pub date: NaiveDate,
    pub value: u8,
    pub color: &'static str,
    pub note: Option<String>,
}

impl ChartPoint {
    fn from_entry(entry: &MoodEntry) -> Self {
        Self {
            label: format!("{} {}", entry.date.format("%d %b"), entry.exact_time),
            date: entry.date,
            value: entry.mood_value(),
            color: entry.mood.color(),
            note: entry.has_note().then(|| entry.note.clone()),
        }
    }
}

/// Entries dated within the period ending `today`, oldest first
pub fn filter_by_period<'a>(
    entries: &'a [MoodEntry],
    period: ChartPeriod,
    today: NaiveDate,
) -> Vec<&'a MoodEntry> {
    let start = period.start_date(today);

    let mut selected: Vec<&MoodEntry> = entries
        .iter()
        .filter(|e| e.date >= start && e.date <= today)
        .collect();

    selected.sort_by(|a, b| a.date.cmp(&b.date).then(a.timestamp.cmp(&b.timestamp)));
    selected
}

/// Plot points for the period ending `today`
pub fn chart_points(entries: &[MoodEntry], period: ChartPeriod, today: NaiveDate) -> Vec<ChartPoint> {
    let points: Vec<ChartPoint> = filter_by_period(entries, period, today)
        .into_iter()
        .map(ChartPoint::from_entry)
        .collect();

    tracing::debug!(
        period = %period,
        total = entries.len(),
        plotted = points.len(),
        "Built chart points"
    );

    points
}

/// Horizontal text bar chart, one row per point
pub fn render_text(points: &[ChartPoint]) -> String {
    let mut out = String::new();
    let max = Mood::VeryHappy.value() as usize;

    for point in points {
        let filled = point.value as usize;
        let emoji = Mood::from_value(point.value)
            .map(|m| m.emoji())
            .unwrap_or(" ");

        out.push_str(&format!(
            "{:<16} {} {}{} {}",
            point.label,
            emoji,
            "█".repeat(filled),
            "·".repeat(max - filled.min(max)),
            point.value
        ));

        if let Some(note) = &point.note {
            out.push_str(&format!("  \"{}\"", note));
        }
        out.push('\n');
    }

    out
}
