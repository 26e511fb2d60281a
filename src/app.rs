//! Application
//!
//! `App` owns the entry store, the insight renderer and the random source,
//! and drives a `MoodView` after every change. Presentation lives behind
//! the view trait so the same flow backs the terminal and tests.

use crate::analysis::{analyze_if_ready, distinct_dates, PatternSummary};
use crate::chart::{chart_points, ChartPeriod, ChartPoint};
use crate::config::{Config, InsightsConfig};
use crate::entry::{Mood, MoodEntry, MoodError};
use crate::export::{export, ExportError, ExportFormat};
use crate::insights::{InsightRenderer, InsightReport};
use crate::store::{EntryStore, StoreError};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone};
use rand::rngs::StdRng;
use rand::SeedableRng;
use regex::Regex;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

/// Number of entries shown in the history list
pub const HISTORY_LIMIT: usize = 7;

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("No mood selected")]
    MissingSelection,

    #[error("No mood data available for {0}")]
    EmptyDataSet(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Mood error: {0}")]
    Mood(#[from] MoodError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

pub type AppResult<T> = Result<T, AppError>;

/// Presentation surface the app renders into
pub trait MoodView {
    /// Most recent entries, newest first; empty when nothing is stored
    fn render_history(&mut self, entries: &[MoodEntry]);

    fn render_insights(&mut self, summary: &PatternSummary, report: &InsightReport);

    /// Not enough distinct days yet
    fn hide_insights(&mut self, distinct_days: usize, required: usize);

    fn render_chart(&mut self, period: ChartPeriod, points: &[ChartPoint]);
}

/// Result of asking for insights
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InsightsOutcome {
    Ready {
        summary: PatternSummary,
        report: InsightReport,
    },
    Hidden {
        distinct_days: usize,
        required: usize,
    },
}

/// Store and data overview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppStatus {
    pub backend: &'static str,
    pub degraded: bool,
    pub key: String,
    pub entries: usize,
    pub distinct_days: usize,
    pub required_days: usize,
    pub newest: Option<NaiveDate>,
    pub oldest: Option<NaiveDate>,
}

/// The mood tracker
pub struct App {
    store: EntryStore,
    renderer: InsightRenderer,
    rng: StdRng,
    min_distinct_days: usize,
}

impl App {
    /// Open the configured store and set up insight rendering
    pub fn new(config: &Config) -> Self {
        let store = EntryStore::open(
            config.storage.backend,
            &config.storage.data_path(),
            &config.storage.key,
        );
        Self::with_store(store, &config.insights)
    }

    /// Build around an already-opened store
    pub fn with_store(store: EntryStore, insights: &InsightsConfig) -> Self {
        let rng = match insights.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            store,
            renderer: InsightRenderer::new(insights.positive_threshold),
            rng,
            min_distinct_days: insights.min_distinct_days,
        }
    }

    /// Reseed the suggestion picker
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// True when storage failed its startup probe and entries are in memory
    pub fn is_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    pub fn status(&self) -> AppResult<AppStatus> {
        let entries = self.store.load_all()?;

        Ok(AppStatus {
            backend: self.store.backend_name(),
            degraded: self.store.is_degraded(),
            key: self.store.key().to_string(),
            entries: entries.len(),
            distinct_days: distinct_dates(&entries),
            required_days: self.min_distinct_days,
            newest: entries.iter().map(|e| e.date).max(),
            oldest: entries.iter().map(|e| e.date).min(),
        })
    }

    /// Record a mood now
    ///
    /// `None` means nothing was selected; no entry is written.
    pub fn log_mood(&mut self, selection: Option<Mood>, note: &str) -> AppResult<MoodEntry> {
        let mood = selection.ok_or(AppError::MissingSelection)?;
        self.log_mood_at(mood, note, &Local::now())
    }

    /// Record a mood at a given instant
    pub fn log_mood_at<Tz>(&mut self, mood: Mood, note: &str, at: &DateTime<Tz>) -> AppResult<MoodEntry>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let entry = MoodEntry::record(mood, note, at)?;
        self.store.append_and_persist(entry.clone())?;
        Ok(entry)
    }

    /// Record a mood for an earlier date, at noon local time
    pub fn add_backdated(&mut self, date: NaiveDate, mood: Mood, note: &str) -> AppResult<MoodEntry> {
        let noon = date
            .and_hms_opt(12, 0, 0)
            .ok_or_else(|| AppError::InvalidDate(date.to_string()))?;
        let at = Local
            .from_local_datetime(&noon)
            .earliest()
            .ok_or_else(|| AppError::InvalidDate(format!("{} has no local noon", date)))?;

        tracing::debug!(date = %date, mood = mood.key(), "Adding backdated entry");
        self.log_mood_at(mood, note, &at)
    }

    pub fn clear_all(&mut self) -> AppResult<()> {
        self.store.clear_all()?;
        Ok(())
    }

    /// Every entry, newest first
    pub fn entries(&self) -> AppResult<Vec<MoodEntry>> {
        Ok(self.store.load_all()?)
    }

    /// The most recent entries
    pub fn history(&self) -> AppResult<Vec<MoodEntry>> {
        let mut entries = self.store.load_all()?;
        entries.truncate(HISTORY_LIMIT);
        Ok(entries)
    }

    /// Analyze and render insights once enough distinct days exist
    pub fn insights(&mut self) -> AppResult<InsightsOutcome> {
        let entries = self.store.load_all()?;

        match analyze_if_ready(&entries, self.min_distinct_days) {
            Some(summary) => {
                let report = self.renderer.render(&summary, &mut self.rng);
                Ok(InsightsOutcome::Ready { summary, report })
            }
            None => Ok(InsightsOutcome::Hidden {
                distinct_days: distinct_dates(&entries),
                required: self.min_distinct_days,
            }),
        }
    }

    /// Chart points for the period ending `today`
    pub fn chart(&self, period: ChartPeriod, today: NaiveDate) -> AppResult<Vec<ChartPoint>> {
        let entries = self.store.load_all()?;
        if entries.is_empty() {
            return Err(AppError::EmptyDataSet("chart".to_string()));
        }
        Ok(chart_points(&entries, period, today))
    }

    /// Export every entry
    pub fn export(&self, format: ExportFormat) -> AppResult<String> {
        let entries = self.store.load_all()?;
        if entries.is_empty() {
            return Err(AppError::EmptyDataSet("export".to_string()));
        }
        Ok(export(&entries, format)?)
    }

    /// Re-render history, insights and chart; backs the `dashboard` command
    pub fn refresh(&mut self, view: &mut dyn MoodView, period: ChartPeriod, today: NaiveDate) -> AppResult<()> {
        view.render_history(&self.history()?);

        match self.insights()? {
            InsightsOutcome::Ready { summary, report } => view.render_insights(&summary, &report),
            InsightsOutcome::Hidden {
                distinct_days,
                required,
            } => view.hide_insights(distinct_days, required),
        }

        match self.chart(period, today) {
            Ok(points) => view.render_chart(period, &points),
            Err(AppError::EmptyDataSet(_)) => {}
            Err(e) => return Err(e),
        }

        Ok(())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store)
            .field("min_distinct_days", &self.min_distinct_days)
            .finish()
    }
}

/// Parse a user-supplied entry date
///
/// Accepts `YYYY-MM-DD`, `today`, `yesterday`, and relative forms such as
/// `today-3` or `now-3d`.
pub fn parse_entry_date(s: &str, today: NaiveDate) -> AppResult<NaiveDate> {
    let s = s.trim().to_lowercase();

    match s.as_str() {
        "today" | "now" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    let re = Regex::new(r"^(?:today|now)-(\d+)d?$")
        .map_err(|e| AppError::InvalidDate(e.to_string()))?;

    if let Some(caps) = re.captures(&s) {
        let days: i64 = caps[1]
            .parse()
            .map_err(|_| AppError::InvalidDate(s.clone()))?;
        return Duration::try_days(days)
            .and_then(|offset| today.checked_sub_signed(offset))
            .ok_or_else(|| AppError::InvalidDate(s.clone()));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::TrendDirection;
    use crate::insights::SuggestionKind;
    use chrono::Utc;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingView {
        history: Vec<Vec<MoodEntry>>,
        insights: Vec<(PatternSummary, InsightReport)>,
        hidden: Vec<(usize, usize)>,
        charts: Vec<(ChartPeriod, Vec<ChartPoint>)>,
    }

    impl MoodView for RecordingView {
        fn render_history(&mut self, entries: &[MoodEntry]) {
            self.history.push(entries.to_vec());
        }

        fn render_insights(&mut self, summary: &PatternSummary, report: &InsightReport) {
            self.insights.push((summary.clone(), report.clone()));
        }

        fn hide_insights(&mut self, distinct_days: usize, required: usize) {
            self.hidden.push((distinct_days, required));
        }

        fn render_chart(&mut self, period: ChartPeriod, points: &[ChartPoint]) {
            self.charts.push((period, points.to_vec()));
        }
    }

    fn seeded_app() -> App {
        let insights = InsightsConfig {
            seed: Some(42),
            ..InsightsConfig::default()
        };
        App::with_store(EntryStore::in_memory(), &insights)
    }

    fn log_on(app: &mut App, day: u32, mood: Mood) -> MoodEntry {
        let at = Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap();
        app.log_mood_at(mood, "", &at).unwrap()
    }

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    #[test]
    fn test_missing_selection_writes_nothing() {
        let mut app = seeded_app();

        assert!(matches!(
            app.log_mood(None, "hello"),
            Err(AppError::MissingSelection)
        ));
        assert!(app.entries().unwrap().is_empty());
    }

    #[test]
    fn test_log_mood_now() {
        let mut app = seeded_app();
        let entry = app.log_mood(Some(Mood::Happy), "  lunch with friends ").unwrap();

        assert_eq!(entry.note, "lunch with friends");
        assert_eq!(app.entries().unwrap(), vec![entry]);
    }

    #[test]
    fn test_note_too_long_rejected() {
        let mut app = seeded_app();
        let note = "x".repeat(201);

        assert!(matches!(
            app.log_mood(Some(Mood::Sad), &note),
            Err(AppError::Mood(MoodError::NoteTooLong { .. }))
        ));
        assert!(app.entries().unwrap().is_empty());
    }

    #[test]
    fn test_insights_hidden_until_three_days() {
        let mut app = seeded_app();
        log_on(&mut app, 15, Mood::VeryHappy);
        log_on(&mut app, 15, Mood::Happy);
        log_on(&mut app, 16, Mood::VeryHappy);

        assert_eq!(
            app.insights().unwrap(),
            InsightsOutcome::Hidden {
                distinct_days: 2,
                required: 3
            }
        );

        log_on(&mut app, 17, Mood::VerySad);
        match app.insights().unwrap() {
            InsightsOutcome::Ready { summary, report } => {
                assert_eq!(summary.highest_day_name(), Some("Tuesday"));
                assert_eq!(summary.lowest_day_name(), Some("Wednesday"));
                assert_eq!(summary.trend_direction, TrendDirection::Stable);
                assert_eq!(report.suggestions[0].kind, SuggestionKind::LowestDay);
            }
            other => panic!("expected insights, got {:?}", other),
        }
    }

    #[test]
    fn test_seeded_apps_agree() {
        let mut first = seeded_app();
        let mut second = seeded_app();
        for app in [&mut first, &mut second] {
            log_on(app, 15, Mood::VeryHappy);
            log_on(app, 16, Mood::Happy);
            log_on(app, 17, Mood::VeryHappy);
        }

        assert_eq!(first.insights().unwrap(), second.insights().unwrap());
    }

    #[test]
    fn test_empty_chart_and_export() {
        let app = seeded_app();

        assert!(matches!(
            app.chart(ChartPeriod::Week, jan(20)),
            Err(AppError::EmptyDataSet(_))
        ));
        assert!(matches!(
            app.export(ExportFormat::Csv),
            Err(AppError::EmptyDataSet(_))
        ));
    }

    #[test]
    fn test_export_after_logging() {
        let mut app = seeded_app();
        log_on(&mut app, 15, Mood::Neutral);

        let csv = app.export(ExportFormat::Csv).unwrap();
        assert!(csv.starts_with("Date,Time,Mood,Mood Value,Note\n15/01/2024,09:00:00,Neutral,5,"));
    }

    #[test]
    fn test_history_limited_to_seven() {
        let mut app = seeded_app();
        for day in 10..20 {
            log_on(&mut app, day, Mood::Neutral);
        }

        let history = app.history().unwrap();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].date, jan(19));
        assert_eq!(history[6].date, jan(13));
    }

    #[test]
    fn test_refresh_drives_view() {
        let mut app = seeded_app();
        let mut view = RecordingView::default();

        app.refresh(&mut view, ChartPeriod::Week, jan(20)).unwrap();
        assert_eq!(view.history, vec![Vec::<MoodEntry>::new()]);
        assert_eq!(view.hidden, vec![(0, 3)]);
        assert!(view.charts.is_empty());

        for day in [15, 16, 17] {
            log_on(&mut app, day, Mood::Happy);
        }
        app.refresh(&mut view, ChartPeriod::Week, jan(20)).unwrap();

        assert_eq!(view.history[1].len(), 3);
        assert_eq!(view.insights.len(), 1);
        assert_eq!(view.charts.len(), 1);
        assert_eq!(view.charts[0].1.len(), 3);
    }

    #[test]
    fn test_backdated_entry() {
        let mut app = seeded_app();
        let entry = app.add_backdated(jan(14), Mood::Sad, "test data").unwrap();

        assert_eq!(entry.date, jan(14));
        assert_eq!(entry.exact_time, "12:00:00");
        assert_eq!(entry.weekday, 0);
    }

    #[test]
    fn test_clear_and_status() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.storage.data_dir = dir.path().to_string_lossy().to_string();
        config.insights.seed = Some(1);

        let mut app = App::new(&config);
        assert!(!app.is_degraded());
        log_on(&mut app, 15, Mood::Happy);
        log_on(&mut app, 17, Mood::Sad);

        let status = app.status().unwrap();
        assert_eq!(status.backend, "file");
        assert_eq!(status.entries, 2);
        assert_eq!(status.distinct_days, 2);
        assert_eq!(status.newest, Some(jan(17)));
        assert_eq!(status.oldest, Some(jan(15)));

        app.clear_all().unwrap();
        assert_eq!(App::new(&config).status().unwrap().entries, 0);
    }

    #[test]
    fn test_parse_entry_date() {
        let today = jan(20);

        assert_eq!(parse_entry_date("2024-01-05", today).unwrap(), jan(5));
        assert_eq!(parse_entry_date("today", today).unwrap(), today);
        assert_eq!(parse_entry_date("Yesterday", today).unwrap(), jan(19));
        assert_eq!(parse_entry_date("today-3", today).unwrap(), jan(17));
        assert_eq!(parse_entry_date("now-10d", today).unwrap(), jan(10));
        assert!(matches!(
            parse_entry_date("last tuesday", today),
            Err(AppError::InvalidDate(_))
        ));
        assert!(parse_entry_date("2024-02-30", today).is_err());

        // Offsets past chrono's range are rejected, not panicked on
        assert!(matches!(
            parse_entry_date("today-200000000000000", today),
            Err(AppError::InvalidDate(_))
        ));
        assert!(matches!(
            parse_entry_date("now-99999999d", today),
            Err(AppError::InvalidDate(_))
        ));
    }
}
