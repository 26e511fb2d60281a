//! Pattern Analyzer
//!
//! Derives a `PatternSummary` from the full list of mood entries:
//!
//! - **weekday**: Mean mood per weekday, best and worst day
//! - **trend**: Least-squares slope over the most recent distinct days
//! - **variability**: Population standard deviation of every mood value
//! - **summary**: `analyze`, the summary type and the average classifier
//! - **gate**: The distinct-day threshold insights wait for
//!
//! Everything here is pure and deterministic. Random suggestion selection
//! lives on top of the summary in the `insights` module.

pub mod gate;
pub mod summary;
pub mod trend;
pub mod variability;
pub mod weekday;

pub use gate::{analyze_if_ready, distinct_dates, insights_ready, MIN_DISTINCT_DAYS};
pub use summary::{analyze, classify_average, round_to_tenth, PatternSummary};
pub use trend::{
    estimate_trend, latest_per_day, linear_slope, Trend, TrendDirection, MIN_TREND_DAYS,
    TREND_SLOPE_THRESHOLD, TREND_WINDOW_DAYS,
};
pub use variability::{population_std_dev, VariabilityLevel};
pub use weekday::{weekday_averages, WeekdayAverages};
