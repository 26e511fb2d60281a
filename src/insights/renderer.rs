//! Insight and suggestion rendering
//!
//! Rule-based, in a fixed order: weekday highs and lows, trend, variability
//! for insights; lowest day, decline, high variability, positive mood and a
//! general tip for suggestions.

use crate::analysis::{PatternSummary, TrendDirection, VariabilityLevel};
use crate::insights::templates::{
    lowest_day_suggestion, BROADEN_BUILD_NOTE, BROADEN_BUILD_SUGGESTIONS,
    DECLINING_SUGGESTION, GENERAL_SUGGESTIONS, HIGH_VARIABILITY_SUGGESTION,
};
use rand::Rng;
use serde::Serialize;

/// Default overall average above which positive-mood suggestions appear
pub const DEFAULT_POSITIVE_THRESHOLD: f64 = 4.5;

/// Why a suggestion was made
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    LowestDay,
    Declining,
    HighVariability,
    BroadenBuild,
    General,
}

/// One suggestion line
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub text: String,
}

impl Suggestion {
    fn new(kind: SuggestionKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Rendered insights and suggestions
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InsightReport {
    /// Insight lines, in display order
    pub insights: Vec<String>,
    /// Broaden & Build explanation, present when mood is positive
    pub theory_note: Option<String>,
    /// Suggestions, in display order
    pub suggestions: Vec<Suggestion>,
}

/// Builds insight text from a pattern summary
#[derive(Debug, Clone)]
pub struct InsightRenderer {
    positive_threshold: f64,
}

impl Default for InsightRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_POSITIVE_THRESHOLD)
    }
}

impl InsightRenderer {
    pub fn new(positive_threshold: f64) -> Self {
        Self { positive_threshold }
    }

    pub fn positive_threshold(&self) -> f64 {
        self.positive_threshold
    }

    /// Whether the displayed overall average counts as positive
    pub fn is_positive(&self, summary: &PatternSummary) -> bool {
        summary.rounded_overall_average() > self.positive_threshold
    }

    /// Insight lines for a summary
    pub fn insights(&self, summary: &PatternSummary) -> Vec<String> {
        let mut lines = Vec::new();

        if let (Some(day), Some(label)) = (summary.highest_day_name(), summary.highest_label()) {
            lines.push(format!(
                "Your mood tends to be highest on {}s ({}).",
                day, label
            ));
        }

        if let (Some(day), Some(label)) = (summary.lowest_day_name(), summary.lowest_label()) {
            lines.push(format!(
                "Your mood tends to be lowest on {}s ({}).",
                day, label
            ));
        }

        if summary.trend_direction != TrendDirection::Stable {
            lines.push(format!(
                "Your mood has been {} over the past week.",
                summary.trend_direction
            ));
        }

        lines.push(format!(
            "Your mood shows {} variability, suggesting {}.",
            summary.variability_level,
            summary.variability_level.explanation()
        ));

        lines
    }

    /// Suggestions for a summary, drawing template choices from `rng`
    pub fn suggestions<R: Rng + ?Sized>(
        &self,
        summary: &PatternSummary,
        rng: &mut R,
    ) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        if let Some(day) = summary.lowest_day_name() {
            suggestions.push(Suggestion::new(
                SuggestionKind::LowestDay,
                lowest_day_suggestion(day),
            ));
        }

        if summary.trend_direction == TrendDirection::Declining {
            suggestions.push(Suggestion::new(
                SuggestionKind::Declining,
                DECLINING_SUGGESTION,
            ));
        }

        if summary.variability_level == VariabilityLevel::High {
            suggestions.push(Suggestion::new(
                SuggestionKind::HighVariability,
                HIGH_VARIABILITY_SUGGESTION,
            ));
        }

        if self.is_positive(summary) {
            let pick = BROADEN_BUILD_SUGGESTIONS[rng.random_range(0..BROADEN_BUILD_SUGGESTIONS.len())];
            suggestions.push(Suggestion::new(SuggestionKind::BroadenBuild, pick));
        } else {
            tracing::debug!(
                overall_average = summary.rounded_overall_average(),
                threshold = self.positive_threshold,
                "Skipping Broaden & Build suggestion"
            );
        }

        let pick = GENERAL_SUGGESTIONS[rng.random_range(0..GENERAL_SUGGESTIONS.len())];
        suggestions.push(Suggestion::new(SuggestionKind::General, pick));

        suggestions
    }

    /// Full report: insights, theory note and suggestions
    pub fn render<R: Rng + ?Sized>(&self, summary: &PatternSummary, rng: &mut R) -> InsightReport {
        InsightReport {
            insights: self.insights(summary),
            theory_note: self
                .is_positive(summary)
                .then(|| BROADEN_BUILD_NOTE.to_string()),
            suggestions: self.suggestions(summary, rng),
        }
    }
}
