//! Insight Renderer
//!
//! Turns a `PatternSummary` into display text:
//!
//! - **renderer**: Insight lines and suggestions, rule-based
//! - **templates**: The fixed suggestion texts
//!
//! Rendering is deterministic except for picking one template from the
//! positive-mood and general pools. The random source is passed in, so a
//! seeded `StdRng` reproduces the same report.

mod renderer;
pub mod templates;

pub use renderer::{
    InsightRenderer, InsightReport, Suggestion, SuggestionKind, DEFAULT_POSITIVE_THRESHOLD,
};
