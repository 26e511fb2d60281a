//! Mood variability

use serde::Serialize;
use std::fmt;

/// Standard deviation below this is low variability
pub const LOW_VARIABILITY_MAX: f64 = 0.5;

/// Standard deviation above this is high variability
pub const HIGH_VARIABILITY_MIN: f64 = 1.2;

/// How much mood swings across all entries
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VariabilityLevel {
    Low,
    Moderate,
    High,
}

impl VariabilityLevel {
    /// Classify a standard deviation
    pub fn from_std_dev(std_dev: f64) -> Self {
        if std_dev < LOW_VARIABILITY_MAX {
            VariabilityLevel::Low
        } else if std_dev > HIGH_VARIABILITY_MIN {
            VariabilityLevel::High
        } else {
            VariabilityLevel::Moderate
        }
    }

    /// Completes "suggesting ..." in the variability insight
    pub fn explanation(&self) -> &'static str {
        match self {
            VariabilityLevel::Low => "your emotions remain relatively consistent",
            VariabilityLevel::High => "you experience significant emotional ups and downs",
            VariabilityLevel::Moderate => "you have a balanced emotional pattern",
        }
    }
}

impl fmt::Display for VariabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariabilityLevel::Low => write!(f, "low"),
            VariabilityLevel::Moderate => write!(f, "moderate"),
            VariabilityLevel::High => write!(f, "high"),
        }
    }
}

/// Population standard deviation (divides by n)
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some(variance.sqrt())
}
