//! Skewness gate shared by imputation and outlier replacement.

use serde::{Deserialize, Serialize};

/// Shape of a numeric distribution as seen by the cleaning rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// `|skewness| < threshold`: mean/std are trustworthy.
    Symmetric,
    /// Skewed, or skewness undefined: use order statistics.
    Skewed,
}

/// Classifies a column by the magnitude of its skewness.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkewClassifier {
    /// Strict upper bound on `|skewness|` for a symmetric column.
    pub threshold: f64,
}

impl SkewClassifier {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Classify a skewness value. Undefined skewness is treated as skewed.
    pub fn classify(&self, skewness: Option<f64>) -> Shape {
        match skewness {
            Some(s) if s > -self.threshold && s < self.threshold => Shape::Symmetric,
            _ => Shape::Skewed,
        }
    }
}

impl Default for SkewClassifier {
    fn default() -> Self {
        Self { threshold: 1.0 }
    }
}
