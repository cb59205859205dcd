//! Per-run cleaning parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How missing cells are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingStrategy {
    /// Fill each column from its own statistics.
    #[default]
    Impute,
    /// Remove every row that has a missing cell.
    Drop,
}

impl FromStr for MissingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "impute" => Ok(MissingStrategy::Impute),
            "drop" => Ok(MissingStrategy::Drop),
            _ => Err(format!("Unknown missing-value strategy: {}. Use 'impute' or 'drop'", s)),
        }
    }
}

impl fmt::Display for MissingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingStrategy::Impute => write!(f, "impute"),
            MissingStrategy::Drop => write!(f, "drop"),
        }
    }
}

/// What the outlier engine does with flagged numeric cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutlierAction {
    /// Drop rows outside the IQR fences, one column at a time.
    #[default]
    Remove,
    /// Overwrite flagged cells with the mean or median.
    Replace,
    /// Leave outliers untouched.
    Keep,
}

impl FromStr for OutlierAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remove" => Ok(OutlierAction::Remove),
            "replace" => Ok(OutlierAction::Replace),
            "keep" => Ok(OutlierAction::Keep),
            _ => Err(format!(
                "Unknown outlier action: {}. Use 'remove', 'replace', or 'keep'",
                s
            )),
        }
    }
}

impl fmt::Display for OutlierAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlierAction::Remove => write!(f, "remove"),
            OutlierAction::Replace => write!(f, "replace"),
            OutlierAction::Keep => write!(f, "keep"),
        }
    }
}

/// Caller-chosen options for one pipeline run.
///
/// The pipeline only ever borrows this.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningParameters {
    pub missing_strategy: MissingStrategy,
    pub outlier_action: OutlierAction,
    /// Columns to coerce to dates, by normalized name. `None` or an empty
    /// list skips date coercion with a warning.
    pub date_columns: Option<Vec<String>>,
}

impl CleaningParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_missing_strategy(mut self, strategy: MissingStrategy) -> Self {
        self.missing_strategy = strategy;
        self
    }

    pub fn with_outlier_action(mut self, action: OutlierAction) -> Self {
        self.outlier_action = action;
        self
    }

    /// Set the date columns to coerce.
    pub fn with_date_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Load parameters from JSON. Absent fields take their defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
