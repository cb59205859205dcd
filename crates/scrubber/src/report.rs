//! Per-stage audit trail and soft warnings for a pipeline run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    Normalize,
    Deduplicate,
    ResolveMissing,
    Categorize,
    Outliers,
    CoerceDates,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageKind::Normalize => "normalize",
            StageKind::Deduplicate => "deduplicate",
            StageKind::ResolveMissing => "resolve_missing",
            StageKind::Categorize => "categorize",
            StageKind::Outliers => "outliers",
            StageKind::CoerceDates => "coerce_dates",
        };
        write!(f, "{}", name)
    }
}

/// A non-fatal condition raised while cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CleaningWarning {
    /// No date columns were requested, so date coercion did not run.
    DateConversionSkipped,
    /// Cells in a date column that could not be parsed and became missing.
    DateParseFailures { column: String, count: usize },
}

impl fmt::Display for CleaningWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleaningWarning::DateConversionSkipped => {
                write!(f, "No date columns specified. Skipping date conversion.")
            }
            CleaningWarning::DateParseFailures { column, count } => {
                write!(f, "{} value(s) in '{}' could not be parsed as dates", count, column)
            }
        }
    }
}

/// What a single stage did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: StageKind,
    pub rows_before: usize,
    pub rows_after: usize,
    /// Names of columns the stage dropped.
    pub columns_removed: Vec<String>,
    /// Cells whose value or type changed in place.
    pub cells_changed: usize,
    /// Per-column decisions, in processing order.
    pub notes: Vec<String>,
    pub warnings: Vec<CleaningWarning>,
}

impl StageReport {
    pub fn new(stage: StageKind, rows_before: usize) -> Self {
        Self {
            stage,
            rows_before,
            rows_after: rows_before,
            columns_removed: Vec::new(),
            cells_changed: 0,
            notes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Rows removed by this stage.
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn warn(&mut self, warning: CleaningWarning) {
        tracing::warn!(stage = %self.stage, "{}", warning);
        self.warnings.push(warning);
    }
}

/// Audit trail for a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub stages: Vec<StageReport>,
}

impl CleaningReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: StageReport) {
        self.stages.push(stage);
    }

    /// Report for a given stage, if it ran.
    pub fn stage(&self, kind: StageKind) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == kind)
    }

    /// All warnings, in the order they were raised.
    pub fn warnings(&self) -> Vec<&CleaningWarning> {
        self.stages.iter().flat_map(|s| s.warnings.iter()).collect()
    }

    pub fn has_warnings(&self) -> bool {
        self.stages.iter().any(|s| !s.warnings.is_empty())
    }

    /// Total rows removed across all stages.
    pub fn rows_removed(&self) -> usize {
        self.stages.iter().map(StageReport::rows_removed).sum()
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
