//! Numeric outlier removal and replacement.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Stage;
use crate::error::Result;
use crate::model::{ColumnData, Table};
use crate::params::{CleaningParameters, OutlierAction};
use crate::report::{StageKind, StageReport};
use crate::stats::{NumericSummary, Shape, SkewClassifier};

/// Thresholds for outlier detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlierConfig {
    /// IQR multiplier for the fences.
    pub iqr_multiplier: f64,
    /// Z-score magnitude above which a value is an outlier.
    pub z_threshold: f64,
}

impl Default for OutlierConfig {
    fn default() -> Self {
        Self {
            iqr_multiplier: 1.5,
            z_threshold: 3.0,
        }
    }
}

/// Detects outliers in numeric columns and removes or replaces them.
pub struct OutlierEngine {
    config: OutlierConfig,
    classifier: SkewClassifier,
}

impl OutlierEngine {
    pub fn new(config: OutlierConfig, classifier: SkewClassifier) -> Self {
        Self { config, classifier }
    }

    /// Drop rows outside each numeric column's IQR fences.
    ///
    /// Columns are processed in order and each one's fences are computed on
    /// the rows that survived the previous columns. Missing cells are never
    /// outside the fences.
    fn remove(&self, table: &mut Table, report: &mut StageReport) {
        let numeric: Vec<usize> = table
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, c)| c.column_type().is_numeric())
            .map(|(i, _)| i)
            .collect();

        for index in numeric {
            let column = &table.columns()[index];
            let ColumnData::Numeric(values) = &column.data else {
                continue;
            };
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            let Some(summary) = NumericSummary::from_values(&present) else {
                continue;
            };

            let (lower, upper) = summary.iqr_bounds(self.config.iqr_multiplier);
            let keep: Vec<bool> = values
                .iter()
                .map(|v| v.is_none_or(|x| x >= lower && x <= upper))
                .collect();
            let name = column.name.clone();

            let removed = table.retain_rows(&keep);
            debug!(column = %name, lower, upper, removed, "applied IQR fences");
            if removed > 0 {
                report.note(format!(
                    "'{}': removed {} row(s) outside [{}, {}]",
                    name, removed, lower, upper
                ));
            }
        }
    }

    /// Overwrite outliers in place: z-score and mean for symmetric columns,
    /// IQR fences and median for skewed ones.
    fn replace(&self, table: &mut Table, report: &mut StageReport) {
        for column in table.columns_mut() {
            let ColumnData::Numeric(values) = &mut column.data else {
                continue;
            };
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            let Some(summary) = NumericSummary::from_values(&present) else {
                continue;
            };

            let shape = self.classifier.classify(summary.skewness);
            let (fill, method) = match shape {
                Shape::Symmetric => (summary.mean, "z-score"),
                Shape::Skewed => (summary.median, "iqr"),
            };
            let is_outlier = |x: f64| match shape {
                Shape::Symmetric => summary
                    .z_score(x)
                    .is_some_and(|z| z.abs() > self.config.z_threshold),
                Shape::Skewed => summary.is_outlier_iqr(x, self.config.iqr_multiplier),
            };

            let mut replaced = 0;
            for cell in values.iter_mut().flatten() {
                if is_outlier(*cell) {
                    *cell = fill;
                    replaced += 1;
                }
            }

            debug!(column = %column.name, skewness = ?summary.skewness, method, replaced, "replaced outliers");
            if replaced > 0 {
                report.cells_changed += replaced;
                report.note(format!(
                    "'{}': replaced {} outlier(s) by {} with {}",
                    column.name, replaced, method, fill
                ));
            }
        }
    }
}

impl Default for OutlierEngine {
    fn default() -> Self {
        Self::new(OutlierConfig::default(), SkewClassifier::default())
    }
}

impl Stage for OutlierEngine {
    fn kind(&self) -> StageKind {
        StageKind::Outliers
    }

    fn apply(
        &self,
        mut table: Table,
        params: &CleaningParameters,
        report: &mut StageReport,
    ) -> Result<Table> {
        match params.outlier_action {
            OutlierAction::Keep => {}
            OutlierAction::Remove => self.remove(&mut table, report),
            OutlierAction::Replace => self.replace(&mut table, report),
        }
        Ok(table)
    }
}
