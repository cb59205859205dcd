//! Missing-value resolution: impute per column or drop incomplete rows.

use tracing::debug;

use super::Stage;
use crate::error::Result;
use crate::model::{ColumnData, Table};
use crate::params::{CleaningParameters, MissingStrategy};
use crate::report::{StageKind, StageReport};
use crate::stats::{self, NumericSummary, Shape, SkewClassifier};

/// Fills or drops missing cells according to the run's strategy.
///
/// Under imputation, numeric columns are filled with the mean when their
/// distribution is symmetric and with the median otherwise. Text columns are
/// filled with their mode. Other column types are left alone.
pub struct MissingResolver {
    classifier: SkewClassifier,
}

impl MissingResolver {
    pub fn new(classifier: SkewClassifier) -> Self {
        Self { classifier }
    }

    fn drop_rows(&self, table: &mut Table) -> usize {
        let keep: Vec<bool> = (0..table.row_count())
            .map(|row| !table.row_has_missing(row))
            .collect();
        table.retain_rows(&keep)
    }

    fn impute(&self, table: &mut Table, report: &mut StageReport) {
        for column in table.columns_mut() {
            let name = column.name.clone();
            match &mut column.data {
                ColumnData::Numeric(values) => {
                    let missing = values.iter().filter(|v| v.is_none()).count();
                    if missing == 0 {
                        continue;
                    }
                    let present: Vec<f64> = values.iter().flatten().copied().collect();
                    let Some(summary) = NumericSummary::from_values(&present) else {
                        report.note(format!("'{}': no values to impute from", name));
                        continue;
                    };

                    let shape = self.classifier.classify(summary.skewness);
                    let fill = match shape {
                        Shape::Symmetric => summary.mean,
                        Shape::Skewed => summary.median,
                    };
                    debug!(column = %name, skewness = ?summary.skewness, ?shape, fill, "imputing numeric column");

                    for cell in values.iter_mut().filter(|v| v.is_none()) {
                        *cell = Some(fill);
                    }
                    report.cells_changed += missing;
                    let method = if shape == Shape::Symmetric { "mean" } else { "median" };
                    report.note(format!("'{}': filled {} with {} {}", name, missing, method, fill));
                }
                ColumnData::Text(values) => {
                    let missing = values.iter().filter(|v| v.is_none()).count();
                    if missing == 0 {
                        continue;
                    }
                    let Some(fill) = stats::mode(values.iter().flatten().map(String::as_str))
                        .map(str::to_string)
                    else {
                        report.note(format!("'{}': all values missing, left unchanged", name));
                        continue;
                    };
                    debug!(column = %name, fill = %fill, "imputing text column with mode");

                    for cell in values.iter_mut().filter(|v| v.is_none()) {
                        *cell = Some(fill.clone());
                    }
                    report.cells_changed += missing;
                    report.note(format!("'{}': filled {} with mode '{}'", name, missing, fill));
                }
                ColumnData::Categorical(_) | ColumnData::Date(_) => {}
            }
        }
    }
}

impl Default for MissingResolver {
    fn default() -> Self {
        Self::new(SkewClassifier::default())
    }
}

impl Stage for MissingResolver {
    fn kind(&self) -> StageKind {
        StageKind::ResolveMissing
    }

    fn apply(
        &self,
        mut table: Table,
        params: &CleaningParameters,
        report: &mut StageReport,
    ) -> Result<Table> {
        match params.missing_strategy {
            MissingStrategy::Drop => {
                let removed = self.drop_rows(&mut table);
                debug!(removed, "dropped rows with missing cells");
            }
            MissingStrategy::Impute => self.impute(&mut table, report),
        }
        Ok(table)
    }
}
