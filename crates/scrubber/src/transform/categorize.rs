//! Text to categorical conversion.

use tracing::debug;

use super::Stage;
use crate::error::Result;
use crate::model::{Categorical, ColumnData, Table};
use crate::params::CleaningParameters;
use crate::report::{StageKind, StageReport};

/// Dictionary-encodes every text column.
pub struct Categorizer;

impl Stage for Categorizer {
    fn kind(&self) -> StageKind {
        StageKind::Categorize
    }

    fn apply(
        &self,
        mut table: Table,
        _params: &CleaningParameters,
        report: &mut StageReport,
    ) -> Result<Table> {
        for column in table.columns_mut() {
            if let ColumnData::Text(values) = &mut column.data {
                let categorical = Categorical::from_values(std::mem::take(values));
                debug!(
                    column = %column.name,
                    categories = categorical.categories().len(),
                    "converted to categorical"
                );
                report.cells_changed += categorical.len();
                report.note(format!(
                    "'{}': {} categories",
                    column.name,
                    categorical.categories().len()
                ));
                column.data = ColumnData::Categorical(categorical);
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Column, ColumnType};

    #[test]
    fn test_only_text_columns_convert() {
        let table = Table::new(vec![
            Column::numeric("n", vec![Some(1.0), Some(2.0)]),
            Column::text("t", vec![Some("b".into()), Some("a".into())]),
        ])
        .unwrap();

        let mut report = StageReport::new(StageKind::Categorize, 2);
        let table = Categorizer
            .apply(table, &CleaningParameters::default(), &mut report)
            .unwrap();

        assert_eq!(table.column("n").unwrap().column_type(), ColumnType::Numeric);
        let t = table.column("t").unwrap();
        assert_eq!(t.column_type(), ColumnType::Categorical);
        assert_eq!(t.cell(0), Cell::Text("b"));
        assert_eq!(t.cell(1), Cell::Text("a"));
        assert_eq!(report.cells_changed, 2);
    }

    #[test]
    fn test_missing_survives_encoding() {
        let table = Table::new(vec![Column::text("t", vec![None, Some("a".into())])]).unwrap();
        let mut report = StageReport::new(StageKind::Categorize, 2);
        let table = Categorizer
            .apply(table, &CleaningParameters::default(), &mut report)
            .unwrap();
        assert!(table.columns()[0].cell(0).is_missing());
    }
}
