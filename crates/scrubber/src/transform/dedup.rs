//! Exact duplicate row removal.

use tracing::debug;

use super::Stage;
use crate::error::Result;
use crate::model::Table;
use crate::params::CleaningParameters;
use crate::report::{StageKind, StageReport};

/// Removes rows identical to an earlier row across all columns. Missing
/// cells compare equal to each other.
pub struct Deduplicator;

impl Stage for Deduplicator {
    fn kind(&self) -> StageKind {
        StageKind::Deduplicate
    }

    fn apply(
        &self,
        mut table: Table,
        _params: &CleaningParameters,
        _report: &mut StageReport,
    ) -> Result<Table> {
        let keep = table.first_occurrence_mask();
        let removed = table.retain_rows(&keep);
        debug!(removed, "duplicate rows removed");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, Column};

    #[test]
    fn test_keeps_first_occurrence_in_order() {
        let table = Table::new(vec![
            Column::numeric("a", vec![Some(3.0), Some(1.0), Some(3.0), None, None]),
            Column::text(
                "b",
                vec![
                    Some("x".into()),
                    Some("y".into()),
                    Some("x".into()),
                    None,
                    None,
                ],
            ),
        ])
        .unwrap();

        let mut report = StageReport::new(StageKind::Deduplicate, 5);
        let table = Deduplicator
            .apply(table, &CleaningParameters::default(), &mut report)
            .unwrap();

        assert_eq!(table.row_count(), 3);
        let a = table.column("a").unwrap();
        assert_eq!(a.cell(0), Cell::Number(3.0));
        assert_eq!(a.cell(1), Cell::Number(1.0));
        assert!(a.cell(2).is_missing());
    }

    #[test]
    fn test_partial_match_is_not_duplicate() {
        let table = Table::new(vec![
            Column::numeric("a", vec![Some(1.0), Some(1.0)]),
            Column::numeric("b", vec![Some(2.0), None]),
        ])
        .unwrap();

        let mut report = StageReport::new(StageKind::Deduplicate, 2);
        let table = Deduplicator
            .apply(table, &CleaningParameters::default(), &mut report)
            .unwrap();
        assert_eq!(table.row_count(), 2);
    }
}
