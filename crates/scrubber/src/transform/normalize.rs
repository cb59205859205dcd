//! Column name canonicalization.

use std::collections::HashSet;

use tracing::debug;

use super::Stage;
use crate::error::Result;
use crate::model::Table;
use crate::params::CleaningParameters;
use crate::report::{StageKind, StageReport};

/// Trimmed, lowercased, spaces replaced by underscores.
pub fn canonical_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Renames columns to their canonical form and drops later columns whose
/// canonical name collides with an earlier one.
pub struct Normalizer;

impl Stage for Normalizer {
    fn kind(&self) -> StageKind {
        StageKind::Normalize
    }

    fn apply(
        &self,
        table: Table,
        _params: &CleaningParameters,
        report: &mut StageReport,
    ) -> Result<Table> {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(table.column_count());

        for mut column in table.into_columns() {
            let canonical = canonical_name(&column.name);
            if !seen.insert(canonical.clone()) {
                debug!(column = %column.name, canonical = %canonical, "dropping duplicate column");
                report.columns_removed.push(column.name);
                continue;
            }
            if canonical != column.name {
                report.note(format!("renamed '{}' to '{}'", column.name, canonical));
                column.name = canonical;
            }
            kept.push(column);
        }

        Table::new(kept)
    }
}
