//! The owned table that flows through the pipeline.

use std::collections::HashSet;

use crate::error::{Result, ScrubError};

use super::column::Column;
use super::types::{CellKey, ColumnType};

/// An ordered sequence of equal-length named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create a table, checking that all columns have the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            if let Some(bad) = columns.iter().find(|c| c.len() != expected) {
                return Err(ScrubError::InvalidTable(format!(
                    "column '{}' has {} cells, expected {}",
                    bad.name,
                    bad.len(),
                    expected
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub(crate) fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Get the position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a mutable column by name.
    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Column names paired with their type tags.
    pub fn schema(&self) -> Vec<(&str, ColumnType)> {
        self.columns
            .iter()
            .map(|c| (c.name.as_str(), c.column_type()))
            .collect()
    }

    /// Hashable identity of a whole row.
    pub fn row_key(&self, row: usize) -> Vec<CellKey<'_>> {
        self.columns.iter().map(|c| c.cell(row).key()).collect()
    }

    /// True if any cell in the row is missing.
    pub fn row_has_missing(&self, row: usize) -> bool {
        self.columns.iter().any(|c| c.cell(row).is_missing())
    }

    /// Mask marking the first occurrence of every distinct row.
    pub fn first_occurrence_mask(&self) -> Vec<bool> {
        let mut seen = HashSet::with_capacity(self.row_count());
        (0..self.row_count())
            .map(|row| seen.insert(self.row_key(row)))
            .collect()
    }

    /// Keep only rows whose mask entry is `true`. Returns the number removed.
    pub fn retain_rows(&mut self, keep: &[bool]) -> usize {
        let before = self.row_count();
        for column in &mut self.columns {
            column.retain_rows(keep);
        }
        before - self.row_count()
    }
}
