//! Typed column storage.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDateTime;

use super::types::{Cell, ColumnType};

/// Dictionary-encoded text values.
///
/// Categories are kept sorted; each cell stores an index into them.
#[derive(Debug, Clone, PartialEq)]
pub struct Categorical {
    categories: Vec<String>,
    codes: Vec<Option<u32>>,
}

impl Categorical {
    /// Encode a vector of text cells.
    pub fn from_values(values: Vec<Option<String>>) -> Self {
        let categories: Vec<String> = values
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let lookup: HashMap<&str, u32> = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i as u32))
            .collect();

        let codes = values
            .iter()
            .map(|v| v.as_deref().and_then(|s| lookup.get(s).copied()))
            .collect();

        Self { categories, codes }
    }

    /// The sorted value domain.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Per-row category codes.
    pub fn codes(&self) -> &[Option<u32>] {
        &self.codes
    }

    /// Value of a row, if present.
    pub fn get(&self, row: usize) -> Option<&str> {
        self.codes
            .get(row)
            .copied()
            .flatten()
            .and_then(|code| self.categories.get(code as usize))
            .map(String::as_str)
    }

    /// Decode back into plain text cells.
    pub fn to_values(&self) -> Vec<Option<String>> {
        (0..self.codes.len())
            .map(|row| self.get(row).map(str::to_string))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Cell storage for a column, one variant per [`ColumnType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Categorical(Categorical),
    Date(Vec<Option<NaiveDateTime>>),
}

/// A named, typed vector of cells.
///
/// Row-changing operations go through [`Table`](crate::Table) so every
/// column keeps the same length:
///
/// ```compile_fail
/// use scrubber::Column;
///
/// let mut column = Column::numeric("x", vec![Some(1.0), Some(2.0)]);
/// column.retain_rows(&[true, false]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Cell values. Stages replace these only with data of the same length.
    pub(crate) data: ColumnData,
}

impl Column {
    /// Create a numeric column.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    /// Create a text column.
    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    /// Create a date column.
    pub fn date(name: impl Into<String>, values: Vec<Option<NaiveDateTime>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Date(values),
        }
    }

    /// Borrow the typed cell storage.
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// The column's type tag.
    pub fn column_type(&self) -> ColumnType {
        match self.data {
            ColumnData::Numeric(_) => ColumnType::Numeric,
            ColumnData::Text(_) => ColumnType::Text,
            ColumnData::Categorical(_) => ColumnType::Categorical,
            ColumnData::Date(_) => ColumnType::Date,
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Categorical(c) => c.len(),
            ColumnData::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow a single cell. Out-of-range rows read as missing.
    pub fn cell(&self, row: usize) -> Cell<'_> {
        match &self.data {
            ColumnData::Numeric(v) => v.get(row).copied().flatten().map_or(Cell::Missing, Cell::Number),
            ColumnData::Text(v) => v
                .get(row)
                .and_then(|c| c.as_deref())
                .map_or(Cell::Missing, Cell::Text),
            ColumnData::Categorical(c) => c.get(row).map_or(Cell::Missing, Cell::Text),
            ColumnData::Date(v) => v.get(row).copied().flatten().map_or(Cell::Missing, Cell::Date),
        }
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        match &self.data {
            ColumnData::Numeric(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Text(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Categorical(c) => c.codes().iter().filter(|c| c.is_none()).count(),
            ColumnData::Date(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Non-missing numeric values, or `None` for non-numeric columns.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        match &self.data {
            ColumnData::Numeric(v) => Some(v.iter().flatten().copied().collect()),
            _ => None,
        }
    }

    /// Keep only the rows whose mask entry is `true`.
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) {
        match &mut self.data {
            ColumnData::Numeric(v) => retain_by_mask(v, keep),
            ColumnData::Text(v) => retain_by_mask(v, keep),
            ColumnData::Categorical(c) => retain_by_mask(&mut c.codes, keep),
            ColumnData::Date(v) => retain_by_mask(v, keep),
        }
    }
}

fn retain_by_mask<T>(values: &mut Vec<T>, keep: &[bool]) {
    let mut mask = keep.iter();
    values.retain(|_| mask.next().copied().unwrap_or(true));
}
