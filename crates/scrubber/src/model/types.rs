//! Core type definitions for the column model.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Type tag carried by every column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Floating-point numbers.
    Numeric,
    /// Free text values.
    Text,
    /// Text drawn from a finite, dictionary-encoded value domain.
    Categorical,
    /// Date and/or time values.
    Date,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Numeric)
    }

    /// Returns true if values of this type are strings.
    pub fn is_textual(&self) -> bool {
        matches!(self, ColumnType::Text | ColumnType::Categorical)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Numeric => write!(f, "numeric"),
            ColumnType::Text => write!(f, "text"),
            ColumnType::Categorical => write!(f, "categorical"),
            ColumnType::Date => write!(f, "date"),
        }
    }
}

/// Borrowed view of a single cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    /// Explicitly absent data.
    Missing,
    Number(f64),
    Text(&'a str),
    Date(NaiveDateTime),
}

impl<'a> Cell<'a> {
    /// Returns true if the cell is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Hashable identity of the cell, used for row comparison.
    ///
    /// Missing compares equal to missing, and `-0.0` equals `0.0`.
    pub fn key(&self) -> CellKey<'a> {
        match self {
            Cell::Missing => CellKey::Missing,
            Cell::Number(n) => {
                let n = if *n == 0.0 { 0.0 } else { *n };
                CellKey::Number(n.to_bits())
            }
            Cell::Text(s) => CellKey::Text(*s),
            Cell::Date(d) => CellKey::Date(*d),
        }
    }
}

/// Hashable form of a [`Cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey<'a> {
    Missing,
    Number(u64),
    Text(&'a str),
    Date(NaiveDateTime),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_keys() {
        assert_eq!(Cell::Missing.key(), Cell::Missing.key());
        assert_eq!(Cell::Number(0.0).key(), Cell::Number(-0.0).key());
        assert_ne!(Cell::Number(1.0).key(), Cell::Text("1").key());
    }

    #[test]
    fn test_column_type_display() {
        assert_eq!(ColumnType::Categorical.to_string(), "categorical");
        assert!(ColumnType::Text.is_textual());
        assert!(!ColumnType::Date.is_numeric());
    }
}
