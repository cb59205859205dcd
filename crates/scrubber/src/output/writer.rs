//! Comma-separated output with a header row.

use std::borrow::Cow;

use crate::error::{Result, ScrubError};
use crate::model::{Cell, ColumnData, Table};
use crate::transform::date_format;

/// Render one cell. Missing cells render as an empty field.
pub fn render_cell<'a>(cell: Cell<'a>, date_format: &str) -> Cow<'a, str> {
    match cell {
        Cell::Missing => Cow::Borrowed(""),
        Cell::Number(n) => Cow::Owned(n.to_string()),
        Cell::Text(s) => Cow::Borrowed(s),
        Cell::Date(d) => Cow::Owned(d.format(date_format).to_string()),
    }
}

/// Serialize a table as comma-separated bytes with a header row.
pub fn write_csv(table: &Table) -> Result<Vec<u8>> {
    if table.column_count() == 0 {
        return Ok(Vec::new());
    }

    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(table.column_names())
        .map_err(|e| ScrubError::Serialization(e.to_string()))?;

    let formats: Vec<&str> = table
        .columns()
        .iter()
        .map(|c| match &c.data {
            ColumnData::Date(values) => date_format(values),
            _ => "",
        })
        .collect();

    for row in 0..table.row_count() {
        let record: Vec<Cow<'_, str>> = table
            .columns()
            .iter()
            .zip(&formats)
            .map(|(column, fmt)| render_cell(column.cell(row), fmt))
            .collect();
        writer
            .write_record(record.iter().map(|field| field.as_bytes()))
            .map_err(|e| ScrubError::Serialization(e.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|e| ScrubError::Serialization(e.to_string()))
}
