//! Date coercion for caller-designated columns.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;

use super::Stage;
use crate::error::Result;
use crate::model::{Cell, ColumnData, ColumnType, Table};
use crate::params::CleaningParameters;
use crate::report::{CleaningWarning, StageKind, StageReport};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// Parse a date or date-time. Date-only values land at midnight.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(value, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }

    // Compact YYYYMMDD
    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        let year = value[0..4].parse().ok()?;
        let month = value[4..6].parse().ok()?;
        let day = value[6..8].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day).map(|d| d.and_time(NaiveTime::MIN));
    }

    None
}

/// Output format for a date column: date-only when every value is at
/// midnight.
pub fn date_format(values: &[Option<NaiveDateTime>]) -> &'static str {
    let all_midnight = values
        .iter()
        .flatten()
        .all(|dt| dt.num_seconds_from_midnight() == 0 && dt.nanosecond() == 0);
    if all_midnight {
        "%Y-%m-%d"
    } else {
        "%Y-%m-%d %H:%M:%S%.f"
    }
}

/// Numbers are read through their text form (`20240105` is 2024-01-05),
/// never as epoch offsets.
fn coerce_cell(cell: Cell<'_>) -> Option<NaiveDateTime> {
    match cell {
        Cell::Missing => None,
        Cell::Number(n) => parse_datetime(&n.to_string()),
        Cell::Text(s) => parse_datetime(s),
        Cell::Date(d) => Some(d),
    }
}

/// Converts the requested columns to dates. Unparseable cells become
/// missing.
pub struct DateCoercer;

impl Stage for DateCoercer {
    fn kind(&self) -> StageKind {
        StageKind::CoerceDates
    }

    fn apply(
        &self,
        mut table: Table,
        params: &CleaningParameters,
        report: &mut StageReport,
    ) -> Result<Table> {
        let targets = match params.date_columns.as_deref() {
            Some(names) if !names.is_empty() => names,
            _ => {
                report.warn(CleaningWarning::DateConversionSkipped);
                return Ok(table);
            }
        };

        for name in targets {
            let Some(column) = table.column_mut(name) else {
                debug!(column = %name, "date column not in table, skipping");
                continue;
            };
            if column.column_type() == ColumnType::Date {
                continue;
            }

            let mut failures = 0;
            let parsed: Vec<Option<NaiveDateTime>> = (0..column.len())
                .map(|row| {
                    let cell = column.cell(row);
                    let value = coerce_cell(cell);
                    if value.is_none() && !cell.is_missing() {
                        failures += 1;
                    }
                    value
                })
                .collect();

            let converted = parsed.iter().flatten().count();
            debug!(column = %name, converted, failures, "coerced to date");
            report.cells_changed += converted + failures;
            report.note(format!("'{}': {} value(s) converted", name, converted));
            column.data = ColumnData::Date(parsed);

            if failures > 0 {
                report.warn(CleaningWarning::DateParseFailures {
                    column: name.clone(),
                    count: failures,
                });
            }
        }

        Ok(table)
    }
}
