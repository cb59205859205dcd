//! Error types for the scrubber library.

use thiserror::Error;

/// Main error type for scrubber operations.
#[derive(Debug, Error)]
pub enum ScrubError {
    /// The source buffer contained zero bytes.
    #[error("Empty input: the source contains no data")]
    EmptyInput,

    /// The source parsed, but produced no columns.
    #[error("No columns: no valid columns found in the input")]
    NoColumns,

    /// No encoding/delimiter combination produced a parseable table.
    #[error("Unreadable format: {0}")]
    UnreadableFormat(String),

    /// A data row had more fields than the header.
    #[error("Parse error at row {row}: expected {expected} fields, found {found}")]
    Parse {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A table with zero rows reached the cleaning pipeline.
    #[error("Empty table: the input has no data rows")]
    EmptyOrNullInput,

    /// Rendering the cleaned table failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A table was constructed from columns of differing lengths.
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrubError {
    /// Short machine-readable code for callers that surface failures to users.
    pub fn code(&self) -> &'static str {
        match self {
            ScrubError::EmptyInput => "EMPTY_INPUT",
            ScrubError::NoColumns => "NO_COLUMNS",
            ScrubError::UnreadableFormat(_) => "UNREADABLE_FORMAT",
            ScrubError::Parse { .. } => "PARSE_ERROR",
            ScrubError::EmptyOrNullInput => "EMPTY_OR_NULL_INPUT",
            ScrubError::Serialization(_) => "SERIALIZATION_ERROR",
            ScrubError::Csv(_) => "CSV_ERROR",
            ScrubError::InvalidTable(_) => "INVALID_TABLE",
            ScrubError::Config(_) => "CONFIG_ERROR",
            ScrubError::Json(_) => "JSON_ERROR",
        }
    }
}

/// Result type alias for scrubber operations.
pub type Result<T> = std::result::Result<T, ScrubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ScrubError::EmptyInput.code(), "EMPTY_INPUT");
        assert_eq!(ScrubError::EmptyOrNullInput.code(), "EMPTY_OR_NULL_INPUT");
        assert_eq!(
            ScrubError::Serialization("boom".to_string()).code(),
            "SERIALIZATION_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ScrubError::UnreadableFormat("tried utf-8, latin1".to_string());
        assert!(err.to_string().contains("utf-8, latin1"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = ScrubError::Parse {
            row: 2,
            expected: 2,
            found: 3,
        };
        assert_eq!(err.code(), "PARSE_ERROR");
        assert_eq!(
            err.to_string(),
            "Parse error at row 2: expected 2 fields, found 3"
        );
    }
}
