//! Decodes raw bytes into a typed [`Table`].

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, info};

use super::sniffer::sniff_delimiter;
use super::source::SourceMetadata;
use crate::error::{Result, ScrubError};
use crate::model::{Column, Table};

/// Cell values read as missing.
pub const DEFAULT_MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "#N/A", "#NA",
    "<NA>", "1.#IND", "1.#QNAN", "-1.#IND", "-1.#QNAN", "#N/A N/A",
];

/// Loader configuration.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Encoding labels to try, in priority order.
    pub encodings: Vec<String>,
    /// Delimiter for the first parse attempt.
    pub delimiter: u8,
    /// Bytes sampled from the head of the input for sniffing.
    pub sample_size: usize,
    /// Delimiters considered by the sniffer.
    pub candidate_delimiters: Vec<u8>,
    /// Quote character.
    pub quote: u8,
    /// Exact cell values treated as missing.
    pub missing_tokens: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            encodings: vec![
                "utf-8".to_string(),
                "latin1".to_string(),
                "iso-8859-1".to_string(),
            ],
            delimiter: b',',
            sample_size: 2048,
            candidate_delimiters: vec![b',', b';', b'\t', b'|', b':'],
            quote: b'"',
            missing_tokens: DEFAULT_MISSING_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Loads delimited text of unknown encoding and delimiter.
pub struct Loader {
    config: LoaderConfig,
    missing_tokens: HashSet<String>,
}

impl Loader {
    /// Create a loader with default configuration.
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a loader with custom configuration.
    pub fn with_config(config: LoaderConfig) -> Self {
        let missing_tokens = config.missing_tokens.iter().cloned().collect();
        Self {
            config,
            missing_tokens,
        }
    }

    /// The configuration this loader was built with.
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Decode and parse `bytes`, returning the table and how it was read.
    ///
    /// Encodings are tried in order. The first one that decodes and parses
    /// wins; if that parse yields a single column, the delimiter is sniffed
    /// from the head of the input and the text is parsed again.
    pub fn load(&self, bytes: &[u8]) -> Result<(Table, SourceMetadata)> {
        if bytes.is_empty() {
            return Err(ScrubError::EmptyInput);
        }

        let mut failures = Vec::new();

        for label in &self.config.encodings {
            let Some(encoding) = Encoding::for_label(label.as_bytes()) else {
                failures.push(format!("{}: unknown encoding", label));
                continue;
            };

            let Some(text) = decode(encoding, bytes) else {
                debug!(encoding = %label, "decode failed");
                failures.push(format!("{}: invalid byte sequence", label));
                continue;
            };

            match self.parse_decoded(bytes, &text, encoding) {
                Ok((table, delimiter, sniffed)) => {
                    let metadata = SourceMetadata::new(
                        bytes,
                        label.as_str(),
                        delimiter,
                        sniffed,
                        table.row_count(),
                        table.column_count(),
                    );
                    info!(
                        encoding = %label,
                        delimiter = %metadata.delimiter.escape_default(),
                        sniffed,
                        rows = metadata.row_count,
                        columns = metadata.column_count,
                        "loaded table"
                    );
                    return Ok((table, metadata));
                }
                Err(ScrubError::NoColumns) => return Err(ScrubError::NoColumns),
                Err(e) => {
                    debug!(encoding = %label, error = %e, "parse failed");
                    failures.push(format!("{}: {}", label, e));
                }
            }
        }

        Err(ScrubError::UnreadableFormat(failures.join("; ")))
    }

    fn parse_decoded(
        &self,
        bytes: &[u8],
        text: &str,
        encoding: &'static Encoding,
    ) -> Result<(Table, u8, bool)> {
        let default = self.config.delimiter;
        let table = self.parse_text(text, default)?;
        if table.column_count() != 1 {
            return Ok((table, default, false));
        }

        let cut = bytes.len().min(self.config.sample_size);
        let (sample, _) = encoding.decode_without_bom_handling(&bytes[..cut]);
        let sniffed = sniff_delimiter(
            &sample,
            &self.config.candidate_delimiters,
            self.config.quote,
            cut < bytes.len(),
        );

        match sniffed {
            Some(delimiter) if delimiter != default => {
                debug!(delimiter = %(delimiter as char).escape_default(), "re-parsing with sniffed delimiter");
                let table = self.parse_text(text, delimiter)?;
                Ok((table, delimiter, true))
            }
            _ => Ok((table, default, false)),
        }
    }

    /// Parse decoded text with a fixed delimiter and type its columns.
    fn parse_text(&self, text: &str, delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = dedupe_headers(reader.headers()?.iter().map(str::to_string).collect());
        if headers.is_empty() {
            return Err(ScrubError::NoColumns);
        }

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for (row, result) in reader.records().enumerate() {
            let record = result?;
            if record.len() > headers.len() {
                return Err(ScrubError::Parse {
                    row: row + 1,
                    expected: headers.len(),
                    found: record.len(),
                });
            }
            // Short rows are padded with missing cells.
            for (i, column) in cells.iter_mut().enumerate() {
                let value = record
                    .get(i)
                    .filter(|v| !self.missing_tokens.contains(*v))
                    .map(str::to_string);
                column.push(value);
            }
        }

        let columns = headers
            .into_iter()
            .zip(cells)
            .map(|(name, values)| type_column(name, values))
            .collect();

        Table::new(columns)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Strict decode. `None` if the bytes are malformed for this encoding.
fn decode<'a>(encoding: &'static Encoding, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
    let bytes = if encoding == UTF_8 {
        bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
    } else {
        bytes
    };
    encoding.decode_without_bom_handling_and_without_replacement(bytes)
}

/// Repeated header names get a `.k` suffix, counting from 1 per name.
/// A generated name that is itself taken keeps counting.
fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    headers
        .into_iter()
        .map(|mut name| {
            let mut count = counts.get(&name).copied().unwrap_or(0);
            while count > 0 {
                counts.insert(name.clone(), count + 1);
                name = format!("{}.{}", name, count);
                count = counts.get(&name).copied().unwrap_or(0);
            }
            counts.insert(name.clone(), 1);
            name
        })
        .collect()
}

/// A column is numeric when it has a value and every value parses as a
/// float. Parsed NaN is stored as missing.
fn type_column(name: String, values: Vec<Option<String>>) -> Column {
    if values.iter().any(Option::is_some) {
        let parsed: Option<Vec<Option<f64>>> = values
            .iter()
            .map(|cell| match cell {
                None => Some(None),
                Some(s) => s.trim().parse::<f64>().ok().map(|v| (!v.is_nan()).then_some(v)),
            })
            .collect();

        if let Some(numbers) = parsed {
            return Column::numeric(name, numbers);
        }
    }
    Column::text(name, values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cell, ColumnType};

    #[test]
    fn test_empty_input() {
        assert!(matches!(Loader::new().load(b""), Err(ScrubError::EmptyInput)));
    }

    #[test]
    fn test_blank_input_has_no_columns() {
        assert!(matches!(Loader::new().load(b"\n\n"), Err(ScrubError::NoColumns)));
    }

    #[test]
    fn test_comma_parse() {
        let (table, meta) = Loader::new().load(b"name,age\nAlice,30\nBob,25\n").unwrap();
        assert_eq!(table.column_names(), vec!["name", "age"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(meta.encoding, "utf-8");
        assert_eq!(meta.delimiter, ',');
        assert!(!meta.sniffed);
        assert_eq!(table.column("age").unwrap().column_type(), ColumnType::Numeric);
        assert_eq!(table.column("name").unwrap().cell(1), Cell::Text("Bob"));
    }

    #[test]
    fn test_semicolon_is_sniffed() {
        let (table, meta) = Loader::new().load(b"a;b;c\n1;2;3\n").unwrap();
        assert_eq!(table.column_names(), vec!["a", "b", "c"]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(meta.delimiter, ';');
        assert!(meta.sniffed);
        assert_eq!(meta.format, "csv-semicolon");
    }

    #[test]
    fn test_single_column_stays_single() {
        let (table, meta) = Loader::new().load(b"value\n1\n2\n").unwrap();
        assert_eq!(table.column_count(), 1);
        assert!(!meta.sniffed);
    }

    #[test]
    fn test_latin1_fallback() {
        let (table, meta) = Loader::new()
            .load(b"name,city\nJos\xe9,M\xfcnchen\n")
            .unwrap();
        assert_eq!(meta.encoding, "latin1");
        assert_eq!(table.column("name").unwrap().cell(0), Cell::Text("José"));
        assert_eq!(table.column("city").unwrap().cell(0), Cell::Text("München"));
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let (table, _) = Loader::new().load(b"\xEF\xBB\xBFa,b\n1,2\n").unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_missing_tokens_and_typing() {
        let (table, _) = Loader::new()
            .load(b"a,b,c\n1,x,NA\n2.5,,3\n")
            .unwrap();
        let a = table.column("a").unwrap();
        let b = table.column("b").unwrap();
        let c = table.column("c").unwrap();

        assert_eq!(a.column_type(), ColumnType::Numeric);
        assert_eq!(b.column_type(), ColumnType::Text);
        assert!(b.cell(1).is_missing());
        assert_eq!(c.column_type(), ColumnType::Numeric);
        assert!(c.cell(0).is_missing());
        assert_eq!(c.cell(1), Cell::Number(3.0));
    }

    #[test]
    fn test_all_missing_column_is_text() {
        let (table, _) = Loader::new().load(b"a,b\n1,\n2,NULL\n").unwrap();
        assert_eq!(table.column("b").unwrap().column_type(), ColumnType::Text);
        assert_eq!(table.column("b").unwrap().missing_count(), 2);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let (table, _) = Loader::new().load(b"a,b\n1\n2,3\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert!(table.column("b").unwrap().cell(0).is_missing());
        assert_eq!(table.column("b").unwrap().cell(1), Cell::Number(3.0));
    }

    #[test]
    fn test_long_row_is_rejected() {
        let result = Loader::new().load(b"a,b\n1,2,3\n4,5\n");
        match result {
            Err(ScrubError::UnreadableFormat(msg)) => {
                assert!(msg.contains("utf-8: Parse error at row 1: expected 2 fields, found 3"));
            }
            other => panic!("expected UnreadableFormat, got {:?}", other.map(|(t, _)| t)),
        }
    }

    #[test]
    fn test_unquoted_comma_in_value_is_rejected() {
        let result = Loader::new().load(b"name\nSmith, John\nDoe, Jane\n");
        assert!(matches!(result, Err(ScrubError::UnreadableFormat(_))));
    }

    #[test]
    fn test_quoted_comma_in_value_is_kept() {
        let (table, _) = Loader::new()
            .load(b"name\n\"Smith, John\"\n\"Doe, Jane\"\n")
            .unwrap();
        assert_eq!(table.column_count(), 1);
        assert_eq!(table.column("name").unwrap().cell(0), Cell::Text("Smith, John"));
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let (table, _) = Loader::new().load(b"A,A,B,A\n1,2,3,4\n").unwrap();
        assert_eq!(table.column_names(), vec!["A", "A.1", "B", "A.2"]);
        assert_eq!(table.column("A.2").unwrap().cell(0), Cell::Number(4.0));
    }

    #[test]
    fn test_dedupe_headers_skips_taken_names() {
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(
            dedupe_headers(names(&["x", "x", "x.1"])),
            names(&["x", "x.1", "x.1.1"])
        );
        assert_eq!(dedupe_headers(names(&["x", "y"])), names(&["x", "y"]));
    }

    #[test]
    fn test_header_only() {
        let (table, meta) = Loader::new().load(b"a,b\n").unwrap();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 0);
        assert_eq!(meta.row_count, 0);
    }

    #[test]
    fn test_unknown_encodings_are_unreadable() {
        let config = LoaderConfig {
            encodings: vec!["klingon".to_string()],
            ..LoaderConfig::default()
        };
        let loader = Loader::with_config(config);
        assert_eq!(loader.config().encodings, vec!["klingon".to_string()]);
        let result = loader.load(b"a,b\n1,2\n");
        assert!(matches!(result, Err(ScrubError::UnreadableFormat(_))));
    }

    #[test]
    fn test_caller_bytes_untouched() {
        let bytes = b"A;B\n1;2\n".to_vec();
        let copy = bytes.clone();
        Loader::new().load(&bytes).unwrap();
        assert_eq!(bytes, copy);
    }
}
