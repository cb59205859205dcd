//! Metadata about a loaded source buffer.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Describes how a raw buffer was decoded into a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// SHA-256 hash of the raw bytes.
    pub hash: String,
    /// Input size in bytes.
    pub size_bytes: u64,
    /// Encoding label that decoded the input.
    pub encoding: String,
    /// Field delimiter used for the final parse.
    pub delimiter: char,
    /// Format name derived from the delimiter (csv, tsv, etc.).
    pub format: String,
    /// Whether the delimiter came from sniffing rather than the default.
    pub sniffed: bool,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
}

impl SourceMetadata {
    pub fn new(
        bytes: &[u8],
        encoding: impl Into<String>,
        delimiter: u8,
        sniffed: bool,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            hash: content_hash(bytes),
            size_bytes: bytes.len() as u64,
            encoding: encoding.into(),
            delimiter: delimiter as char,
            format: format_name(delimiter).to_string(),
            sniffed,
            row_count,
            column_count,
        }
    }
}

/// Hash the raw input, formatted as `sha256:<hex>`.
pub fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("sha256:{:x}", hasher.finalize())
}

fn format_name(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}
