//! Decoding raw delimited bytes into tables.

mod loader;
mod sniffer;
mod source;

pub use loader::{DEFAULT_MISSING_TOKENS, Loader, LoaderConfig};
pub use sniffer::sniff_delimiter;
pub use source::{SourceMetadata, content_hash};
