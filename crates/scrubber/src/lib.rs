//! Scrubber: a cleaning pipeline for delimited tabular datasets.
//!
//! Raw bytes of unknown encoding and delimiter are decoded into a typed,
//! column-oriented [`Table`], then passed through a fixed sequence of stages:
//!
//! 1. normalize column names and drop colliding columns
//! 2. remove duplicate rows
//! 3. impute or drop missing values
//! 4. convert text columns to categoricals
//! 5. remove or replace numeric outliers
//! 6. coerce selected columns to dates
//!
//! Imputation and outlier replacement both pick their method from the
//! column's skewness, through one shared [`SkewClassifier`].
//!
//! # Example
//!
//! ```
//! use scrubber::{CleaningParameters, OutlierAction, Scrubber};
//!
//! let scrubber = Scrubber::new();
//! let params = CleaningParameters::new().with_outlier_action(OutlierAction::Remove);
//!
//! let result = scrubber
//!     .clean_bytes(b"Value\n1\n2\n3\n4\n1000\n", &params)
//!     .unwrap();
//!
//! assert_eq!(result.table.row_count(), 4);
//! assert_eq!(result.output.unwrap(), b"value\n1\n2\n3\n4\n");
//! ```

pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod params;
pub mod report;
pub mod stats;
pub mod transform;

mod scrubber;

pub use crate::scrubber::{CleaningResult, Preview, Scrubber, ScrubberConfig};
pub use error::{Result, ScrubError};
pub use input::{Loader, LoaderConfig, SourceMetadata};
pub use model::{Cell, Column, ColumnData, ColumnType, Table};
pub use params::{CleaningParameters, MissingStrategy, OutlierAction};
pub use report::{CleaningReport, CleaningWarning, StageKind, StageReport};
pub use stats::{NumericSummary, SkewClassifier};
pub use transform::OutlierConfig;
