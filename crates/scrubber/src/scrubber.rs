//! Main Scrubber struct and public API.

use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ScrubError};
use crate::input::{Loader, LoaderConfig, SourceMetadata};
use crate::model::Table;
use crate::output::write_csv;
use crate::params::CleaningParameters;
use crate::report::{CleaningReport, StageReport};
use crate::stats::SkewClassifier;
use crate::transform::{
    Categorizer, DateCoercer, Deduplicator, MissingResolver, Normalizer, OutlierConfig,
    OutlierEngine, Stage,
};

/// Configuration for the cleaning engine.
#[derive(Debug, Clone, Default)]
pub struct ScrubberConfig {
    /// Loader configuration.
    pub loader: LoaderConfig,
    /// Outlier thresholds.
    pub outliers: OutlierConfig,
    /// Skewness gate shared by imputation and outlier replacement.
    pub skew: SkewClassifier,
}

impl ScrubberConfig {
    /// Check that thresholds are positive and every encoding label is known.
    pub fn validate(&self) -> Result<()> {
        if self.loader.encodings.is_empty() {
            return Err(ScrubError::Config("no encodings configured".to_string()));
        }
        if let Some(label) = self
            .loader
            .encodings
            .iter()
            .find(|l| Encoding::for_label(l.as_bytes()).is_none())
        {
            return Err(ScrubError::Config(format!("unknown encoding '{}'", label)));
        }
        if self.loader.sample_size == 0 {
            return Err(ScrubError::Config("sniff sample size must be positive".to_string()));
        }

        let positive = [
            ("IQR multiplier", self.outliers.iqr_multiplier),
            ("z-score threshold", self.outliers.z_threshold),
            ("skewness threshold", self.skew.threshold),
        ];
        for (what, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ScrubError::Config(format!(
                    "{} must be positive, got {}",
                    what, value
                )));
            }
        }
        Ok(())
    }
}

/// Output of a cleaning run.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    /// The cleaned table.
    pub table: Table,
    /// Comma-separated rendering of `table`, when requested.
    pub output: Option<Vec<u8>>,
    /// What each stage did.
    pub report: CleaningReport,
}

/// Column overview of a loaded table, used to pick date columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preview {
    pub source: SourceMetadata,
    /// Column names and type tags, in table order.
    pub columns: Vec<(String, String)>,
}

/// The cleaning engine.
pub struct Scrubber {
    config: ScrubberConfig,
    loader: Loader,
    stages: Vec<Box<dyn Stage>>,
}

impl Scrubber {
    /// Create a new Scrubber with default configuration.
    pub fn new() -> Self {
        Self::build(ScrubberConfig::default())
    }

    /// Create a Scrubber with custom configuration.
    pub fn with_config(config: ScrubberConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ScrubberConfig) -> Self {
        let loader = Loader::with_config(config.loader.clone());
        let stages: Vec<Box<dyn Stage>> = vec![
            Box::new(Normalizer),
            Box::new(Deduplicator),
            Box::new(MissingResolver::new(config.skew)),
            Box::new(Categorizer),
            Box::new(OutlierEngine::new(config.outliers, config.skew)),
            Box::new(DateCoercer),
        ];

        Self {
            config,
            loader,
            stages,
        }
    }

    pub fn config(&self) -> &ScrubberConfig {
        &self.config
    }

    /// Decode raw bytes into a table.
    pub fn load(&self, bytes: &[u8]) -> Result<(Table, SourceMetadata)> {
        self.loader.load(bytes)
    }

    /// Load `bytes` and describe the resulting columns without cleaning.
    pub fn preview(&self, bytes: &[u8]) -> Result<Preview> {
        let (table, source) = self.load(bytes)?;
        let columns = table
            .schema()
            .into_iter()
            .map(|(name, ty)| (name.to_string(), ty.to_string()))
            .collect();
        Ok(Preview { source, columns })
    }

    /// Run every stage over `table`, in order.
    ///
    /// Fails with [`ScrubError::EmptyOrNullInput`] when the table has no rows.
    /// A failing stage aborts the run and the table is dropped.
    pub fn run(&self, table: Table, params: &CleaningParameters) -> Result<CleaningResult> {
        if table.is_empty() {
            return Err(ScrubError::EmptyOrNullInput);
        }

        let mut table = table;
        let mut report = CleaningReport::new();

        for stage in &self.stages {
            let mut stage_report = StageReport::new(stage.kind(), table.row_count());
            table = stage.apply(table, params, &mut stage_report)?;
            stage_report.rows_after = table.row_count();

            info!(
                stage = %stage_report.stage,
                rows_before = stage_report.rows_before,
                rows_after = stage_report.rows_after,
                columns_removed = stage_report.columns_removed.len(),
                cells_changed = stage_report.cells_changed,
                "stage complete"
            );
            report.push(stage_report);
        }

        Ok(CleaningResult {
            table,
            output: None,
            report,
        })
    }

    /// Render a table as comma-separated bytes.
    pub fn serialize(&self, table: &Table) -> Result<Vec<u8>> {
        write_csv(table)
    }

    /// Run the pipeline and serialize the result.
    pub fn clean(&self, table: Table, params: &CleaningParameters) -> Result<CleaningResult> {
        let mut result = self.run(table, params)?;
        result.output = Some(self.serialize(&result.table)?);
        Ok(result)
    }

    /// Load, clean, and serialize in one call.
    pub fn clean_bytes(&self, bytes: &[u8], params: &CleaningParameters) -> Result<CleaningResult> {
        let (table, _) = self.load(bytes)?;
        self.clean(table, params)
    }
}

impl Default for Scrubber {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Column, ColumnType};
    use crate::params::{MissingStrategy, OutlierAction};
    use crate::report::{CleaningWarning, StageKind};

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScrubberConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = ScrubberConfig::default();
        config.outliers.iqr_multiplier = 0.0;
        assert!(matches!(Scrubber::with_config(config), Err(ScrubError::Config(_))));

        let mut config = ScrubberConfig::default();
        config.loader.encodings = vec!["utf-8".to_string(), "not-an-encoding".to_string()];
        assert!(matches!(config.validate(), Err(ScrubError::Config(_))));

        let mut config = ScrubberConfig::default();
        config.loader.encodings.clear();
        assert!(config.validate().is_err());

        let mut config = ScrubberConfig::default();
        config.skew.threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_table_fails_fast() {
        let scrubber = Scrubber::new();
        let params = CleaningParameters::default();

        let no_rows = Table::new(vec![Column::numeric("a", vec![])]).unwrap();
        assert!(matches!(scrubber.run(no_rows, &params), Err(ScrubError::EmptyOrNullInput)));
        assert!(matches!(
            scrubber.run(Table::default(), &params),
            Err(ScrubError::EmptyOrNullInput)
        ));
    }

    #[test]
    fn test_stages_run_in_order() {
        let scrubber = Scrubber::new();
        let (table, _) = scrubber.load(b"A,B\n1,2\n1,2\n3,4\n").unwrap();
        let result = scrubber.run(table, &CleaningParameters::default()).unwrap();

        let order: Vec<StageKind> = result.report.stages.iter().map(|s| s.stage).collect();
        assert_eq!(
            order,
            vec![
                StageKind::Normalize,
                StageKind::Deduplicate,
                StageKind::ResolveMissing,
                StageKind::Categorize,
                StageKind::Outliers,
                StageKind::CoerceDates,
            ]
        );
        assert!(result.output.is_none());
        assert_eq!(result.report.warnings(), vec![&CleaningWarning::DateConversionSkipped]);
    }

    #[test]
    fn test_clean_bytes() {
        let params = CleaningParameters::new()
            .with_missing_strategy(MissingStrategy::Impute)
            .with_outlier_action(OutlierAction::Keep)
            .with_date_columns(["joined"]);

        let input = b"Name,Joined,Score\nann,2024-01-05,1\nbob,,2\nann,2024-01-05,1\n";
        let result = Scrubber::new().clean_bytes(input, &params).unwrap();

        assert_eq!(result.table.row_count(), 2);
        assert_eq!(
            result.table.schema(),
            vec![
                ("name", ColumnType::Categorical),
                ("joined", ColumnType::Date),
                ("score", ColumnType::Numeric),
            ]
        );
        let output = String::from_utf8(result.output.unwrap()).unwrap();
        assert_eq!(output, "name,joined,score\nann,2024-01-05,1\nbob,2024-01-05,2\n");
    }

    #[test]
    fn test_preview() {
        let preview = Scrubber::new().preview(b"a;b\n1;x\n").unwrap();
        assert_eq!(
            preview.columns,
            vec![
                ("a".to_string(), "numeric".to_string()),
                ("b".to_string(), "text".to_string()),
            ]
        );
        assert!(preview.source.sniffed);
    }
}
