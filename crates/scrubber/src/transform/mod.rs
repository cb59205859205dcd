//! Cleaning stages. Each takes the owned table and hands it back.

mod categorize;
mod dates;
mod dedup;
mod missing;
mod normalize;
mod outliers;

pub use categorize::Categorizer;
pub use dates::{DateCoercer, date_format, parse_datetime};
pub use dedup::Deduplicator;
pub use missing::MissingResolver;
pub use normalize::{Normalizer, canonical_name};
pub use outliers::{OutlierConfig, OutlierEngine};

use crate::error::Result;
use crate::model::Table;
use crate::params::CleaningParameters;
use crate::report::{StageKind, StageReport};

/// One step of the cleaning pipeline.
pub trait Stage {
    /// Which stage this is.
    fn kind(&self) -> StageKind;

    /// Apply the stage, recording what changed in `report`.
    fn apply(
        &self,
        table: Table,
        params: &CleaningParameters,
        report: &mut StageReport,
    ) -> Result<Table>;
}
