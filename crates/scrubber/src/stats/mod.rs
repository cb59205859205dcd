//! Statistics used by the cleaning rules.

mod skew;
mod summary;

pub use skew::{Shape, SkewClassifier};
pub use summary::{NumericSummary, quantile};

use indexmap::IndexMap;

/// Most frequent value. Ties go to the lexicographically smallest value.
pub fn mode<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for v in values {
        *counts.entry(v).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
        .map(|(v, _)| v)
}
