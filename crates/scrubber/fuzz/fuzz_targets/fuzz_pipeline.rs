//! Fuzz target for a full cleaning run with fuzzer-chosen parameters.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scrubber::{CleaningParameters, MissingStrategy, OutlierAction, Scrubber};

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    drop_missing: bool,
    outliers: u8,
    date_columns: Vec<String>,
    data: &'a [u8],
}

fuzz_target!(|input: Input<'_>| {
    if input.data.len() > 100_000 {
        return;
    }

    let params = CleaningParameters::new()
        .with_missing_strategy(if input.drop_missing {
            MissingStrategy::Drop
        } else {
            MissingStrategy::Impute
        })
        .with_outlier_action(match input.outliers % 3 {
            0 => OutlierAction::Remove,
            1 => OutlierAction::Replace,
            _ => OutlierAction::Keep,
        })
        .with_date_columns(input.date_columns);

    let _ = Scrubber::new().clean_bytes(input.data, &params);
});
