//! Fuzz target for the loader.
//!
//! The loader must never panic on arbitrary bytes, whatever encoding or
//! delimiter they appear to use.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scrubber::Scrubber;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let scrubber = Scrubber::new();
    if let Ok((table, _)) = scrubber.load(data) {
        let _ = scrubber.serialize(&table);
    }
});
