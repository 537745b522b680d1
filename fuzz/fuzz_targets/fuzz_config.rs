//! Fuzz target for analysis config parsing.
//!
//! Tests that JSON config parsing and validation handle arbitrary input
//! without panicking.

#![no_main]

use cf_analyze::AnalysisConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Should never panic, only return an error
    if let Ok(config) = serde_json::from_slice::<AnalysisConfig>(data) {
        let _ = config.validate();
    }
});
