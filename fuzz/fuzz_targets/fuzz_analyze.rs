//! Fuzz target for log analysis.
//!
//! Tests that analysis of arbitrary bytes never panics and that every
//! context line is non-blank.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let result = cf_analyze::analyze_bytes(data);
    assert!(result.error_context.iter().all(|line| !line.trim().is_empty()));
    if result.error_message.is_none() {
        assert!(result.error_context.is_empty());
    }
});
