//! Fuzz target for log API response decoding.
//!
//! Tests that raw or JSON-wrapped log bodies are decoded without panicking.

#![no_main]

use cf_common::{decode_log_bytes, log_text_from_response};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let body = decode_log_bytes(data);
    let text = log_text_from_response(&body);
    let _ = cf_analyze::analyze(&text);
});
