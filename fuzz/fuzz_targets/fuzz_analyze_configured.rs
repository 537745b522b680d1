//! Fuzz target for analysis under non-default configurations.
//!
//! Small radii and input caps push the window and tail arithmetic to their
//! edges.

#![no_main]

use arbitrary::Arbitrary;
use cf_analyze::{AnalysisConfig, LogAnalyzer};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    context_radius: u8,
    min_context_lines: u8,
    replace_short_matches: bool,
    fallback_min_line_len: u8,
    fallback_max_context: u8,
    max_input_bytes: Option<u16>,
    log: String,
}

fuzz_target!(|input: Input| {
    let config = AnalysisConfig {
        context_radius: input.context_radius.into(),
        min_context_lines: input.min_context_lines.into(),
        replace_short_matches: input.replace_short_matches,
        fallback_min_line_len: input.fallback_min_line_len.into(),
        fallback_max_context: input.fallback_max_context.into(),
        max_input_bytes: input.max_input_bytes.map(usize::from),
    };

    // Invalid configs are rejected up front, never at analysis time
    let Ok(analyzer) = LogAnalyzer::new(config) else {
        return;
    };
    let result = analyzer.analyze(&input.log);
    if let Some(cap) = input.max_input_bytes {
        let cap = usize::from(cap);
        assert!(result.error_context.iter().all(|line| line.len() <= cap));
    }
});
