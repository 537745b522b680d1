//! Error line location.
//!
//! Three passes over the clean lines, each returning on its first hit:
//! 1. Single-line error patterns from the catalog
//! 2. Process termination phrases
//! 3. Generic failure keywords, skipping lines that also report success
//!
//! The context is the window `[i - radius, i + radius)` around the hit.

use crate::patterns::{
    contains_any, error_patterns, ErrorPattern, Extraction, EXIT_STATUS_PHRASES,
    FAILURE_INDICATORS, MIN_FRAGMENT_RATIO, SUCCESS_INDICATORS,
};
use cf_common::Tier;
use regex::Captures;

/// An error found by one of the extraction stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Single-line error message.
    pub message: String,
    /// Non-blank trimmed lines around the error, in log order.
    pub context: Vec<String>,
    /// Index of the clean line that triggered the match.
    pub line: usize,
    /// Stage that produced the match.
    pub tier: Tier,
}

/// Trimmed non-blank lines of `lines[start..end]`, clamped to the slice.
pub(crate) fn context_window<S: AsRef<str>>(lines: &[S], start: usize, end: usize) -> Vec<String> {
    let end = end.min(lines.len());
    let start = start.min(end);
    lines[start..end]
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn located_at<S: AsRef<str>>(
    lines: &[S],
    index: usize,
    radius: usize,
    message: String,
    tier: Tier,
) -> Located {
    Located {
        message,
        context: context_window(lines, index.saturating_sub(radius), index.saturating_add(radius)),
        line: index,
        tier,
    }
}

/// Turn a tier-1 match into a message.
///
/// Capture groups are tried from last to first; the first non-empty one is
/// the fragment. A fragment under half the line's length loses to the line.
pub fn pattern_message(pattern: &ErrorPattern, caps: &Captures<'_>, line: &str) -> String {
    if pattern.extraction == Extraction::WholeLine {
        return line.to_string();
    }

    let fragment = (1..caps.len())
        .rev()
        .filter_map(|group| caps.get(group))
        .map(|m| m.as_str().trim())
        .find(|text| !text.is_empty());

    match fragment {
        Some(text)
            if text.chars().count() as f64 >= line.chars().count() as f64 * MIN_FRAGMENT_RATIO =>
        {
            text.to_string()
        }
        _ => line.to_string(),
    }
}

/// Tier 1: first line matching any catalog error pattern.
pub fn match_specific_pattern<S: AsRef<str>>(lines: &[S], radius: usize) -> Option<Located> {
    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        for pattern in error_patterns() {
            if let Some(caps) = pattern.captures(line) {
                tracing::debug!(line = index, pattern = pattern.name, "error pattern matched");
                let message = pattern_message(pattern, &caps, line);
                return Some(located_at(lines, index, radius, message, Tier::SpecificPattern));
            }
        }
    }
    None
}

/// Tier 2: first line reporting a process termination.
pub fn match_exit_status<S: AsRef<str>>(lines: &[S], radius: usize) -> Option<Located> {
    lines.iter().enumerate().find_map(|(index, line)| {
        let line = line.as_ref().trim();
        contains_any(&line.to_lowercase(), EXIT_STATUS_PHRASES)
            .then(|| located_at(lines, index, radius, line.to_string(), Tier::ExitStatus))
    })
}

/// Tier 3: first line with a failure keyword that does not also report success.
pub fn match_failure_keyword<S: AsRef<str>>(lines: &[S], radius: usize) -> Option<Located> {
    lines.iter().enumerate().find_map(|(index, line)| {
        let line = line.as_ref().trim();
        let lower = line.to_lowercase();
        let is_failure =
            contains_any(&lower, FAILURE_INDICATORS) && !contains_any(&lower, SUCCESS_INDICATORS);
        is_failure.then(|| located_at(lines, index, radius, line.to_string(), Tier::FailureKeyword))
    })
}

/// Locate the most relevant error line and its context.
pub fn locate_error<S: AsRef<str>>(lines: &[S], radius: usize) -> Option<Located> {
    match_specific_pattern(lines, radius)
        .or_else(|| match_exit_status(lines, radius))
        .or_else(|| match_failure_keyword(lines, radius))
}
