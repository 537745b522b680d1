//! Failing command extraction.
//!
//! First match wins, not best match: an explicit `+ cmd` or `$ cmd` marker
//! is trusted over a tool name that merely appears in a later line.

use crate::patterns::{
    command_patterns, COMMAND_REJECT_PREFIXES, COMMAND_REJECT_SCAN_CHARS, COMMAND_REJECT_WORD,
};

/// Minimum command length in chars.
const MIN_COMMAND_CHARS: usize = 4;

/// Whether a captured string looks like a real command.
pub fn is_plausible_command(command: &str) -> bool {
    if command.chars().count() < MIN_COMMAND_CHARS {
        return false;
    }
    if COMMAND_REJECT_PREFIXES
        .iter()
        .any(|prefix| command.starts_with(prefix))
    {
        return false;
    }
    let head: String = command
        .chars()
        .take(COMMAND_REJECT_SCAN_CHARS)
        .collect::<String>()
        .to_lowercase();
    !head.contains(COMMAND_REJECT_WORD)
}

/// Find the command that was running when the build failed.
///
/// Each line is tested against the command patterns in priority order. The
/// first pattern that matches decides for that line: if its capture is not a
/// plausible command the scan moves on to the next line.
pub fn extract_failing_command<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let matched = command_patterns()
            .iter()
            .find_map(|pattern| pattern.capture(line).map(|command| (pattern.name, command)));

        if let Some((pattern, command)) = matched {
            if is_plausible_command(command) {
                tracing::debug!(line = index, pattern, "failing command found");
                return Some(command.to_string());
            }
            tracing::trace!(line = index, pattern, "rejected command candidate");
        }
    }
    None
}
