//! Last-resort keyword scan.
//!
//! Used only when no structured stage found anything. Low confidence: the
//! context is the list of qualifying lines, not a contiguous window.

use crate::locate::Located;
use crate::patterns::{contains_any, FALLBACK_KEYWORDS, LOW_SEVERITY_PREFIXES};
use cf_common::Tier;

/// Whether a trimmed line is worth reporting when nothing else matched.
pub fn is_useful_line(line: &str, min_len: usize) -> bool {
    line.chars().count() > min_len
        && contains_any(&line.to_lowercase(), FALLBACK_KEYWORDS)
        && !LOW_SEVERITY_PREFIXES
            .iter()
            .any(|prefix| line.starts_with(prefix))
}

/// Collect up to `max_context` useful lines; the first is the message.
pub fn scan_fallback<S: AsRef<str>>(
    lines: &[S],
    min_len: usize,
    max_context: usize,
) -> Option<Located> {
    let mut useful = lines
        .iter()
        .enumerate()
        .map(|(index, line)| (index, line.as_ref().trim()))
        .filter(|(_, line)| is_useful_line(line, min_len));

    let (first_index, first) = useful.next()?;
    let mut context = vec![first.to_string()];
    context.extend(
        useful
            .take(max_context.saturating_sub(1))
            .map(|(_, line)| line.to_string()),
    );

    tracing::debug!(
        line = first_index,
        context_lines = context.len(),
        "fallback keyword scan matched"
    );
    Some(Located {
        message: first.to_string(),
        context,
        line: first_index,
        tier: Tier::Fallback,
    })
}
