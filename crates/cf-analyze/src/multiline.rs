//! Multi-line error block detection.
//!
//! A signature marks the start of a block (stack trace, tool error dump).
//! The context runs from two lines before the signature to the signature's
//! own forward window, and the message is refined to the first line in the
//! block that reads like an error.

use crate::locate::{context_window, Located};
use crate::patterns::{contains_any, signature_patterns, REFINEMENT_MARKERS, SIGNATURE_LEAD_LINES};
use cf_common::Tier;

/// Find the first multi-line error block in `lines`.
pub fn detect_multiline_error<S: AsRef<str>>(lines: &[S]) -> Option<Located> {
    for (index, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if line.trim().is_empty() {
            continue;
        }

        let Some(signature) = signature_patterns().iter().find(|sig| sig.is_match(line)) else {
            continue;
        };

        let start = index.saturating_sub(SIGNATURE_LEAD_LINES);
        let end = index.saturating_add(signature.context_size);
        let context = context_window(lines, start, end);

        // The first context lines are lead-in, not the block body.
        let message = context
            .iter()
            .skip(SIGNATURE_LEAD_LINES)
            .find(|ctx| contains_any(&ctx.to_lowercase(), REFINEMENT_MARKERS))
            .cloned()
            .unwrap_or_else(|| line.trim().to_string());

        tracing::debug!(
            line = index,
            signature = signature.name,
            context_lines = context.len(),
            "multi-line error block found"
        );
        return Some(Located {
            message,
            context,
            line: index,
            tier: Tier::Multiline,
        });
    }
    None
}
