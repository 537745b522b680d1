//! Log sanitization.
//!
//! Turns a raw CI log into clean lines:
//! 1. Strip Buildkite out-of-band escape blocks
//! 2. Strip ANSI/terminal escape sequences
//! 3. Strip Buildkite timestamp prefixes, repeating 1-3 until stable
//! 4. Treat `\r\n` and bare `\r` as line ends
//! 5. Trim lines, dropping blank and marker-only lines

use crate::patterns::{
    ANSI_ESCAPE, ARTIFACT_LINE, STRAY_ESCAPE, VENDOR_ESCAPE, VENDOR_TIMESTAMP,
};

fn strip_pass(text: &str) -> String {
    let text = VENDOR_ESCAPE.replace_all(text, "");
    let text = ANSI_ESCAPE.replace_all(&text, "");
    let text = VENDOR_TIMESTAMP.replace_all(&text, "");
    text.into_owned()
}

/// Remove escape sequences and vendor timestamps, leaving line structure intact.
///
/// A removal can join its neighbours into a new sequence (`ESC [ ESC [0m 31m`),
/// so passes repeat until nothing matches. Lone ESC bytes go only once no
/// full sequence is left, since they may sit inside one.
pub fn strip_escapes(raw: &str) -> String {
    let mut text = raw.to_string();
    loop {
        // Every pass only removes, so an unchanged length means no match.
        let stripped = strip_pass(&text);
        if stripped.len() != text.len() {
            text = stripped;
            continue;
        }

        let stripped = STRAY_ESCAPE.replace_all(&text, "").into_owned();
        if stripped.len() == text.len() {
            return text;
        }
        text = stripped;
    }
}

/// True if a trimmed line is nothing but section markers.
pub fn is_artifact_line(line: &str) -> bool {
    ARTIFACT_LINE.is_match(line.trim())
}

/// Sanitize a raw log into ordered, trimmed, non-blank lines.
pub fn sanitize_log(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let text = strip_escapes(raw);

    // The empty piece between `\r` and `\n` is dropped with the blank lines.
    let lines: Vec<String> = text
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_artifact_line(line))
        .map(str::to_string)
        .collect();

    tracing::trace!(
        input_bytes = raw.len(),
        clean_lines = lines.len(),
        "sanitized log"
    );
    lines
}
