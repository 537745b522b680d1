//! Analysis pipeline.
//!
//! Fixed stage order, no branching on log type:
//! sanitize → command → locate → multi-line (if short or empty) → fallback
//! (if still empty). No stage can fail the analysis; every miss is `None`.

use crate::command::extract_failing_command;
use crate::fallback::scan_fallback;
use crate::locate::{locate_error, Located};
use crate::multiline::detect_multiline_error;
use crate::sanitize::sanitize_log;
use crate::{AnalysisConfig, Result};
use cf_common::{decode_log_bytes, LogAnalysisResult};

/// Failure extractor for CI build logs.
///
/// Holds only immutable configuration, so one analyzer can be shared across
/// threads and used for any number of logs.
#[derive(Debug, Clone, Default)]
pub struct LogAnalyzer {
    config: AnalysisConfig,
}

impl LogAnalyzer {
    /// Create an analyzer after validating `config`.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Extract the failing command, error message, and error context from a raw log.
    pub fn analyze(&self, raw: &str) -> LogAnalysisResult {
        let raw = self.cap_input(raw);
        let lines = sanitize_log(raw);

        let failing_command = extract_failing_command(&lines);
        let located = self.locate(&lines);

        match located {
            Some(found) => {
                tracing::debug!(
                    tier = %found.tier,
                    line = found.line,
                    context_lines = found.context.len(),
                    "analysis complete"
                );
                LogAnalysisResult {
                    failing_command,
                    error_message: Some(found.message),
                    error_context: found.context,
                    tier: Some(found.tier),
                }
            }
            None => {
                tracing::debug!(clean_lines = lines.len(), "no error found");
                LogAnalysisResult {
                    failing_command,
                    ..LogAnalysisResult::empty()
                }
            }
        }
    }

    /// Decode bytes permissively, then analyze.
    pub fn analyze_bytes(&self, raw: &[u8]) -> LogAnalysisResult {
        self.analyze(&decode_log_bytes(raw))
    }

    fn locate(&self, lines: &[String]) -> Option<Located> {
        let mut located = locate_error(lines, self.config.context_radius);

        if self.needs_multiline(located.as_ref()) {
            if let Some(block) = detect_multiline_error(lines) {
                if located.is_some() {
                    tracing::debug!(
                        block_line = block.line,
                        "multi-line block replaces short single-line match"
                    );
                }
                located = Some(block);
            }
        }

        located.or_else(|| {
            scan_fallback(
                lines,
                self.config.fallback_min_line_len,
                self.config.fallback_max_context,
            )
        })
    }

    fn needs_multiline(&self, located: Option<&Located>) -> bool {
        match located {
            None => true,
            Some(found) => {
                self.config.replace_short_matches
                    && found.context.len() < self.config.min_context_lines
            }
        }
    }

    /// Keep only the tail of an oversized log, starting at a full line.
    fn cap_input<'a>(&self, raw: &'a str) -> &'a str {
        let Some(max) = self.config.max_input_bytes else {
            return raw;
        };
        if raw.len() <= max {
            return raw;
        }

        let mut start = raw.len() - max;
        while !raw.is_char_boundary(start) {
            start += 1;
        }
        let tail = &raw[start..];

        let at_line_start = raw[..start].ends_with(['\n', '\r']);
        let tail = match tail.find('\n') {
            Some(pos) if !at_line_start => &tail[pos + 1..],
            _ => tail,
        };

        tracing::debug!(
            input_bytes = raw.len(),
            kept_bytes = tail.len(),
            "log capped to trailing bytes"
        );
        tail
    }
}
