//! Analysis result record.
//!
//! The serialized field names of [`LogAnalysisResult`] are the wire contract
//! consumed by renderers and JSON output, so they must not change.

use serde::{Deserialize, Serialize};

/// Stage of the extraction cascade that produced an error message.
///
/// Ordered from most to least specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// A single-line error pattern from the catalog matched.
    SpecificPattern,
    /// A process-termination phrase ("exit code", "command failed").
    ExitStatus,
    /// A generic failure keyword ("unable to", "not found").
    FailureKeyword,
    /// A multi-line error signature (stack trace, tool error block).
    Multiline,
    /// Keyword-scored last resort.
    Fallback,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::SpecificPattern => "specific_pattern",
            Tier::ExitStatus => "exit_status",
            Tier::FailureKeyword => "failure_keyword",
            Tier::Multiline => "multiline",
            Tier::Fallback => "fallback",
        }
    }

    /// Whether the message came from a keyword heuristic rather than a pattern.
    pub fn is_low_confidence(&self) -> bool {
        matches!(self, Tier::FailureKeyword | Tier::Fallback)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured failure information extracted from one build log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogAnalysisResult {
    /// Shell command that was running when the build failed.
    pub failing_command: Option<String>,

    /// Best single-line root-cause message.
    pub error_message: Option<String>,

    /// Non-blank lines around the error, in log order.
    #[serde(default)]
    pub error_context: Vec<String>,

    /// Which stage produced `error_message`. Not part of the wire format.
    #[serde(skip)]
    pub tier: Option<Tier>,
}

impl LogAnalysisResult {
    /// A result with nothing found.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_error(&self) -> bool {
        self.error_message.is_some()
    }

    /// True when neither a command nor an error was found.
    pub fn is_empty(&self) -> bool {
        self.failing_command.is_none()
            && self.error_message.is_none()
            && self.error_context.is_empty()
    }
}
