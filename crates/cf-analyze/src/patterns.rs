//! Pattern catalog for log sanitization and failure extraction.
//!
//! Every group is an ordered slice: earlier entries win over later ones
//! regardless of where in a line or log they match. The catalog is compiled
//! lazily on first use and is read-only afterwards.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// ============================================================================
// Sanitizer patterns
// ============================================================================

/// Buildkite out-of-band blocks: `ESC _ bk;... BEL`, on a single line.
pub(crate) static VENDOR_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1B_[^\x07\r\n]*\x07").unwrap());

/// CSI sequences and two-byte Fe escapes. Runs after [`VENDOR_ESCAPE`], so
/// an `ESC _` still present here is the introducer of a cut-off block.
pub(crate) static ANSI_ESCAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])").unwrap());

/// Buildkite timestamp prefixes such as `bk;t=1752684001018$`.
pub(crate) static VENDOR_TIMESTAMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"bk;t=\d+\$?[ \t]*").unwrap());

/// An ESC that starts no recognizable sequence.
pub(crate) static STRAY_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1B").unwrap());

/// Lines that are only section markers. Matched against trimmed lines.
pub(crate) static ARTIFACT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\+\+\+|---|~~~|===|\^\^\^\s*\+\+\+)$").unwrap());

// ============================================================================
// Command patterns
// ============================================================================

/// A command-detection pattern. Capture group 1 holds the command.
pub struct CommandPattern {
    pub name: &'static str,
    regex: Lazy<Regex>,
}

impl CommandPattern {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// The trimmed command captured from `line`, if the pattern matches.
    pub fn capture<'a>(&self, line: &'a str) -> Option<&'a str> {
        self.regex
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    }
}

// Explicit shell markers first, then named tools found anywhere in a line.
static COMMAND_PATTERNS: [CommandPattern; 13] = [
    CommandPattern {
        name: "plus_prefix",
        regex: Lazy::new(|| Regex::new(r"^\+ (.+)$").unwrap()),
    },
    CommandPattern {
        name: "dollar_prefix",
        regex: Lazy::new(|| Regex::new(r"^\$ (.+)$").unwrap()),
    },
    CommandPattern {
        name: "clyde",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(clyde\s+.+)$").unwrap()),
    },
    CommandPattern {
        name: "bazel",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(bazel\s+.+)$").unwrap()),
    },
    CommandPattern {
        name: "npm_run",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(npm\s+run\s+.+)$").unwrap()),
    },
    CommandPattern {
        name: "python_module",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(python\s+-m\s+.+)$").unwrap()),
    },
    CommandPattern {
        name: "pytest",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(pytest\s+.+)$").unwrap()),
    },
    CommandPattern {
        name: "mypy",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(mypy\s+.+)$").unwrap()),
    },
    CommandPattern {
        name: "ruff",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(ruff\s+.+)$").unwrap()),
    },
    CommandPattern {
        name: "make",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(make\s+.+)$").unwrap()),
    },
    CommandPattern {
        name: "cargo",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(cargo\s+.+)$").unwrap()),
    },
    CommandPattern {
        name: "go_build",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(go\s+build\s+.+)$").unwrap()),
    },
    CommandPattern {
        name: "docker_run",
        regex: Lazy::new(|| Regex::new(r"(?i)(?:^|\s)(docker\s+run\s+.+)$").unwrap()),
    },
];

/// Prefixes that mark a captured "command" as a section header instead.
pub(crate) const COMMAND_REJECT_PREFIXES: &[&str] = &["---", "==="];

/// Log-level word that shows up in bogus commands like `make[1]: INFO ...`.
pub(crate) const COMMAND_REJECT_WORD: &str = "info";

/// How many leading chars of a command are checked for [`COMMAND_REJECT_WORD`].
pub(crate) const COMMAND_REJECT_SCAN_CHARS: usize = 10;

// ============================================================================
// Single-line error patterns (tier 1)
// ============================================================================

/// How an error pattern turns a match into a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// The whole trimmed line is the message.
    WholeLine,
    /// The last non-empty capture group is the message, falling back to the
    /// whole line when no group captured anything or the fragment is too short.
    CaptureGroups,
}

/// A single-line error pattern.
pub struct ErrorPattern {
    pub name: &'static str,
    pub extraction: Extraction,
    regex: Lazy<Regex>,
}

impl ErrorPattern {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn captures<'a>(&self, line: &'a str) -> Option<Captures<'a>> {
        self.regex.captures(line)
    }
}

/// A fragment shorter than this share of the line is replaced by the line.
pub(crate) const MIN_FRAGMENT_RATIO: f64 = 0.5;

static ERROR_PATTERNS: [ErrorPattern; 21] = [
    // Named error prefixes and exception types
    ErrorPattern {
        name: "error_prefix",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*Error: (.+)").unwrap()),
    },
    ErrorPattern {
        name: "node_module_not_found",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r#"(?i).*cannot find module ['"](.+)['"]"#).unwrap()),
    },
    ErrorPattern {
        name: "python_module_not_found",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*modulenotfounderror: (.+)").unwrap()),
    },
    ErrorPattern {
        name: "python_syntax_error",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*syntaxerror: (.+)").unwrap()),
    },
    ErrorPattern {
        name: "python_import_error",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*importerror: (.+)").unwrap()),
    },
    ErrorPattern {
        name: "python_type_error",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*typeerror: (.+)").unwrap()),
    },
    ErrorPattern {
        name: "python_value_error",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*valueerror: (.+)").unwrap()),
    },
    ErrorPattern {
        name: "python_key_error",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*keyerror: (.+)").unwrap()),
    },
    ErrorPattern {
        name: "python_attribute_error",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*attributeerror: (.+)").unwrap()),
    },
    // Build tool failures
    ErrorPattern {
        name: "bazel_failed",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*bazel.*failed(.+)").unwrap()),
    },
    ErrorPattern {
        name: "npm_failed",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*npm.*failed(.+)").unwrap()),
    },
    ErrorPattern {
        name: "compilation_failed",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*compilation failed(.+)").unwrap()),
    },
    ErrorPattern {
        name: "test_failed",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*test failed(.+)").unwrap()),
    },
    ErrorPattern {
        name: "build_failed",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*build failed(.+)").unwrap()),
    },
    ErrorPattern {
        name: "command_failed",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*command failed(.+)").unwrap()),
    },
    // Termination
    ErrorPattern {
        name: "exit_code",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*process exited with.*code (\d+)").unwrap()),
    },
    ErrorPattern {
        name: "killed_by_signal",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*killed.*signal (\d+)").unwrap()),
    },
    ErrorPattern {
        name: "timeout_after",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*timeout.*after (\d+)").unwrap()),
    },
    // Generic fallbacks
    ErrorPattern {
        name: "generic_error",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*(error|fail|exception|fatal):\s*(.+)").unwrap()),
    },
    ErrorPattern {
        name: "siren_error",
        extraction: Extraction::CaptureGroups,
        regex: Lazy::new(|| Regex::new(r"(?i).*🚨\s*Error:\s*(.+)").unwrap()),
    },
    ErrorPattern {
        name: "buildkite_marker",
        extraction: Extraction::WholeLine,
        regex: Lazy::new(|| Regex::new(r".*\^\^\^\s*\+\+\+.*").unwrap()),
    },
];

// ============================================================================
// Phrase lists (tiers 2 and 3)
// ============================================================================

/// Process termination phrases. Lowercase.
pub(crate) const EXIT_STATUS_PHRASES: &[&str] =
    &["exited with status", "exit code", "command failed"];

/// Generic failure indicators. Lowercase.
pub(crate) const FAILURE_INDICATORS: &[&str] = &[
    "targets failed",
    "failed to",
    "unable to",
    "cannot",
    "missing",
    "not found",
    "permission denied",
    "access denied",
    "timeout",
    "connection refused",
    "network error",
    "socket error",
];

/// A line with one of these is not a failure even if it has an indicator.
pub(crate) const SUCCESS_INDICATORS: &[&str] = &["all checks passed", "success", "completed"];

// ============================================================================
// Multi-line error signatures
// ============================================================================

/// A pattern marking the start of a multi-line error block.
pub struct SignaturePattern {
    pub name: &'static str,
    /// Lines after the signature line to include in the context.
    pub context_size: usize,
    regex: Lazy<Regex>,
}

impl SignaturePattern {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// Lines of lead-in kept before a signature line.
pub(crate) const SIGNATURE_LEAD_LINES: usize = 2;

static SIGNATURE_PATTERNS: [SignaturePattern; 7] = [
    SignaturePattern {
        name: "python_traceback",
        context_size: 10,
        regex: Lazy::new(|| Regex::new(r"(?i)Traceback \(most recent call last\):").unwrap()),
    },
    SignaturePattern {
        name: "node_module_not_found",
        context_size: 5,
        regex: Lazy::new(|| Regex::new(r"(?i)Error: Cannot find module").unwrap()),
    },
    SignaturePattern {
        name: "bazel_error",
        context_size: 8,
        regex: Lazy::new(|| Regex::new(r"(?i)ERROR: .*").unwrap()),
    },
    SignaturePattern {
        name: "npm_error",
        context_size: 5,
        regex: Lazy::new(|| Regex::new(r"(?i)npm ERR!|pnpm ERR!").unwrap()),
    },
    SignaturePattern {
        name: "build_failed",
        context_size: 7,
        regex: Lazy::new(|| Regex::new(r"(?i)FAILED: ").unwrap()),
    },
    SignaturePattern {
        name: "test_failed",
        context_size: 6,
        regex: Lazy::new(|| Regex::new(r"(?i)FAIL .*").unwrap()),
    },
    SignaturePattern {
        name: "compiler_error",
        context_size: 5,
        regex: Lazy::new(|| Regex::new(r"(?i)error: .*").unwrap()),
    },
];

/// Markers of an informative line inside a multi-line block. Lowercase.
pub(crate) const REFINEMENT_MARKERS: &[&str] = &["error:", "failed", "cannot"];

// ============================================================================
// Fallback scan
// ============================================================================

/// Keywords that make a line a fallback candidate. Lowercase.
pub(crate) const FALLBACK_KEYWORDS: &[&str] = &[
    "error",
    "fail",
    "exception",
    "cannot",
    "unable",
    "missing",
    "not found",
    "denied",
    "timeout",
    "refused",
];

/// Low-severity log prefixes excluded from the fallback scan. Case-sensitive.
pub(crate) const LOW_SEVERITY_PREFIXES: &[&str] = &["INFO", "DEBUG"];

// ============================================================================
// Accessors
// ============================================================================

/// Command patterns in priority order.
pub fn command_patterns() -> &'static [CommandPattern] {
    &COMMAND_PATTERNS
}

/// Single-line error patterns in priority order.
pub fn error_patterns() -> &'static [ErrorPattern] {
    &ERROR_PATTERNS
}

/// Multi-line signatures in priority order.
pub fn signature_patterns() -> &'static [SignaturePattern] {
    &SIGNATURE_PATTERNS
}

/// True if any lowercase `needles` entry occurs in `haystack_lower`.
pub(crate) fn contains_any(haystack_lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack_lower.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for p in command_patterns() {
            assert!(p.regex().captures_len() >= 2, "{} needs a capture group", p.name);
        }
        for p in error_patterns() {
            let _ = p.regex();
        }
        for p in signature_patterns() {
            let _ = p.regex();
        }
        Lazy::force(&ANSI_ESCAPE);
        Lazy::force(&VENDOR_ESCAPE);
        Lazy::force(&VENDOR_TIMESTAMP);
        Lazy::force(&STRAY_ESCAPE);
        Lazy::force(&ARTIFACT_LINE);
    }

    #[test]
    fn test_extraction_matches_groups() {
        for p in error_patterns() {
            let has_groups = p.regex().captures_len() > 1;
            match p.extraction {
                Extraction::WholeLine => assert!(!has_groups, "{} has groups", p.name),
                Extraction::CaptureGroups => assert!(has_groups, "{} has no groups", p.name),
            }
        }
    }

    #[test]
    fn test_signature_context_sizes() {
        let sizes: Vec<usize> = signature_patterns().iter().map(|p| p.context_size).collect();
        assert_eq!(sizes, vec![10, 5, 8, 5, 7, 6, 5]);
    }

    #[test]
    fn test_command_capture() {
        let plus = &command_patterns()[0];
        assert_eq!(plus.capture("+ make build "), Some("make build"));
        assert_eq!(plus.capture("make build"), None);

        let cargo = command_patterns().iter().find(|p| p.name == "cargo").unwrap();
        assert_eq!(cargo.capture("Running: CARGO test --all"), Some("CARGO test --all"));
        assert_eq!(cargo.capture("subcargo test"), None);
    }

    #[test]
    fn test_artifact_line() {
        for line in ["+++", "---", "~~~", "===", "^^^ +++", "^^^+++"] {
            assert!(ARTIFACT_LINE.is_match(line), "{line}");
        }
        for line in ["--- :rust: Build", "++++", "+ make", "== ="] {
            assert!(!ARTIFACT_LINE.is_match(line), "{line}");
        }
    }

    #[test]
    fn test_contains_any() {
        assert!(contains_any("error: unable to connect", FAILURE_INDICATORS));
        assert!(!contains_any("all good", FAILURE_INDICATORS));
    }
}
