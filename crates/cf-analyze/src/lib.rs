//! CI log failure extraction.
//!
//! Turns a raw build log into three answers: the command that failed, a
//! single-line error message, and a few lines of surrounding context.
//!
//! # Pipeline
//!
//! ```text
//! raw log → sanitize → failing command
//!                    → locate (patterns → exit phrases → keywords)
//!                    → multi-line signatures (when nothing or too little was found)
//!                    → fallback keyword scan (when still nothing)
//! ```
//!
//! Every stage is total. A log with no recognizable failure yields an empty
//! [`LogAnalysisResult`], never an error.
//!
//! ```
//! let result = cf_analyze::analyze("+ cargo test\nerror: could not compile `app`");
//! assert_eq!(result.failing_command.as_deref(), Some("cargo test"));
//! assert!(result.error_message.is_some());
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod fallback;
pub mod locate;
pub mod logging;
pub mod multiline;
pub mod patterns;
pub mod pipeline;
pub mod sanitize;

pub use cf_common::{JobFailure, LogAnalysisResult, Tier};
pub use command::extract_failing_command;
pub use config::AnalysisConfig;
pub use error::{AnalyzeError, Result};
pub use fallback::scan_fallback;
pub use locate::{locate_error, Located};
pub use multiline::detect_multiline_error;
pub use pipeline::LogAnalyzer;
pub use sanitize::sanitize_log;

use once_cell::sync::Lazy;

static DEFAULT_ANALYZER: Lazy<LogAnalyzer> = Lazy::new(LogAnalyzer::with_defaults);

/// Analyze a log with the default configuration.
pub fn analyze(raw: &str) -> LogAnalysisResult {
    DEFAULT_ANALYZER.analyze(raw)
}

/// Analyze raw log bytes with the default configuration; invalid UTF-8 is replaced.
pub fn analyze_bytes(raw: &[u8]) -> LogAnalysisResult {
    DEFAULT_ANALYZER.analyze_bytes(raw)
}
