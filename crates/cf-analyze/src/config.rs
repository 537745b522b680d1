//! Analyzer configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config file.

use crate::{AnalyzeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Lines taken on each side of a single-line error.
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,

    /// A context shorter than this sends the log through the multi-line detector.
    #[serde(default = "default_min_context_lines")]
    pub min_context_lines: usize,

    /// Let a multi-line block replace an already found message whose context
    /// is short. When false, the multi-line detector runs only if nothing
    /// was found.
    #[serde(default = "default_true")]
    pub replace_short_matches: bool,

    /// Fallback lines must be longer than this many chars.
    #[serde(default = "default_fallback_min_line_len")]
    pub fallback_min_line_len: usize,

    /// Maximum number of fallback context lines.
    #[serde(default = "default_fallback_max_context")]
    pub fallback_max_context: usize,

    /// Analyze only the trailing bytes of larger logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_input_bytes: Option<usize>,
}

fn default_context_radius() -> usize {
    5
}

fn default_min_context_lines() -> usize {
    3
}

fn default_true() -> bool {
    true
}

fn default_fallback_min_line_len() -> usize {
    10
}

fn default_fallback_max_context() -> usize {
    10
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            context_radius: default_context_radius(),
            min_context_lines: default_min_context_lines(),
            replace_short_matches: true,
            fallback_min_line_len: default_fallback_min_line_len(),
            fallback_max_context: default_fallback_max_context(),
            max_input_bytes: None,
        }
    }
}

impl AnalysisConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load and validate a config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the config to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check that the values can produce a meaningful analysis.
    pub fn validate(&self) -> Result<()> {
        if self.context_radius == 0 {
            return Err(AnalyzeError::invalid("context_radius", "must be > 0"));
        }
        if self.fallback_max_context == 0 {
            return Err(AnalyzeError::invalid("fallback_max_context", "must be > 0"));
        }
        if self.max_input_bytes == Some(0) {
            return Err(AnalyzeError::invalid("max_input_bytes", "must be > 0 when set"));
        }
        let widest = self.context_radius.saturating_mul(2);
        if self.min_context_lines > widest {
            return Err(AnalyzeError::invalid(
                "min_context_lines",
                format!(
                    "{} can never be reached with context_radius {} (max window {})",
                    self.min_context_lines, self.context_radius, widest
                ),
            ));
        }
        Ok(())
    }
}
