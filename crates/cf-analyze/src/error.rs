//! Error types for analyzer configuration.
//!
//! Log analysis itself never fails; only loading and validating an
//! [`AnalysisConfig`](crate::AnalysisConfig) can.

use thiserror::Error;

/// Result type for analyzer setup operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;

/// Errors that can occur while configuring the analyzer.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    /// A configuration value is out of range.
    #[error("invalid value for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    /// I/O error reading or writing a config file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for the schema.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyzeError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        AnalyzeError::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Stable error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            AnalyzeError::InvalidConfig { .. } => 65,
            AnalyzeError::Io(_) => 60,
            AnalyzeError::Json(_) => 61,
        }
    }
}
