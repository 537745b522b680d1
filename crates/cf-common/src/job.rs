//! Per-job failure record.

use crate::LogAnalysisResult;
use serde::{Deserialize, Serialize};

fn default_job_name() -> String {
    "Unknown job".to_string()
}

/// A failed CI job and what its log analysis found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFailure {
    pub job_id: String,

    #[serde(default = "default_job_name")]
    pub job_name: String,

    #[serde(default)]
    pub failing_command: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub error_context: Vec<String>,
}

impl JobFailure {
    /// A failed job whose log has not been analyzed yet.
    pub fn new(job_id: impl Into<String>, job_name: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            job_name: job_name.into(),
            failing_command: None,
            error_message: None,
            error_context: Vec::new(),
        }
    }

    /// A failed job together with the analysis of its log.
    pub fn with_analysis(
        job_id: impl Into<String>,
        job_name: impl Into<String>,
        analysis: LogAnalysisResult,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            job_name: job_name.into(),
            failing_command: analysis.failing_command,
            error_message: analysis.error_message,
            error_context: analysis.error_context,
        }
    }

    pub fn is_analyzed(&self) -> bool {
        self.failing_command.is_some()
            || self.error_message.is_some()
            || !self.error_context.is_empty()
    }
}
