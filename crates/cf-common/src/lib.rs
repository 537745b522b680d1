//! CI failure analysis shared types.
//!
//! This crate holds the records exchanged between the analysis pipeline and
//! its collaborators:
//! - The analysis result and its JSON wire shape
//! - The per-job failure record built from an analysis
//! - Decoding of raw log payloads handed over by log retrieval

pub mod job;
pub mod payload;
pub mod result;

pub use job::JobFailure;
pub use payload::{decode_log_bytes, log_text_from_response};
pub use result::{LogAnalysisResult, Tier};
