//! Output types returned by the extraction entry points.

use crate::record::CandidateRecord;
use serde::Serialize;
use std::path::PathBuf;

/// Everything one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutput {
    /// The decoded résumé.
    pub record: CandidateRecord,
    /// `record` as indented JSON, ready to print.
    pub display_json: String,
    /// Where the report document was written, if one was requested.
    pub report_path: Option<PathBuf>,
    pub stats: ExtractionStats,
}

/// Timing and size figures for one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExtractionStats {
    /// Characters of text pulled from the PDF.
    pub text_chars: usize,
    /// Bytes of raw model output.
    pub response_bytes: usize,
    pub extract_duration_ms: u64,
    pub llm_duration_ms: u64,
    pub total_duration_ms: u64,
}
