//! Report rendering for a decoded [`CandidateRecord`].
//!
//! Two independent outputs come from the same record:
//!
//! * **Display** — [`to_display_json`], indented JSON for a terminal or text
//!   widget. Non-ASCII text is kept verbatim.
//! * **Document** — [`write_report`], a paginated report file built from
//!   [`layout::layout`] and written as PDF ([`pdf`]) or Markdown
//!   ([`markdown`]).
//!
//! Documents are written to a temporary file in the destination directory and
//! renamed into place, so a failed render never leaves a half-written report
//! behind.

pub mod layout;
pub mod markdown;
pub mod metrics;
pub mod pdf;

use crate::error::{Outcome, ResumeError};
use crate::record::CandidateRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Output format of the report document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportFormat {
    /// Paginated PDF rendered with pdfium. (default)
    #[default]
    Pdf,
    /// Plain UTF-8 Markdown.
    Markdown,
}

impl ReportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Markdown => "md",
        }
    }

    /// Pick a format from an output path: `.md` / `.markdown` mean Markdown,
    /// everything else PDF.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("md") | Some("markdown") => ReportFormat::Markdown,
            _ => ReportFormat::Pdf,
        }
    }
}

/// Title and headings printed in reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLabels {
    pub title: String,
    pub candidate_name: String,
    pub contact: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub institution: String,
    pub dates: String,
    pub work_experience: String,
    /// Joins role and company: "Engineer at Acme".
    pub at: String,
    pub skills: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            title: "Résumé Extraction Report".into(),
            candidate_name: "Candidate name".into(),
            contact: "Contact details".into(),
            email: "Email".into(),
            phone: "Phone".into(),
            education: "Education".into(),
            institution: "Institution".into(),
            dates: "Dates".into(),
            work_experience: "Work experience".into(),
            at: "at".into(),
            skills: "Skills".into(),
        }
    }
}

/// Serialise `record` as 2-space indented JSON with non-ASCII kept verbatim.
pub fn to_display_json(record: &CandidateRecord) -> Outcome<String> {
    serde_json::to_string_pretty(record)
        .map_err(|e| ResumeError::Internal(format!("Failed to serialise record: {e}")))
}

/// Options for [`write_report`].
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    pub format: ReportFormat,
    pub labels: ReportLabels,
    /// TrueType font for PDF output; Helvetica when None.
    pub font: Option<PathBuf>,
}

/// Render `record` to `path` and return the path written.
///
/// # Errors
/// [`ResumeError::Render`] for any failure creating, filling or moving the
/// document into place.
pub fn write_report(record: &CandidateRecord, path: &Path, options: &ReportOptions) -> Outcome<PathBuf> {
    let lines = layout::layout(record, &options.labels);

    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| render_error(path, e))?;

    let tmp = tempfile::Builder::new()
        .prefix(".report-")
        .suffix(&format!(".{}", options.format.extension()))
        .tempfile_in(&dir)
        .map_err(|e| render_error(path, e))?;

    match options.format {
        ReportFormat::Markdown => markdown::write_markdown(&lines, tmp.path()),
        ReportFormat::Pdf => pdf::write_pdf(&lines, tmp.path(), options.font.as_deref()),
    }
    .map_err(|detail| ResumeError::Render {
        path: path.to_path_buf(),
        detail,
    })?;

    tmp.persist(path).map_err(|e| render_error(path, e.error))?;

    info!("Report written: {}", path.display());
    Ok(path.to_path_buf())
}

fn render_error(path: &Path, e: impl std::fmt::Display) -> ResumeError {
    ResumeError::Render {
        path: path.to_path_buf(),
        detail: e.to_string(),
    }
}
