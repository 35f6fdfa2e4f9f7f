//! # resume-extract
//!
//! Extract structured candidate data from résumé PDFs with a Large Language
//! Model, then render it as indented JSON and as a report document.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input    check the file exists and starts with %PDF
//!  ├─ 2. Extract  concatenate page text via pdfium (spawn_blocking)
//!  ├─ 3. Prompt   embed the text in the fixed extraction template
//!  ├─ 4. LLM      one chat completion (gemini / openai / anthropic / …)
//!  ├─ 5. Parse    locate the JSON object in the reply and decode it
//!  └─ 6. Render   display JSON + PDF or Markdown report
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_extract::{extract_to_report, ExtractionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Provider resolved from GEMINI_API_KEY / EDGEQUAKE_LLM_PROVIDER / …
//!     let config = ExtractionConfig::default();
//!     let output = extract_to_report("resume.pdf", None, &config).await?;
//!     println!("{}", output.display_json);
//!     if let Some(path) = output.report_path {
//!         eprintln!("report: {}", path.display());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `resume-extract` binary (clap + anyhow + tracing-subscriber + dotenvy) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! resume-extract = { version = "0.1", default-features = false }
//! ```
//!
//! ## Credentials
//!
//! API keys are read from the environment only (a `.env` file is loaded by
//! the binary). A provider whose key is missing fails before any PDF work
//! starts, with [`ResumeError::ProviderNotConfigured`].

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod record;
pub mod report;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractionConfig, ExtractionConfigBuilder, DEFAULT_MODEL};
pub use error::{ErrorKind, Outcome, ResumeError};
pub use extract::{
    extract_from_text, extract_resume, extract_resume_sync, extract_resume_with,
    extract_to_report, inspect, resolve_provider,
};
pub use output::{ExtractionOutput, ExtractionStats};
pub use pipeline::extract::DocumentInfo;
pub use pipeline::llm::{LlmGenerator, TextGenerator};
pub use pipeline::parse::parse_response;
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback, Stage};
pub use record::{CandidateRecord, ContactDetails, EducationEntry, WorkEntry, NOT_AVAILABLE};
pub use report::{to_display_json, write_report, ReportFormat, ReportLabels, ReportOptions};
