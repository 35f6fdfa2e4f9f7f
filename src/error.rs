//! Error types for the resume-extract library.
//!
//! Every pipeline stage returns an [`Outcome`]: either its success payload or
//! a [`ResumeError`] describing what went wrong. No stage panics or lets a
//! failure escape untagged; surfaces (the CLI, a GUI, a service) match on
//! [`ResumeError::kind`] and print the `Display` message, which always carries
//! the underlying cause and, for decode failures, the raw model output.

use std::path::PathBuf;
use thiserror::Error;

/// Result of a pipeline stage: the payload or a tagged error.
pub type Outcome<T> = Result<T, ResumeError>;

/// All errors returned by the resume-extract library.
#[derive(Debug, Error)]
pub enum ResumeError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    NotFound { path: PathBuf },

    /// The file exists but is not a parseable PDF (bad magic, corrupt
    /// xref/trailer, or an encrypted document we could not open).
    #[error("Cannot read '{path}' as a PDF: {detail}")]
    MalformedInput { path: PathBuf, detail: String },

    /// Any other I/O failure while reading the input.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The PDF yielded no extractable text (scanned image, empty document).
    #[error("no text to process")]
    EmptyInput,

    // ── LLM errors ────────────────────────────────────────────────────────
    /// The configured provider is not initialised (missing API key etc.).
    #[error("LLM provider '{provider}' is not configured.\n{hint}")]
    ProviderNotConfigured { provider: String, hint: String },

    /// The generation call failed or returned an error payload.
    #[error("LLM API error: {message}")]
    Api { message: String },

    /// The response held no locatable, decodable JSON résumé.
    #[error("Could not decode the model response as JSON: {message}\nRaw response:\n{raw}")]
    Decode { message: String, raw: String },

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not create or write the report document.
    #[error("Failed to write report '{path}': {detail}")]
    Render { path: PathBuf, detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\n\
Set PDFIUM_LIB_PATH=/path/to/libpdfium, or place the library next to the\n\
executable or on the system library path.\n"
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`ResumeError`], for surfaces that pick a
/// title or exit code per failure domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum ErrorKind {
    NotFound,
    MalformedInput,
    IoError,
    EmptyInput,
    ApiError,
    DecodeError,
    RenderError,
    ConfigError,
    /// A bug or a crashed task, not something the caller can fix.
    Internal,
}

impl ResumeError {
    /// The failure domain this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResumeError::NotFound { .. } => ErrorKind::NotFound,
            ResumeError::MalformedInput { .. } => ErrorKind::MalformedInput,
            ResumeError::Io { .. } => ErrorKind::IoError,
            ResumeError::EmptyInput => ErrorKind::EmptyInput,
            ResumeError::Api { .. } => ErrorKind::ApiError,
            ResumeError::Decode { .. } => ErrorKind::DecodeError,
            ResumeError::Render { .. } => ErrorKind::RenderError,
            ResumeError::ProviderNotConfigured { .. }
            | ResumeError::InvalidConfig(_)
            | ResumeError::PdfiumBindingFailed(_) => ErrorKind::ConfigError,
            ResumeError::Internal(_) => ErrorKind::Internal,
        }
    }
}
