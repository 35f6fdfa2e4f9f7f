//! Input validation: make sure the user-supplied path is a readable PDF.
//!
//! pdfium reports a missing file, a permission problem, and a JPEG renamed to
//! `.pdf` as the same opaque load error. Checking existence, readability and
//! the `%PDF` magic bytes up front lets each case surface as its own
//! [`ResumeError`] variant with the path in the message.

use crate::error::{Outcome, ResumeError};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Validate that `path` exists, is readable, and starts with `%PDF`.
///
/// The probe handle is dropped before returning, on every path.
pub fn validate_pdf_path(path: &Path) -> Outcome<PathBuf> {
    let path = path.to_path_buf();

    let mut file = match File::open(&path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ResumeError::NotFound { path });
        }
        Err(e) => return Err(ResumeError::Io { path, source: e }),
    };

    if file.metadata().map(|m| m.is_dir()).unwrap_or(false) {
        return Err(ResumeError::MalformedInput {
            path,
            detail: "path is a directory".to_string(),
        });
    }

    let mut magic = [0u8; 4];
    match file.read_exact(&mut magic) {
        Ok(()) if &magic == PDF_MAGIC => {}
        Ok(()) => {
            return Err(ResumeError::MalformedInput {
                path,
                detail: format!("not a PDF header (first bytes: {magic:?})"),
            });
        }
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
            return Err(ResumeError::MalformedInput {
                path,
                detail: "file is too short to be a PDF".to_string(),
            });
        }
        Err(e) => return Err(ResumeError::Io { path, source: e }),
    }

    debug!("Validated PDF input: {}", path.display());
    Ok(path)
}

/// Default report location: `<stem>_extracted_report.<ext>` beside the input.
pub fn default_report_path(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume".to_string());
    let file_name = format!("{stem}_extracted_report.{extension}");
    match input.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(file_name),
        _ => PathBuf::from(file_name),
    }
}
