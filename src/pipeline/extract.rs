//! Text extraction: pull the text layer out of every page via pdfium.
//!
//! pdfium is not async-safe, so the work runs inside `spawn_blocking`. The
//! [`Pdfium`] binding and the loaded document live only inside the blocking
//! closure and are dropped when it returns, whether it succeeded or not.

use crate::error::{Outcome, ResumeError};
use crate::pipeline::engine::bind_pdfium;
use crate::pipeline::input::validate_pdf_path;
use pdfium_render::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Basic facts about a PDF, available without any LLM call.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentInfo {
    pub page_count: usize,
    pub pdf_version: String,
    pub title: Option<String>,
    pub author: Option<String>,
}

/// Concatenate per-page text in page order with no separator.
///
/// A page whose extraction produced nothing (`None`) contributes `""`.
pub fn concat_page_texts<I>(pages: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    pages.into_iter().map(Option::unwrap_or_default).collect()
}

/// Extract the text of every page of `pdf_path`.
///
/// The path is validated first, so a missing file is
/// [`ResumeError::NotFound`] and a non-PDF is [`ResumeError::MalformedInput`]
/// whether or not pdfium is available.
pub async fn extract_text(pdf_path: &Path, password: Option<&str>) -> Outcome<String> {
    let path = validate_pdf_path(pdf_path)?;
    let pwd = password.map(|s| s.to_string());

    tokio::task::spawn_blocking(move || extract_text_blocking(&path, pwd.as_deref()))
        .await
        .map_err(|e| ResumeError::Internal(format!("Extraction task panicked: {}", e)))?
}

/// Blocking implementation of text extraction.
fn extract_text_blocking(pdf_path: &Path, password: Option<&str>) -> Outcome<String> {
    let pdfium = bind_pdfium()?;
    let document = load_document(&pdfium, pdf_path, password)?;

    let pages = document.pages();
    info!("PDF loaded: {} pages", pages.len());

    let texts = pages.iter().enumerate().map(|(idx, page)| match page.text() {
        Ok(text) => {
            let s = text.all();
            debug!("Page {}: {} chars", idx + 1, s.chars().count());
            Some(s)
        }
        Err(e) => {
            warn!("Page {}: no text layer ({:?})", idx + 1, e);
            None
        }
    });

    Ok(concat_page_texts(texts))
}

/// Read page count and metadata without extracting text.
pub async fn inspect_document(pdf_path: &Path, password: Option<&str>) -> Outcome<DocumentInfo> {
    let path = validate_pdf_path(pdf_path)?;
    let pwd = password.map(|s| s.to_string());

    tokio::task::spawn_blocking(move || inspect_blocking(&path, pwd.as_deref()))
        .await
        .map_err(|e| ResumeError::Internal(format!("Inspect task panicked: {}", e)))?
}

fn inspect_blocking(pdf_path: &Path, password: Option<&str>) -> Outcome<DocumentInfo> {
    let pdfium = bind_pdfium()?;
    let document = load_document(&pdfium, pdf_path, password)?;
    let metadata = document.metadata();

    let get_meta = |tag: PdfDocumentMetadataTagType| -> Option<String> {
        metadata.get(tag).and_then(|t| {
            let v = t.value().to_string();
            if v.is_empty() {
                None
            } else {
                Some(v)
            }
        })
    };

    Ok(DocumentInfo {
        page_count: document.pages().len() as usize,
        pdf_version: format!("{:?}", document.version()),
        title: get_meta(PdfDocumentMetadataTagType::Title),
        author: get_meta(PdfDocumentMetadataTagType::Author),
    })
}

/// Open a document, mapping pdfium's load errors onto the input taxonomy.
fn load_document<'a>(
    pdfium: &'a Pdfium,
    pdf_path: &Path,
    password: Option<&'a str>,
) -> Outcome<PdfDocument<'a>> {
    pdfium
        .load_pdf_from_file(pdf_path, password)
        .map_err(|e| load_error(pdf_path.to_path_buf(), format!("{:?}", e), password.is_some()))
}

fn load_error(path: PathBuf, err_str: String, had_password: bool) -> ResumeError {
    let detail = if err_str.contains("Password") || err_str.contains("password") {
        if had_password {
            "wrong password for encrypted PDF".to_string()
        } else {
            "PDF is encrypted; provide a password with --password".to_string()
        }
    } else {
        format!("corrupt or unsupported PDF ({err_str})")
    };
    ResumeError::MalformedInput { path, detail }
}
