//! Pipeline stages for résumé extraction.
//!
//! Each submodule implements exactly one step; the orchestration lives in
//! [`crate::extract`].
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ llm ──▶ parse
//! (path)    (pdfium)    (chat)  (JSON)
//! ```
//!
//! 1. [`input`]   — check the path names a readable file with a PDF header
//! 2. [`extract`] — pull page text; runs in `spawn_blocking` because pdfium
//!    is not async-safe
//! 3. [`llm`]     — one chat completion behind the [`llm::TextGenerator`]
//!    seam; the only stage with network I/O
//! 4. [`parse`]   — find the JSON object in the reply and decode it
//!
//! [`engine`] binds the pdfium library for both text extraction and PDF
//! report output.

pub mod engine;
pub mod extract;
pub mod input;
pub mod llm;
pub mod parse;
