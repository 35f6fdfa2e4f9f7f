//! Binding to the pdfium shared library.
//!
//! Both text extraction and PDF report generation need a live [`Pdfium`]
//! handle. Resolution order:
//!
//! 1. `PDFIUM_LIB_PATH` — explicit path to `libpdfium.{so,dylib}` / `pdfium.dll`
//! 2. the platform library name in the current working directory
//! 3. the system library search path
//!
//! Binding is cheap once the OS has the library mapped, so each blocking task
//! binds its own handle instead of sharing one behind a global.

use crate::error::{Outcome, ResumeError};
use pdfium_render::prelude::*;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable naming an explicit pdfium library path.
pub const PDFIUM_LIB_PATH_ENV: &str = "PDFIUM_LIB_PATH";

/// Bind to pdfium following the resolution order in the module docs.
pub fn bind_pdfium() -> Outcome<Pdfium> {
    if let Ok(p) = std::env::var(PDFIUM_LIB_PATH_ENV) {
        if !p.is_empty() {
            let path = PathBuf::from(p);
            debug!("Binding pdfium from {}", path.display());
            return Pdfium::bind_to_library(&path)
                .map(Pdfium::new)
                .map_err(|e| {
                    ResumeError::PdfiumBindingFailed(format!("'{}': {}", path.display(), e))
                });
        }
    }

    let local = Pdfium::pdfium_platform_library_name_at_path("./");
    Pdfium::bind_to_library(&local)
        .or_else(|_| Pdfium::bind_to_system_library())
        .map(Pdfium::new)
        .map_err(|e| ResumeError::PdfiumBindingFailed(e.to_string()))
}
