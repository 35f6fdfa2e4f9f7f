//! Progress-callback trait for pipeline stage events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to be told
//! when each stage starts, finishes, or fails. The LLM call can take tens of
//! seconds; a surface uses these events to animate a spinner or a status line
//! while the pipeline itself stays strictly sequential.
//!
//! # Example
//!
//! ```rust
//! use resume_extract::{ExtractionConfig, ExtractionProgressCallback, Stage};
//! use std::sync::Arc;
//!
//! struct Log;
//!
//! impl ExtractionProgressCallback for Log {
//!     fn on_stage_start(&self, stage: Stage) {
//!         eprintln!("{}…", stage.label());
//!     }
//! }
//!
//! let config = ExtractionConfig::builder()
//!     .progress_callback(Arc::new(Log) as Arc<dyn ExtractionProgressCallback>)
//!     .build()
//!     .unwrap();
//! ```

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// One step of the extraction pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    /// Reading the PDF text layer.
    Extract,
    /// Waiting on the generation API.
    Generate,
    /// Locating and decoding the JSON reply.
    Parse,
    /// Writing the report document.
    Render,
}

impl Stage {
    /// Short human-readable label for status lines.
    pub fn label(self) -> &'static str {
        match self {
            Stage::Extract => "Extracting text",
            Stage::Generate => "Waiting for the model",
            Stage::Parse => "Parsing response",
            Stage::Render => "Writing report",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Called by the pipeline around each stage.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Calls arrive in stage order from a single task.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called just before `stage` begins.
    fn on_stage_start(&self, stage: Stage) {
        let _ = stage;
    }

    /// Called when `stage` succeeded.
    ///
    /// # Arguments
    /// * `stage`      — the finished stage
    /// * `elapsed_ms` — wall-clock time spent in the stage
    fn on_stage_complete(&self, stage: Stage, elapsed_ms: u64) {
        let _ = (stage, elapsed_ms);
    }

    /// Called when `stage` failed; no further stages run.
    fn on_stage_error(&self, stage: Stage, error: &str) {
        let _ = (stage, error);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;
