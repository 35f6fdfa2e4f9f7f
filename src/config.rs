//! Configuration types for résumé extraction.
//!
//! All run behaviour is controlled through [`ExtractionConfig`], built via its
//! [`ExtractionConfigBuilder`]. The LLM provider is part of the config value,
//! never process-wide state, so a test or host application can hand in its
//! own provider and two runs never interfere.

use crate::error::ResumeError;
use crate::progress::ProgressCallback;
use crate::report::{ReportFormat, ReportLabels};
use edgequake_llm::LLMProvider;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Model used when the caller names neither a model nor a provider pair.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Configuration for a résumé extraction run.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use resume_extract::ExtractionConfig;
///
/// let config = ExtractionConfig::builder()
///     .provider_name("gemini")
///     .model("gemini-2.0-flash")
///     .temperature(0.0)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// LLM model identifier, e.g. "gemini-2.0-flash", "gpt-4.1-mini".
    /// If None, uses [`DEFAULT_MODEL`] or the provider default.
    pub model: Option<String>,

    /// LLM provider name (e.g. "gemini", "openai", "anthropic", "ollama").
    /// If None along with `provider`, the provider is resolved from the environment.
    pub provider_name: Option<String>,

    /// Pre-constructed LLM provider. Takes precedence over `provider_name`.
    pub provider: Option<Arc<dyn LLMProvider>>,

    /// Sampling temperature. Default: 0.1.
    ///
    /// Extraction wants the model to copy facts, not invent them.
    pub temperature: f32,

    /// Maximum tokens the LLM may generate. Default: 4096.
    ///
    /// A dense two-page résumé rarely exceeds 1 500 output tokens; a cut-off
    /// reply is a truncated JSON object and fails to decode.
    pub max_tokens: usize,

    /// Custom system message. If None, uses the built-in default.
    pub system_prompt: Option<String>,

    /// PDF user password for encrypted résumés.
    pub password: Option<String>,

    /// Report format. If None, inferred from the output extension.
    pub report_format: Option<ReportFormat>,

    /// TrueType font embedded in PDF reports. Needed for scripts outside
    /// the standard Helvetica repertoire (Vietnamese, Cyrillic, CJK…).
    pub report_font: Option<PathBuf>,

    /// Title and section headings used in reports.
    pub labels: ReportLabels,

    /// Stage progress events. Default: None.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: None,
            provider_name: None,
            provider: None,
            temperature: 0.1,
            max_tokens: 4096,
            system_prompt: None,
            password: None,
            report_format: None,
            report_font: None,
            labels: ReportLabels::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("model", &self.model)
            .field("provider_name", &self.provider_name)
            .field("provider", &self.provider.as_ref().map(|_| "<dyn LLMProvider>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("system_prompt", &self.system_prompt)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("report_format", &self.report_format)
            .field("report_font", &self.report_font)
            .field("labels", &self.labels)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    pub fn provider_name(mut self, name: impl Into<String>) -> Self {
        self.config.provider_name = Some(name.into());
        self
    }

    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.config.provider = Some(provider);
        self
    }

    pub fn temperature(mut self, t: f32) -> Self {
        self.config.temperature = t.clamp(0.0, 2.0);
        self
    }

    pub fn max_tokens(mut self, n: usize) -> Self {
        self.config.max_tokens = n;
        self
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.system_prompt = Some(prompt.into());
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    pub fn report_format(mut self, format: ReportFormat) -> Self {
        self.config.report_format = Some(format);
        self
    }

    pub fn report_font(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.report_font = Some(path.into());
        self
    }

    pub fn labels(mut self, labels: ReportLabels) -> Self {
        self.config.labels = labels;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, ResumeError> {
        let c = &self.config;
        if c.max_tokens == 0 {
            return Err(ResumeError::InvalidConfig(
                "max_tokens must be ≥ 1".into(),
            ));
        }
        if let Some(ref model) = c.model {
            if model.trim().is_empty() {
                return Err(ResumeError::InvalidConfig("model must not be empty".into()));
            }
        }
        if let Some(ref font) = c.report_font {
            if !font.is_file() {
                return Err(ResumeError::InvalidConfig(format!(
                    "report font '{}' does not exist",
                    font.display()
                )));
            }
        }
        Ok(self.config)
    }
}
