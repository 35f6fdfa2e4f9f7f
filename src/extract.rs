//! Extraction entry points.
//!
//! One run is strictly sequential:
//!
//! ```text
//! validate ─▶ extract text ─▶ build prompt ─▶ LLM call ─▶ parse ─▶ render
//! ```
//!
//! Each stage either hands its payload to the next or ends the run with a
//! [`ResumeError`]; nothing is retried. The LLM is reached through a
//! [`TextGenerator`] so callers (and tests) can substitute their own.

use crate::config::{ExtractionConfig, DEFAULT_MODEL};
use crate::error::{Outcome, ResumeError};
use crate::output::{ExtractionOutput, ExtractionStats};
use crate::pipeline::extract::{self as pdf_text, DocumentInfo};
use crate::pipeline::llm::{LlmGenerator, TextGenerator};
use crate::pipeline::{input, parse};
use crate::progress::Stage;
use crate::prompts::build_prompt;
use crate::record::CandidateRecord;
use crate::report::{self, ReportFormat, ReportOptions};
use edgequake_llm::{LLMProvider, ProviderFactory};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Extract a [`CandidateRecord`] from the PDF at `path`.
///
/// Resolves the LLM provider from `config` first, so a missing credential
/// fails before the PDF is even opened.
///
/// # Errors
/// Any [`ResumeError`]; see the crate-level error taxonomy.
pub async fn extract_resume(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Outcome<ExtractionOutput> {
    let generator = generator_from_config(config)?;
    extract_resume_with(path.as_ref(), &generator, None, config).await
}

/// Like [`extract_resume`], then write a report document.
///
/// `output` defaults to `<input-stem>_extracted_report.<ext>` beside the
/// input; the format comes from `config.report_format` or the extension.
pub async fn extract_to_report(
    path: impl AsRef<Path>,
    output: Option<&Path>,
    config: &ExtractionConfig,
) -> Outcome<ExtractionOutput> {
    let generator = generator_from_config(config)?;
    let path = path.as_ref();
    let target = report_target(path, output, config);
    extract_resume_with(path, &generator, Some(&target), config).await
}

/// Synchronous wrapper around [`extract_resume`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_resume_sync(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Outcome<ExtractionOutput> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ResumeError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(extract_resume(path, config))
}

/// Read PDF page count and metadata.
///
/// Does not require an LLM provider or API key.
pub async fn inspect(path: impl AsRef<Path>, password: Option<&str>) -> Outcome<DocumentInfo> {
    pdf_text::inspect_document(path.as_ref(), password).await
}

/// Run the full pipeline with an explicit generator.
///
/// When `report` is `Some`, the record is also rendered to that path.
pub async fn extract_resume_with(
    path: &Path,
    generator: &dyn TextGenerator,
    report: Option<&(PathBuf, ReportFormat)>,
    config: &ExtractionConfig,
) -> Outcome<ExtractionOutput> {
    let total_start = Instant::now();
    info!("Starting extraction: {}", path.display());

    // ── Step 1: Extract text ─────────────────────────────────────────────
    let password = config.password.as_deref();
    let (resume_text, extract_ms) = run_stage(config, Stage::Extract, async {
        let text = pdf_text::extract_text(path, password).await?;
        if text.trim().is_empty() {
            return Err(ResumeError::EmptyInput);
        }
        Ok(text)
    })
    .await?;
    info!("Extracted {} chars in {}ms", resume_text.chars().count(), extract_ms);

    let mut output = extract_from_text(&resume_text, generator, report, config).await?;
    output.stats.extract_duration_ms = extract_ms;
    output.stats.total_duration_ms = total_start.elapsed().as_millis() as u64;
    info!("Extraction complete in {}ms", output.stats.total_duration_ms);
    Ok(output)
}

/// Run the pipeline from already extracted résumé text: prompt, generate,
/// parse and optionally render.
///
/// # Errors
/// [`ResumeError::EmptyInput`] for blank text, then whatever the generator,
/// parser or renderer returns.
pub async fn extract_from_text(
    resume_text: &str,
    generator: &dyn TextGenerator,
    report: Option<&(PathBuf, ReportFormat)>,
    config: &ExtractionConfig,
) -> Outcome<ExtractionOutput> {
    let start = Instant::now();
    if resume_text.trim().is_empty() {
        return Err(ResumeError::EmptyInput);
    }

    // ── Step 2: Prompt + LLM call ────────────────────────────────────────
    let prompt = build_prompt(resume_text);
    debug!("Prompt: {} bytes", prompt.len());
    let (raw, llm_ms) = run_stage(config, Stage::Generate, generator.generate(&prompt)).await?;

    // ── Step 3: Parse ────────────────────────────────────────────────────
    let (record, _) = run_stage(config, Stage::Parse, async { parse::parse_response(&raw) }).await?;
    let display_json = report::to_display_json(&record)?;

    // ── Step 4: Render ───────────────────────────────────────────────────
    let report_path = match report {
        Some((target, format)) => {
            let (written, _) = run_stage(
                config,
                Stage::Render,
                render_report(&record, target, *format, config),
            )
            .await?;
            Some(written)
        }
        None => None,
    };

    let stats = ExtractionStats {
        text_chars: resume_text.chars().count(),
        response_bytes: raw.len(),
        extract_duration_ms: 0,
        llm_duration_ms: llm_ms,
        total_duration_ms: start.elapsed().as_millis() as u64,
    };

    Ok(ExtractionOutput {
        record,
        display_json,
        report_path,
        stats,
    })
}

/// Render `record` to `path` on the blocking pool (pdfium is synchronous).
pub async fn render_report(
    record: &CandidateRecord,
    path: &Path,
    format: ReportFormat,
    config: &ExtractionConfig,
) -> Outcome<PathBuf> {
    let record = record.clone();
    let path = path.to_path_buf();
    let target = path.clone();
    let options = ReportOptions {
        format,
        labels: config.labels.clone(),
        font: config.report_font.clone(),
    };

    tokio::task::spawn_blocking(move || report::write_report(&record, &path, &options))
        .await
        .map_err(|e| ResumeError::Render {
            path: target.clone(),
            detail: format!("render task panicked: {e}"),
        })?
}

/// Decide where a report goes and in which format.
pub fn report_target(
    input_path: &Path,
    output: Option<&Path>,
    config: &ExtractionConfig,
) -> (PathBuf, ReportFormat) {
    match output {
        Some(p) => {
            let format = config
                .report_format
                .unwrap_or_else(|| ReportFormat::from_path(p));
            (p.to_path_buf(), format)
        }
        None => {
            let format = config.report_format.unwrap_or_default();
            (
                input::default_report_path(input_path, format.extension()),
                format,
            )
        }
    }
}

/// Await `fut` as pipeline stage `stage`, reporting progress and timing.
async fn run_stage<T, F>(config: &ExtractionConfig, stage: Stage, fut: F) -> Outcome<(T, u64)>
where
    F: Future<Output = Outcome<T>>,
{
    if let Some(ref cb) = config.progress_callback {
        cb.on_stage_start(stage);
    }
    let start = Instant::now();
    let result = fut.await;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    if let Some(ref cb) = config.progress_callback {
        match &result {
            Ok(_) => cb.on_stage_complete(stage, elapsed_ms),
            Err(e) => cb.on_stage_error(stage, &e.to_string()),
        }
    }
    result.map(|v| (v, elapsed_ms))
}

// ── Provider resolution ──────────────────────────────────────────────────

/// Build the production generator, failing fast on a missing credential.
pub fn generator_from_config(config: &ExtractionConfig) -> Outcome<LlmGenerator> {
    let provider = resolve_provider(config, |var| std::env::var(var).ok())?;
    Ok(LlmGenerator::new(provider, config))
}

/// Environment variable holding the API key for `provider`, if it needs one.
pub fn credential_var(provider: &str) -> Option<&'static str> {
    match provider.to_ascii_lowercase().as_str() {
        "gemini" | "google" => Some("GEMINI_API_KEY"),
        "openai" => Some("OPENAI_API_KEY"),
        "anthropic" => Some("ANTHROPIC_API_KEY"),
        "azure" => Some("AZURE_OPENAI_API_KEY"),
        "mistral" => Some("MISTRAL_API_KEY"),
        "openrouter" => Some("OPENROUTER_API_KEY"),
        "xai" => Some("XAI_API_KEY"),
        _ => None,
    }
}

/// Model used for `provider` when the caller did not pick one.
pub fn default_model_for(provider: &str) -> &'static str {
    match provider.to_ascii_lowercase().as_str() {
        "openai" | "azure" => "gpt-4.1-mini",
        "anthropic" => "claude-sonnet-4-20250514",
        "ollama" => "llama3.2",
        _ => DEFAULT_MODEL,
    }
}

/// Refuse to build a provider whose API key is unset or empty.
///
/// `lookup` reads an environment variable; tests pass a closure over a map.
pub fn check_credential<L>(provider: &str, lookup: &L) -> Outcome<()>
where
    L: Fn(&str) -> Option<String>,
{
    match credential_var(provider) {
        Some(var) if lookup(var).map_or(true, |v| v.trim().is_empty()) => {
            Err(ResumeError::ProviderNotConfigured {
                provider: provider.to_string(),
                hint: format!("Set {var} in the environment or in a .env file."),
            })
        }
        _ => Ok(()),
    }
}

fn create_provider<L>(provider_name: &str, model: &str, lookup: &L) -> Outcome<Arc<dyn LLMProvider>>
where
    L: Fn(&str) -> Option<String>,
{
    check_credential(provider_name, lookup)?;
    debug!("Using provider {} with model {}", provider_name, model);
    ProviderFactory::create_llm_provider(provider_name, model).map_err(|e| {
        ResumeError::ProviderNotConfigured {
            provider: provider_name.to_string(),
            hint: format!("{e}"),
        }
    })
}

/// Resolve the LLM provider, from most-specific to least-specific:
///
/// 1. **Pre-built provider** (`config.provider`) — used as-is.
/// 2. **Named provider** (`config.provider_name`) + `config.model` or the
///    provider's default model.
/// 3. **Environment pair** `EDGEQUAKE_LLM_PROVIDER` + `EDGEQUAKE_MODEL`.
/// 4. **Gemini** when `GEMINI_API_KEY` is set.
/// 5. **Auto-detection** via [`ProviderFactory::from_env`].
///
/// Every step that names a provider checks its credential first.
pub fn resolve_provider<L>(config: &ExtractionConfig, lookup: L) -> Outcome<Arc<dyn LLMProvider>>
where
    L: Fn(&str) -> Option<String>,
{
    if let Some(ref provider) = config.provider {
        return Ok(Arc::clone(provider));
    }

    if let Some(ref name) = config.provider_name {
        let model = config
            .model
            .as_deref()
            .unwrap_or_else(|| default_model_for(name));
        return create_provider(name, model, &lookup);
    }

    let non_empty = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let (Some(prov), Some(model)) = (
        non_empty("EDGEQUAKE_LLM_PROVIDER"),
        non_empty("EDGEQUAKE_MODEL"),
    ) {
        return create_provider(&prov, &model, &lookup);
    }

    if non_empty("GEMINI_API_KEY").is_some() {
        let model = config.model.as_deref().unwrap_or(DEFAULT_MODEL);
        return create_provider("gemini", model, &lookup);
    }

    let (llm_provider, _embedding) =
        ProviderFactory::from_env().map_err(|e| ResumeError::ProviderNotConfigured {
            provider: "auto".to_string(),
            hint: format!(
                "No LLM provider could be auto-detected from environment.\n\
                Set GEMINI_API_KEY, OPENAI_API_KEY, or ANTHROPIC_API_KEY, or pass --provider.\n\
                Error: {}",
                e
            ),
        })?;

    Ok(llm_provider)
}
