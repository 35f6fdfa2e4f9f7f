//! CLI binary for resume-extract.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ExtractionConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use resume_extract::extract::{generator_from_config, report_target};
use resume_extract::{
    extract_resume_with, inspect, ExtractionConfig, ExtractionProgressCallback, ProgressCallback,
    ReportFormat, Stage,
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a spinner whose message follows the current
/// stage, with one log line per finished stage.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(style);
        bar.set_prefix("Preparing");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_stage_start(&self, stage: Stage) {
        self.bar.set_prefix(stage.label());
        self.bar.set_message(match stage {
            Stage::Generate => "waiting for the model…",
            _ => "",
        });
    }

    fn on_stage_complete(&self, stage: Stage, elapsed_ms: u64) {
        self.bar.println(format!(
            "  {} {:<18} {}",
            green("✓"),
            stage.label(),
            dim(&format!("{:.1}s", elapsed_ms as f64 / 1000.0)),
        ));
    }

    fn on_stage_error(&self, stage: Stage, error: &str) {
        let msg = match error.lines().next() {
            Some(first) if first.chars().count() > 80 => {
                format!("{}\u{2026}", first.chars().take(79).collect::<String>())
            }
            Some(first) => first.to_string(),
            None => String::new(),
        };
        self.bar.println(format!("  {} {:<18} {}", red("✗"), stage.label(), red(&msg)));
    }
}

impl Drop for CliProgressCallback {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Extract and write resume_extracted_report.pdf next to the input
  resume-extract resume.pdf

  # Markdown report at a chosen location
  resume-extract resume.pdf -o reports/jane.md

  # JSON only, no report document
  resume-extract --no-report resume.pdf > jane.json

  # Use a specific provider and model
  resume-extract --provider openai --model gpt-4.1-mini resume.pdf

  # Non-Latin résumé: embed a TrueType font in the PDF report
  resume-extract --font /usr/share/fonts/truetype/noto/NotoSans-Regular.ttf cv.pdf

  # Inspect PDF metadata (no API key needed)
  resume-extract --inspect-only resume.pdf

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY          Google Gemini API key (default provider)
  OPENAI_API_KEY          OpenAI API key
  ANTHROPIC_API_KEY       Anthropic API key
  EDGEQUAKE_LLM_PROVIDER  Provider to use when --provider is not given
  EDGEQUAKE_MODEL         Model to use with EDGEQUAKE_LLM_PROVIDER
  PDFIUM_LIB_PATH         Path to libpdfium (file or directory)
  RUST_LOG                Overrides the log filter

  A .env file in the working directory is loaded before anything else.
"#;

/// Extract structured candidate data from résumé PDFs using an LLM.
#[derive(Parser, Debug)]
#[command(
    name = "resume-extract",
    version,
    about = "Extract structured candidate data from résumé PDFs using an LLM",
    long_about = "Read the text of a résumé PDF, ask a Large Language Model to return the \
candidate's name, contact details, education, work experience and skills as JSON, print that \
JSON, and write a PDF or Markdown report. Supports Google Gemini, OpenAI, Anthropic, Azure \
OpenAI, Ollama and other providers.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Résumé PDF to process.
    input: PathBuf,

    /// Report path. Default: <input-stem>_extracted_report.pdf beside the input.
    #[arg(short, long, env = "RESUME_EXTRACT_OUTPUT")]
    output: Option<PathBuf>,

    /// Skip the report document; print JSON only.
    #[arg(long, env = "RESUME_EXTRACT_NO_REPORT", conflicts_with = "output")]
    no_report: bool,

    /// Report format. Default: from the --output extension, else pdf.
    #[arg(long, env = "RESUME_EXTRACT_FORMAT", value_enum)]
    format: Option<FormatArg>,

    /// LLM model ID (e.g. gemini-2.0-flash, gpt-4.1-mini).
    #[arg(long, env = "RESUME_EXTRACT_MODEL")]
    model: Option<String>,

    /// LLM provider: gemini, openai, anthropic, azure, ollama, …
    #[arg(
        long,
        env = "RESUME_EXTRACT_PROVIDER",
        long_help = "LLM provider. Resolved from EDGEQUAKE_LLM_PROVIDER or API key env vars if not set.\n\
          Supported: gemini, openai, anthropic, azure, mistral, openrouter, xai, ollama, lmstudio."
    )]
    provider: Option<String>,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "RESUME_EXTRACT_TEMPERATURE", default_value_t = 0.1)]
    temperature: f32,

    /// Max LLM output tokens.
    #[arg(long, env = "RESUME_EXTRACT_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// PDF user password for encrypted résumés.
    #[arg(long, env = "RESUME_EXTRACT_PASSWORD")]
    password: Option<String>,

    /// Path to a text file containing a custom system prompt.
    #[arg(long, env = "RESUME_EXTRACT_SYSTEM_PROMPT")]
    system_prompt: Option<PathBuf>,

    /// TrueType font to embed in PDF reports.
    #[arg(long, env = "RESUME_EXTRACT_FONT")]
    font: Option<PathBuf>,

    /// Print the full ExtractionOutput (record, report path, stats) as JSON.
    #[arg(long, env = "RESUME_EXTRACT_JSON")]
    json: bool,

    /// Print PDF metadata only, no extraction.
    #[arg(long)]
    inspect_only: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "RESUME_EXTRACT_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUME_EXTRACT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and the JSON result.
    #[arg(short, long, env = "RESUME_EXTRACT_QUIET")]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Pdf,
    Markdown,
}

impl From<FormatArg> for ReportFormat {
    fn from(v: FormatArg) -> Self {
        match v {
            FormatArg::Pdf => ReportFormat::Pdf,
            FormatArg::Markdown => ReportFormat::Markdown,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Credentials may live in .env; a missing file is not an error.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let info = inspect(&cli.input, cli.password.as_deref())
            .await
            .context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialize metadata")?
            );
        } else {
            println!("File:         {}", cli.input.display());
            if let Some(ref t) = info.title {
                println!("Title:        {}", t);
            }
            if let Some(ref a) = info.author {
                println!("Author:       {}", a);
            }
            println!("Pages:        {}", info.page_count);
            println!("PDF Version:  {}", info.pdf_version);
        }
        return Ok(());
    }

    // ── Build config and provider ────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ExtractionProgressCallback>)
    } else {
        None
    };

    let config = build_config(&cli, progress_cb).await?;

    // A missing API key is fatal before the PDF is touched.
    let generator =
        generator_from_config(&config).context("LLM provider is not configured")?;

    // ── Run extraction ───────────────────────────────────────────────────
    let target = if cli.no_report {
        None
    } else {
        Some(report_target(&cli.input, cli.output.as_deref(), &config))
    };

    let result = extract_resume_with(&cli.input, &generator, target.as_ref(), &config).await;
    // Clears the spinner before anything is printed.
    drop(config);
    let output = result.context("Extraction failed")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&output).context("Failed to serialise output")?;
        println!("{json}");
    } else {
        println!("{}", output.display_json);
    }

    if !cli.quiet {
        if let Some(ref path) = output.report_path {
            eprintln!(
                "{}  report  →  {}",
                green("✔"),
                bold(&path.display().to_string())
            );
        }
        eprintln!(
            "   {} chars in  /  {} bytes out  —  {}ms total",
            dim(&output.stats.text_chars.to_string()),
            dim(&output.stats.response_bytes.to_string()),
            output.stats.total_duration_ms,
        );
    }

    Ok(())
}

/// Map CLI args to `ExtractionConfig`.
async fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ExtractionConfig> {
    let mut builder = ExtractionConfig::builder()
        .temperature(cli.temperature)
        .max_tokens(cli.max_tokens);

    if let Some(ref path) = cli.system_prompt {
        let prompt = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read system prompt from {:?}", path))?;
        builder = builder.system_prompt(prompt);
    }
    if let Some(ref model) = cli.model {
        builder = builder.model(model.clone());
    }
    if let Some(ref provider) = cli.provider {
        builder = builder.provider_name(provider.clone());
    }
    if let Some(ref password) = cli.password {
        builder = builder.password(password.clone());
    }
    if let Some(format) = cli.format {
        builder = builder.report_format(format.into());
    }
    if let Some(ref font) = cli.font {
        builder = builder.report_font(font.clone());
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
