//! Pipeline integration tests that need neither pdfium nor a network.
//!
//! The LLM is replaced by a scripted [`TextGenerator`]; everything after the
//! model reply (parse, display, Markdown report) runs for real.

use async_trait::async_trait;
use resume_extract::{
    extract_from_text, extract_resume_with, parse_response, to_display_json, write_report, ErrorKind,
    ExtractionConfig, ExtractionProgressCallback, Outcome, ReportFormat, ReportOptions,
    ResumeError, Stage, TextGenerator,
};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ── Test helpers ─────────────────────────────────────────────────────────────

/// Generator that returns a fixed reply and counts calls.
struct Scripted {
    reply: String,
    calls: AtomicUsize,
}

impl Scripted {
    fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for Scripted {
    async fn generate(&self, _prompt: &str) -> Outcome<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Generator whose call always fails.
struct Failing;

#[async_trait]
impl TextGenerator for Failing {
    async fn generate(&self, _prompt: &str) -> Outcome<String> {
        Err(ResumeError::Api {
            message: "429 quota exceeded".to_string(),
        })
    }
}

/// Records every progress event as a string.
#[derive(Default)]
struct Events(Mutex<Vec<String>>);

impl ExtractionProgressCallback for Events {
    fn on_stage_start(&self, stage: Stage) {
        self.0.lock().unwrap().push(format!("start:{stage:?}"));
    }
    fn on_stage_complete(&self, stage: Stage, _elapsed_ms: u64) {
        self.0.lock().unwrap().push(format!("done:{stage:?}"));
    }
    fn on_stage_error(&self, stage: Stage, _error: &str) {
        self.0.lock().unwrap().push(format!("error:{stage:?}"));
    }
}

fn recording_config(events: &Arc<Events>) -> ExtractionConfig {
    ExtractionConfig::builder()
        .progress_callback(events.clone() as Arc<dyn ExtractionProgressCallback>)
        .build()
        .unwrap()
}

const JANE_TEXT: &str = "Jane Doe\njane@example.com\nSkills: Rust, SQL\n";

const JANE_REPLY: &str = "```json\n{\"candidate_name\":\"Jane Doe\",\"skills\":[]}\n```";

// ── Reply → display → report ─────────────────────────────────────────────────

#[test]
fn fenced_reply_becomes_display_json_and_report() {
    let record = parse_response(JANE_REPLY).expect("fenced reply must parse");
    assert_eq!(record.candidate_name.as_deref(), Some("Jane Doe"));

    let display = to_display_json(&record).unwrap();
    assert!(display.contains("\"candidate_name\": \"Jane Doe\""), "got:\n{display}");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane_extracted_report.md");
    let options = ReportOptions {
        format: ReportFormat::Markdown,
        ..Default::default()
    };
    let written = write_report(&record, &path, &options).unwrap();
    assert_eq!(written, path);

    let md = std::fs::read_to_string(&path).unwrap();
    assert!(md.contains("**Candidate name:** Jane Doe"), "got:\n{md}");
    assert!(md.contains("## Skills\n\n- N/A\n"), "got:\n{md}");
    assert!(md.contains("- Email: N/A"), "got:\n{md}");
}

#[test]
fn prose_wrapped_reply_is_accepted() {
    let raw = "Sure! Here is the data:\n{\"candidate_name\": \"Nguyễn Văn A\"}\n```";
    let record = parse_response(raw).unwrap();
    let display = to_display_json(&record).unwrap();
    assert!(display.contains("Nguyễn Văn A"));
}

#[test]
fn non_json_reply_keeps_raw_text_in_error() {
    let raw = "I could not read this résumé.";
    let err = parse_response(raw).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeError);
    match err {
        ResumeError::Decode { raw: kept, .. } => assert_eq!(kept, raw),
        other => panic!("expected Decode, got {other:?}"),
    }
}

// ── Early failures never reach the model ─────────────────────────────────────

#[tokio::test]
async fn missing_file_fails_before_generation() {
    let events = Arc::new(Events::default());
    let config = ExtractionConfig::builder()
        .progress_callback(events.clone() as Arc<dyn ExtractionProgressCallback>)
        .build()
        .unwrap();
    let generator = Scripted::new(JANE_REPLY);

    let err = extract_resume_with(
        std::path::Path::new("/definitely/not/here.pdf"),
        &generator,
        None,
        &config,
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        *events.0.lock().unwrap(),
        vec!["start:Extract".to_string(), "error:Extract".to_string()]
    );
}

#[tokio::test]
async fn non_pdf_file_is_malformed_input() {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(b"Jane Doe\nSoftware Engineer\n").unwrap();

    let generator = Scripted::new(JANE_REPLY);
    let err = extract_resume_with(file.path(), &generator, None, &ExtractionConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MalformedInput);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn named_provider_without_credential_is_startup_fatal() {
    // "xai" is resolved by name only; the variable is assumed unset in CI.
    if std::env::var("XAI_API_KEY").is_ok() {
        println!("SKIP — XAI_API_KEY is set");
        return;
    }
    let config = ExtractionConfig::builder().provider_name("xai").build().unwrap();
    let err = resume_extract::extract_resume("/definitely/not/here.pdf", &config)
        .await
        .unwrap_err();

    // The provider check runs before the input is even looked at.
    assert!(matches!(err, ResumeError::ProviderNotConfigured { .. }), "got {err:?}");
    assert!(err.to_string().contains("XAI_API_KEY"));
}

// ── Failures after extraction ────────────────────────────────────────────────

#[tokio::test]
async fn api_failure_stops_before_parse_and_render() {
    let events = Arc::new(Events::default());
    let config = recording_config(&events);
    let dir = tempfile::tempdir().unwrap();
    let target = (dir.path().join("jane.md"), ReportFormat::Markdown);

    let err = extract_from_text(JANE_TEXT, &Failing, Some(&target), &config)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ApiError);
    assert!(err.to_string().contains("429 quota exceeded"));
    assert_eq!(
        *events.0.lock().unwrap(),
        vec!["start:Generate".to_string(), "error:Generate".to_string()]
    );
    assert!(!target.0.exists());
}

#[tokio::test]
async fn undecodable_reply_stops_before_render() {
    let events = Arc::new(Events::default());
    let config = recording_config(&events);
    let dir = tempfile::tempdir().unwrap();
    let target = (dir.path().join("jane.md"), ReportFormat::Markdown);
    let generator = Scripted::new("Sorry, I cannot help with that.");

    let err = extract_from_text(JANE_TEXT, &generator, Some(&target), &config)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeError);
    assert_eq!(
        events.0.lock().unwrap().last().map(String::as_str),
        Some("error:Parse")
    );
    assert!(!target.0.exists());
}

#[tokio::test]
async fn unwritable_report_target_is_render_error() {
    let events = Arc::new(Events::default());
    let config = recording_config(&events);
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();
    let target = (blocker.join("jane.md"), ReportFormat::Markdown);
    let generator = Scripted::new(JANE_REPLY);

    let err = extract_from_text(JANE_TEXT, &generator, Some(&target), &config)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RenderError);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        *events.0.lock().unwrap(),
        vec![
            "start:Generate".to_string(),
            "done:Generate".to_string(),
            "start:Parse".to_string(),
            "done:Parse".to_string(),
            "start:Render".to_string(),
            "error:Render".to_string(),
        ]
    );
}

#[tokio::test]
async fn text_run_writes_report_and_stats() {
    let dir = tempfile::tempdir().unwrap();
    let target = (dir.path().join("out").join("jane.md"), ReportFormat::Markdown);
    let generator = Scripted::new(JANE_REPLY);

    let output = extract_from_text(JANE_TEXT, &generator, Some(&target), &ExtractionConfig::default())
        .await
        .unwrap();

    assert_eq!(output.report_path.as_deref(), Some(target.0.as_path()));
    assert_eq!(output.stats.text_chars, JANE_TEXT.chars().count());
    assert_eq!(output.stats.response_bytes, JANE_REPLY.len());
    let md = std::fs::read_to_string(&target.0).unwrap();
    assert!(md.contains("Jane Doe"));
}

#[tokio::test]
async fn blank_text_never_reaches_the_model() {
    let generator = Scripted::new(JANE_REPLY);
    let err = extract_from_text(" \n\t", &generator, None, &ExtractionConfig::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyInput);
    assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
}

// ── Callback API ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn callback_can_move_into_spawned_task() {
    let events = Arc::new(Events::default());
    let cb: Arc<dyn ExtractionProgressCallback> = events.clone();

    tokio::spawn(async move {
        cb.on_stage_start(Stage::Generate);
        cb.on_stage_error(Stage::Generate, "quota exceeded");
    })
    .await
    .expect("spawn must succeed");

    assert_eq!(
        *events.0.lock().unwrap(),
        vec!["start:Generate".to_string(), "error:Generate".to_string()]
    );
}
