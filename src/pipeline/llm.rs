//! LLM interaction: send the extraction prompt and return the raw reply.
//!
//! The pipeline talks to the model through the [`TextGenerator`] trait rather
//! than a concrete client, so tests and embedding applications can supply their
//! own implementation. [`LlmGenerator`] is the production implementation on top
//! of an `edgequake-llm` provider.
//!
//! Exactly one request is made per run. There is no retry and no timeout: a
//! failed call ends the run with [`ResumeError::Api`].

use crate::config::ExtractionConfig;
use crate::error::{Outcome, ResumeError};
use crate::prompts::DEFAULT_SYSTEM_PROMPT;
use async_trait::async_trait;
use edgequake_llm::{ChatMessage, CompletionOptions, LLMProvider};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Anything that can turn a prompt into response text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the model's textual reply, untouched.
    async fn generate(&self, prompt: &str) -> Outcome<String>;
}

/// [`TextGenerator`] backed by an `edgequake-llm` provider.
pub struct LlmGenerator {
    provider: Arc<dyn LLMProvider>,
    system_prompt: String,
    options: CompletionOptions,
}

impl LlmGenerator {
    pub fn new(provider: Arc<dyn LLMProvider>, config: &ExtractionConfig) -> Self {
        let system_prompt = config
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        Self {
            provider,
            system_prompt,
            options: build_options(config),
        }
    }
}

#[async_trait]
impl TextGenerator for LlmGenerator {
    async fn generate(&self, prompt: &str) -> Outcome<String> {
        let start = Instant::now();
        let messages = vec![
            ChatMessage::system(self.system_prompt.as_str()),
            ChatMessage::user(prompt),
        ];

        let response = self
            .provider
            .chat(&messages, Some(&self.options))
            .await
            .map_err(|e| ResumeError::Api {
                message: e.to_string(),
            })?;

        info!(
            "LLM replied in {:?}: {} input tokens, {} output tokens",
            start.elapsed(),
            response.prompt_tokens,
            response.completion_tokens
        );
        debug!("Raw response: {} bytes", response.content.len());

        accept_reply(response.content)
    }
}

/// A blank reply cannot carry a record; report it as an API failure.
fn accept_reply(content: String) -> Outcome<String> {
    if content.trim().is_empty() {
        return Err(ResumeError::Api {
            message: "provider returned an empty response".to_string(),
        });
    }
    Ok(content)
}

/// Build `CompletionOptions` from the extraction config.
fn build_options(config: &ExtractionConfig) -> CompletionOptions {
    CompletionOptions {
        temperature: Some(config.temperature),
        max_tokens: Some(config.max_tokens),
        ..Default::default()
    }
}
