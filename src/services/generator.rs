// src/services/generator.rs
use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use super::{chat_completions::ChatCompletionsGenerator, gemini::GeminiGenerator, prompt::PromptContext};
use crate::config::{Provider, ProviderConfig};

pub const NO_CANDIDATES_REPLY: &str = "Hmm... I couldn't generate a proper response.";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("{0}")]
    Transport(String),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("no candidates in response")]
    NoCandidates,
}

impl GenerateError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            GenerateError::Timeout(timeout)
        } else if err.is_decode() {
            GenerateError::Decode(err.to_string())
        } else {
            GenerateError::Transport(err.to_string())
        }
    }
}

/// Wraps one external LLM provider.
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    /// Display name used in user-facing error text.
    fn provider(&self) -> &str;

    async fn generate(&self, ctx: &PromptContext) -> Result<String, GenerateError>;

    /// Like [`generate`](Self::generate), with failures turned into reply text.
    async fn reply(&self, ctx: &PromptContext) -> String {
        match self.generate(ctx).await {
            Ok(text) => text,
            Err(err) => {
                warn!(provider = self.provider(), error = %err, "reply generation failed");
                failure_reply(self.provider(), &err)
            }
        }
    }
}

pub fn failure_reply(provider: &str, err: &GenerateError) -> String {
    match err {
        GenerateError::NoCandidates => NO_CANDIDATES_REPLY.to_string(),
        other => format!("Sorry, I couldn't connect to {}: {}", provider, other),
    }
}

/// Build the generator the configuration selects.
pub fn build_generator(config: &ProviderConfig) -> Result<Arc<dyn ReplyGenerator>, reqwest::Error> {
    let generator: Arc<dyn ReplyGenerator> = match config.provider {
        Provider::Gemini => Arc::new(GeminiGenerator::new(config)?),
        Provider::Mistral => Arc::new(ChatCompletionsGenerator::new(config)?),
    };
    Ok(generator)
}

pub(crate) fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

/// Cap provider error bodies before they reach a reply.
pub(crate) fn truncate_body(body: &str) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
