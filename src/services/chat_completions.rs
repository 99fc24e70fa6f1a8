// src/services/chat_completions.rs
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::generator::{GenerateError, ReplyGenerator, http_client, truncate_body};
use super::prompt::PromptContext;
use crate::config::ProviderConfig;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Mistral `chat/completions` backend.
pub struct ChatCompletionsGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl ChatCompletionsGenerator {
    pub fn new(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http_client(config.timeout)?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: format!("{}/v1/chat/completions", config.base_url),
            timeout: config.timeout,
        })
    }
}

#[async_trait]
impl ReplyGenerator for ChatCompletionsGenerator {
    fn provider(&self) -> &str {
        "Mistral"
    }

    async fn generate(&self, ctx: &PromptContext) -> Result<String, GenerateError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: &ctx.system_instruction },
                ChatMessage { role: "user", content: &ctx.user_message },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerateError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body: truncate_body(&text),
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::from_reqwest(e, self.timeout))?;
        debug!(choices = parsed.choices.len(), "chat completion response");

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(GenerateError::NoCandidates)?;

        Ok(choice.message.content.unwrap_or_default().trim().to_string())
    }
}
