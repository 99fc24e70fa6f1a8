// src/message.rs
use serde::{Deserialize, Serialize};

/// Body of `POST /chat`. Both fields may be missing or null.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
}

impl ChatRequest {
    /// Trimmed `(message, mood)`, absent values as empty strings.
    pub fn normalized(&self) -> (&str, &str) {
        (
            self.message.as_deref().unwrap_or_default().trim(),
            self.mood.as_deref().unwrap_or_default().trim(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}
