// src/services/router.rs
use std::sync::Arc;

use tracing::{info, warn};

use super::generator::ReplyGenerator;
use super::prompt::PromptContext;

pub const CRISIS_KEYWORDS: [&str; 2] = ["suicide", "help"];

pub const CRISIS_REPLY: &str =
    "It seems you might be in crisis. Please contact a helpline immediately: 1-800-273-8255.";

/// Stand-in user message when only a mood button was clicked.
pub const MOOD_ONLY_PROMPT: &str = "Respond to my current emotional state.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Crisis,
    Generate(PromptContext),
}

/// Plain substring match, so "I need help with homework" counts too.
pub fn is_crisis(message: &str) -> bool {
    let lower = message.to_lowercase();
    CRISIS_KEYWORDS.iter().any(|word| lower.contains(*word))
}

/// Decide how a message is handled. First matching rule wins.
pub fn decide(message: &str, mood: &str) -> Route {
    let message = message.trim();
    let mood = mood.trim();

    if is_crisis(message) {
        return Route::Crisis;
    }

    if message.is_empty() && !mood.is_empty() {
        return Route::Generate(PromptContext::new(MOOD_ONLY_PROMPT, mood));
    }

    Route::Generate(PromptContext::new(message, mood))
}

pub struct MessageRouter {
    generator: Arc<dyn ReplyGenerator>,
}

impl MessageRouter {
    pub fn new(generator: Arc<dyn ReplyGenerator>) -> Self {
        Self { generator }
    }

    /// Never fails; provider errors come back as reply text.
    pub async fn route(&self, message: &str, mood: &str) -> String {
        match decide(message, mood) {
            Route::Crisis => {
                warn!("crisis keyword detected, returning helpline reply");
                CRISIS_REPLY.to_string()
            }
            Route::Generate(ctx) => {
                info!(provider = self.generator.provider(), "forwarding message");
                self.generator.reply(&ctx).await
            }
        }
    }
}
