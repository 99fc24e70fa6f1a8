#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use zen_chat::services::generator::{GenerateError, ReplyGenerator};
use zen_chat::services::prompt::PromptContext;

/// Returns a canned result and records every prompt it sees.
pub struct StubGenerator {
    result: fn() -> Result<String, GenerateError>,
    calls: AtomicUsize,
    seen: Mutex<Vec<PromptContext>>,
}

impl StubGenerator {
    pub fn replying(result: fn() -> Result<String, GenerateError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<PromptContext> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ReplyGenerator for StubGenerator {
    fn provider(&self) -> &str {
        "Stub"
    }

    async fn generate(&self, ctx: &PromptContext) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(ctx.clone());
        (self.result)()
    }
}
