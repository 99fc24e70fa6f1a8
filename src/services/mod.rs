// src/services/mod.rs
pub mod chat_completions;
pub mod gemini;
pub mod generator;
pub mod prompt;
pub mod router;
