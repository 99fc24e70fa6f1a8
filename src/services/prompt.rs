// src/services/prompt.rs

const PERSONA: &str = "You are a calm, empathetic, Zen-style AI. ";
const TONE: &str = "Respond naturally, encouragingly, and kindly.";

/// What a Reply Generator sends to its provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    pub system_instruction: String,
    pub user_message: String,
}

impl PromptContext {
    pub fn new(user_message: impl Into<String>, mood: &str) -> Self {
        let mut system_instruction = String::from(PERSONA);
        if !mood.is_empty() {
            system_instruction.push_str(&format!("The user is feeling {}. ", mood));
        }
        system_instruction.push_str(TONE);

        Self {
            system_instruction,
            user_message: user_message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_clause_is_interpolated() {
        let ctx = PromptContext::new("hello", "anxious");
        assert_eq!(
            ctx.system_instruction,
            "You are a calm, empathetic, Zen-style AI. The user is feeling anxious. Respond naturally, encouragingly, and kindly."
        );
        assert_eq!(ctx.user_message, "hello");
    }

    #[test]
    fn no_mood_no_clause() {
        let ctx = PromptContext::new("hello", "");
        assert!(!ctx.system_instruction.contains("feeling"));
        assert!(ctx.system_instruction.starts_with("You are a calm"));
    }
}
