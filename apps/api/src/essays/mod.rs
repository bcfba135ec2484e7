// Essay editing and AI feedback.
// All LLM calls go through llm_client; prompts live in prompts.rs.

pub mod feedback;
pub mod handlers;
pub mod prompts;

use serde::Deserialize;

use crate::progress::models::EssayStatus;

/// Partial essay edit. Fields left out keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EssayUpdate {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub word_count: Option<u32>,
    #[serde(default)]
    pub status: Option<EssayStatus>,
    #[serde(default)]
    pub is_completed: Option<bool>,
}

impl EssayUpdate {
    /// Word count to store: derived from content when content is given,
    /// otherwise whatever the client sent.
    pub fn resolved_word_count(&self) -> Option<u32> {
        match &self.content {
            Some(text) => Some(count_words(text)),
            None => self.word_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.word_count.is_none()
            && self.status.is_none()
            && self.is_completed.is_none()
    }
}

pub fn count_words(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}
