use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::essays::count_words;
use crate::essays::prompts::{build_feedback_prompt, feedback_system};
use crate::llm_client::LlmClient;
use crate::progress::models::EssayRecord;

const MAX_POINTS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EssayFeedback {
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
}

impl EssayFeedback {
    /// Drops blank points and caps both lists.
    fn normalize(mut self) -> Self {
        self.summary = self.summary.trim().to_string();
        for list in [&mut self.strengths, &mut self.improvements] {
            list.retain(|p| !p.trim().is_empty());
            list.truncate(MAX_POINTS);
        }
        self
    }
}

/// Asks the LLM for feedback on `draft`, answering `essay`'s prompt.
pub async fn request_feedback(
    llm: &LlmClient,
    essay: &EssayRecord,
    draft: &str,
) -> Result<EssayFeedback, AppError> {
    if draft.trim().is_empty() {
        return Err(AppError::Validation("draft cannot be empty".to_string()));
    }

    let word_count = count_words(draft);
    let prompt = build_feedback_prompt(&essay.prompt, essay.word_limit, word_count, draft);

    info!("Requesting essay feedback for {} ({word_count} words)", essay.id);
    let feedback: EssayFeedback = llm.call_json(&prompt, &feedback_system()).await?;

    Ok(feedback.normalize())
}
