// Essay feedback prompt templates.

use crate::llm_client::prompts::{AUTHENTICITY_INSTRUCTION, JSON_ONLY_SYSTEM};

pub const FEEDBACK_SYSTEM_BASE: &str = "\
You are an experienced MBA admissions consultant reviewing an applicant's essay draft. \
Be specific and candid. Refer to sentences in the draft when you point out problems.";

pub const FEEDBACK_PROMPT: &str = r#"Review the following admissions essay draft.

ESSAY PROMPT:
{prompt}

WORD LIMIT: {word_limit}
CURRENT WORD COUNT: {word_count}

DRAFT:
{draft}

OUTPUT SCHEMA (return exactly this structure):
{
  "summary": "two or three sentences on how well the draft answers the prompt",
  "strengths": ["string"],
  "improvements": ["string"]
}

Give at most 5 strengths and at most 5 improvements. If the draft is over the word limit,
the first improvement must say how many words to cut."#;

pub fn feedback_system() -> String {
    format!("{FEEDBACK_SYSTEM_BASE}\n\n{AUTHENTICITY_INSTRUCTION}\n\n{JSON_ONLY_SYSTEM}")
}

pub fn build_feedback_prompt(prompt: &str, word_limit: u32, word_count: u32, draft: &str) -> String {
    let limit = if word_limit == 0 {
        "none".to_string()
    } else {
        word_limit.to_string()
    };
    FEEDBACK_PROMPT
        .replace("{prompt}", prompt.trim())
        .replace("{word_limit}", &limit)
        .replace("{word_count}", &word_count.to_string())
        .replace("{draft}", draft.trim())
}
