// Shared prompt fragments. Each feature that calls the LLM keeps its own
// prompts.rs next to it and pulls common instructions from here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps the assistant from writing the applicant's essay for them.
pub const AUTHENTICITY_INSTRUCTION: &str = "\
    CRITICAL: The essay must remain the applicant's own work. \
    Comment on structure, clarity, and how well the draft answers the prompt. \
    Do NOT rewrite paragraphs, invent experiences, or add achievements \
    the draft does not mention.";
