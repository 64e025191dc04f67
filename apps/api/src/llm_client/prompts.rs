// Shared prompt fragments. Each feature that calls the model keeps its own
// prompt templates next to it; only cross-cutting text lives here.

/// System prompt sent with every evaluation-style call.
pub const RECRUITER_SYSTEM: &str = "You are an expert technical recruiter with deep knowledge \
    of software engineering roles and skills. \
    Your task is to evaluate candidates based on their skills and experience.";

/// Instruction appended to prompts that expect a JSON object back.
pub const JSON_ONLY_INSTRUCTION: &str = "IMPORTANT: Return ONLY a valid JSON object \
    with no additional text or markdown formatting.";
