// LLM prompt constants for intent classification.

/// System prompt for intent classification — enforces JSON-only output.
pub const CLASSIFY_SYSTEM: &str =
    "You are an intent classifier for a prompt-engineering assistant. \
    Classify a user request into a taxonomy path and rate its complexity. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Classification prompt template. Replace `{request_text}` before sending.
pub const CLASSIFY_PROMPT_TEMPLATE: &str = r#"Classify the following user request.

Return a JSON object with this EXACT schema (no extra fields):
{
  "intent_path": "creative.writing.fiction",
  "complexity": 3,
  "confidence": 0.85
}

Rules:

INTENT_PATH: a lowercase dotted taxonomy path. Prefer one of:
- "code.generation" — writing, debugging, or refactoring code
- "creative.writing" — stories, poems, fiction, narrative work
- "analysis.data" — analyzing, comparing, or evaluating information
- "summarization" — condensing or shortening existing text
- "question.factual" — direct factual questions and explanations
- "general.assistance" — anything that fits none of the above

COMPLEXITY: an integer from 1 (a one-line ask) to 5 (a multi-step task with
several constraints or deliverables).

CONFIDENCE: your confidence in the intent_path, from 0.0 to 1.0.

USER REQUEST:
{request_text}"#;
