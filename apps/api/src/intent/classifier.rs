//! Intent Classification — pluggable, trait-based classifier mapping request
//! text to a taxonomy path and complexity rating.
//!
//! Default: `KeywordIntentClassifier` (pure-Rust, fast, deterministic).
//! Optional: `LlmIntentClassifier` (semantic via the LLM client), swapped at
//! startup via ENABLE_LLM_INTENT.
//!
//! `AppState` holds an `Arc<dyn IntentClassifier>`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::intent::prompts::{CLASSIFY_PROMPT_TEMPLATE, CLASSIFY_SYSTEM};
use crate::intent::taxonomy::IntentPath;
use crate::llm_client::LlmClient;

/// Taxonomy path assigned when no keyword signal matches.
pub const DEFAULT_INTENT_PATH: &str = "general.assistance";

/// Classification result: a taxonomy path, a complexity rating in [1,5],
/// and the classifier's confidence in [0,1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedIntent {
    pub intent_path: String,
    pub complexity: i16,
    pub confidence: f64,
}

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, request_text: &str) -> Result<ClassifiedIntent, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordIntentClassifier — default backend
// ────────────────────────────────────────────────────────────────────────────

/// Keyword signal table. First match order breaks score ties, so the table
/// order is part of the classifier's deterministic behavior.
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "code.generation",
        &[
            "code", "function", "implement", "script", "program", "debug", "refactor", "compile",
            "api",
        ],
    ),
    (
        "creative.writing",
        &[
            "story", "poem", "fiction", "creative", "narrative", "character", "plot", "novel",
        ],
    ),
    (
        "analysis.data",
        &[
            "analyze", "analysis", "data", "compare", "evaluate", "statistics", "trend", "metric",
        ],
    ),
    (
        "summarization",
        &["summarize", "summary", "tl;dr", "condense", "shorten", "brief"],
    ),
    (
        "question.factual",
        &["what is", "who is", "when did", "where is", "explain", "define"],
    ),
];

/// Phrases that signal a multi-step or constrained task.
const COMPLEXITY_MARKERS: &[&str] = &[
    "step", "then", "first", "finally", "multiple", "constraint", "requirement", "compare",
    "trade-off", "tradeoff",
];

/// Pure-Rust keyword classifier. No LLM call.
///
/// Path: the category with the most keyword hits wins; ties go to the earlier
/// table entry; zero hits fall back to `general.assistance`.
/// Complexity: word-count bands, bumped one level when two or more multi-step
/// markers appear, clamped into [1,5].
pub struct KeywordIntentClassifier;

#[async_trait]
impl IntentClassifier for KeywordIntentClassifier {
    async fn classify(&self, request_text: &str) -> Result<ClassifiedIntent, AppError> {
        Ok(classify_by_keywords(request_text))
    }
}

pub fn classify_by_keywords(request_text: &str) -> ClassifiedIntent {
    let text = request_text.to_lowercase();

    let mut best_path = DEFAULT_INTENT_PATH;
    let mut best_hits = 0usize;
    for &(path, keywords) in CATEGORY_KEYWORDS {
        let hits = keywords.iter().filter(|kw| text.contains(*kw)).count();
        if hits > best_hits {
            best_hits = hits;
            best_path = path;
        }
    }

    let confidence = if best_hits == 0 {
        0.3
    } else {
        (0.5 + 0.1 * best_hits as f64).min(0.9)
    };

    ClassifiedIntent {
        intent_path: best_path.to_string(),
        complexity: estimate_complexity(&text),
        confidence,
    }
}

fn estimate_complexity(text: &str) -> i16 {
    let words = text.split_whitespace().count();
    let mut level: i16 = match words {
        0..=20 => 1,
        21..=60 => 2,
        61..=150 => 3,
        _ => 4,
    };

    let marker_hits = COMPLEXITY_MARKERS
        .iter()
        .filter(|marker| text.contains(*marker))
        .count();
    if marker_hits >= 2 {
        level += 1;
    }

    level.clamp(1, 5)
}

// ────────────────────────────────────────────────────────────────────────────
// LlmIntentClassifier — semantic backend
// ────────────────────────────────────────────────────────────────────────────

/// Semantic classifier via the LLM client. The model's output is not trusted
/// blindly: complexity is clamped into [1,5] and an unparseable taxonomy path
/// falls back to the keyword classifier's result.
pub struct LlmIntentClassifier {
    llm: LlmClient,
}

impl LlmIntentClassifier {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl IntentClassifier for LlmIntentClassifier {
    async fn classify(&self, request_text: &str) -> Result<ClassifiedIntent, AppError> {
        let prompt = CLASSIFY_PROMPT_TEMPLATE.replace("{request_text}", request_text);
        let mut intent: ClassifiedIntent = self
            .llm
            .call_json(&prompt, CLASSIFY_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Intent classification failed: {e}")))?;

        intent.complexity = intent.complexity.clamp(1, 5);
        intent.confidence = intent.confidence.clamp(0.0, 1.0);
        match IntentPath::parse(&intent.intent_path) {
            Ok(path) => intent.intent_path = path.into_inner(),
            Err(_) => {
                warn!(
                    "LLM returned malformed intent path '{}' — using keyword fallback",
                    intent.intent_path
                );
                intent = classify_by_keywords(request_text);
            }
        }
        Ok(intent)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_request_maps_to_code_path() {
        let intent =
            classify_by_keywords("Write a function to debug this script and refactor the code");
        assert_eq!(intent.intent_path, "code.generation");
        assert!(intent.confidence > 0.5);
    }

    #[test]
    fn test_creative_request_maps_to_creative_path() {
        let intent = classify_by_keywords("Write a short story with a compelling character");
        assert_eq!(intent.intent_path, "creative.writing");
    }

    #[test]
    fn test_unmatched_request_falls_back_to_default() {
        let intent = classify_by_keywords("hello there");
        assert_eq!(intent.intent_path, DEFAULT_INTENT_PATH);
        assert_eq!(intent.confidence, 0.3);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let text = "Summarize this analysis of quarterly data trends";
        let first = classify_by_keywords(text);
        let second = classify_by_keywords(text);
        assert_eq!(first.intent_path, second.intent_path);
        assert_eq!(first.complexity, second.complexity);
        assert_eq!(first.confidence, second.confidence);
    }

    #[test]
    fn test_short_request_is_low_complexity() {
        let intent = classify_by_keywords("define recursion");
        assert_eq!(intent.complexity, 1);
    }

    #[test]
    fn test_multi_step_markers_raise_complexity() {
        let short_plain = classify_by_keywords("write a poem about the sea");
        let short_marked =
            classify_by_keywords("first compare the options step by step, then decide");
        assert!(short_marked.complexity > short_plain.complexity);
    }

    #[test]
    fn test_complexity_always_in_range() {
        let long_text = "step then first finally compare constraint ".repeat(100);
        let intent = classify_by_keywords(&long_text);
        assert!((1..=5).contains(&intent.complexity));

        let empty = classify_by_keywords("");
        assert!((1..=5).contains(&empty.complexity));
    }

    #[test]
    fn test_classified_intent_deserializes_from_llm_json() {
        let json = r#"{"intent_path": "analysis.data", "complexity": 4, "confidence": 0.82}"#;
        let intent: ClassifiedIntent = serde_json::from_str(json).unwrap();
        assert_eq!(intent.intent_path, "analysis.data");
        assert_eq!(intent.complexity, 4);
    }

    #[tokio::test]
    async fn test_keyword_classifier_trait_roundtrip() {
        let classifier = KeywordIntentClassifier;
        let intent = classifier
            .classify("Analyze this data and compare the statistics")
            .await
            .unwrap();
        assert_eq!(intent.intent_path, "analysis.data");
    }
}
