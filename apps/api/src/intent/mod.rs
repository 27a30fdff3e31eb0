// Intent classification: free-form request text → taxonomy path + complexity.
// Pluggable backends behind `IntentClassifier` — keyword (default) or LLM,
// selected at startup via ENABLE_LLM_INTENT. All LLM calls go through
// llm_client.

pub mod classifier;
pub mod handlers;
pub mod prompts;
pub mod taxonomy;
