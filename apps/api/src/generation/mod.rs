// Prompt enhancement pipeline: classify → load favorites → recommend →
// apply the top technique's template → persist. Template-less techniques
// fall back to an LLM refinement call through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
