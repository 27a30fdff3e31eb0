use std::sync::Arc;

use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::catalog::store::TechniqueCatalog;
use crate::intent::classifier::IntentClassifier;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Redis client for catalog cache invalidation from admin handlers.
    pub redis: RedisClient,
    pub llm: LlmClient,
    /// Technique catalog behind the Redis read-through layer.
    pub catalog: Arc<dyn TechniqueCatalog>,
    /// Pluggable intent classifier. Default: KeywordIntentClassifier.
    /// Swap via ENABLE_LLM_INTENT env.
    pub classifier: Arc<dyn IntentClassifier>,
}
