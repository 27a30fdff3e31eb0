mod cache;
mod catalog;
mod config;
mod db;
mod errors;
mod generation;
mod intent;
mod llm_client;
mod models;
mod preferences;
mod recommender;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::store::{CachedCatalog, PgCatalog, TechniqueCatalog};
use crate::config::Config;
use crate::db::create_pool;
use crate::intent::classifier::{
    IntentClassifier, KeywordIntentClassifier, LlmIntentClassifier,
};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Promptcraft API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize Redis
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Technique catalog: Postgres behind the Redis read-through layer
    let catalog: Arc<dyn TechniqueCatalog> = Arc::new(CachedCatalog::new(
        PgCatalog::new(db.clone()),
        redis.clone(),
        config.catalog_cache_ttl_secs,
    ));
    info!(
        "Technique catalog initialized (cache TTL {}s)",
        config.catalog_cache_ttl_secs
    );

    // Intent classifier (KeywordIntentClassifier by default — swap via ENABLE_LLM_INTENT)
    let classifier: Arc<dyn IntentClassifier> = if config.enable_llm_intent {
        info!("Intent classifier: LLM backend");
        Arc::new(LlmIntentClassifier::new(llm.clone()))
    } else {
        info!("Intent classifier: keyword backend");
        Arc::new(KeywordIntentClassifier)
    };

    // Build app state
    let state = AppState {
        db,
        redis,
        llm,
        catalog,
        classifier,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
