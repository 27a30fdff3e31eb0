pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::catalog::handlers as catalog_handlers;
use crate::generation::handlers as generation_handlers;
use crate::intent::handlers as intent_handlers;
use crate::preferences::handlers as preference_handlers;
use crate::recommender::handlers as recommender_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Catalog API
        .route(
            "/api/v1/techniques",
            get(catalog_handlers::handle_list_techniques)
                .post(catalog_handlers::handle_create_technique),
        )
        .route(
            "/api/v1/techniques/:id/active",
            patch(catalog_handlers::handle_set_active),
        )
        .route("/api/v1/intents", get(catalog_handlers::handle_list_intents))
        // Intent classification
        .route(
            "/api/v1/intents/classify",
            post(intent_handlers::handle_classify),
        )
        // Recommendations
        .route(
            "/api/v1/recommendations",
            post(recommender_handlers::handle_recommend),
        )
        // Prompt enhancement
        .route(
            "/api/v1/prompts/enhance",
            post(generation_handlers::handle_enhance),
        )
        .route(
            "/api/v1/prompts/:id",
            get(generation_handlers::handle_get_prompt),
        )
        // User preferences
        .route(
            "/api/v1/users/:user_id/favorites",
            get(preference_handlers::handle_list_favorites),
        )
        .route(
            "/api/v1/users/:user_id/favorites/:technique_id",
            put(preference_handlers::handle_add_favorite)
                .delete(preference_handlers::handle_remove_favorite),
        )
        .with_state(state)
}
