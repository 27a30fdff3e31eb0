use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::preferences::store::favorite_ids;
use crate::recommender::selector::{RankedTechnique, RecommendRequest, Recommender};
use crate::state::AppState;

/// Result size when the caller does not ask for one.
pub const DEFAULT_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub intent_path: String,
    pub complexity: i16,
    /// Enables the personalization bonus from this user's favorites.
    pub user_id: Option<Uuid>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub intent_path: String,
    pub complexity: i16,
    pub personalized: bool,
    pub recommendations: Vec<RankedTechnique>,
}

/// POST /api/v1/recommendations
///
/// Ranks active catalog techniques for a classified intent and complexity.
/// An empty `recommendations` array is a valid outcome, not an error.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let favorites = match request.user_id {
        Some(user_id) => favorite_ids(&state.db, user_id).await?,
        None => HashSet::new(),
    };
    let personalized = !favorites.is_empty();

    let recommender = Recommender::new(Arc::clone(&state.catalog));
    let recommendations = recommender
        .recommend(&RecommendRequest {
            intent_path: request.intent_path.clone(),
            complexity: request.complexity,
            favorite_technique_ids: favorites,
            limit: request.limit.unwrap_or(DEFAULT_LIMIT),
        })
        .await?;

    Ok(Json(RecommendationResponse {
        intent_path: request.intent_path,
        complexity: request.complexity,
        personalized,
        recommendations,
    }))
}
