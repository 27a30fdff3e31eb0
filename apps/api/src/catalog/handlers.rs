use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::cache;
use crate::catalog::store::{
    insert_technique, list_intents, set_technique_active, NewTechnique,
};
use crate::errors::AppError;
use crate::models::technique::{IntentRow, TechniqueRow};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTechniqueRequest {
    pub slug: String,
    pub name: String,
    pub category: String,
    pub complexity_level: i16,
    pub base_effectiveness: f64,
    pub template: Option<String>,
}

/// GET /api/v1/techniques
///
/// Lists the active catalog (served through the Redis cache).
pub async fn handle_list_techniques(
    State(state): State<AppState>,
) -> Result<Json<Vec<TechniqueRow>>, AppError> {
    let techniques = state.catalog.active_techniques().await?;
    Ok(Json(techniques))
}

/// POST /api/v1/techniques
///
/// Administrator endpoint. New techniques are created active.
pub async fn handle_create_technique(
    State(state): State<AppState>,
    Json(req): Json<CreateTechniqueRequest>,
) -> Result<(StatusCode, Json<TechniqueRow>), AppError> {
    if req.slug.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "slug must not be empty".to_string(),
        ));
    }
    if req.name.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "name must not be empty".to_string(),
        ));
    }
    if !(1..=5).contains(&req.complexity_level) {
        return Err(AppError::InvalidArgument(format!(
            "complexity_level must be between 1 and 5, got {}",
            req.complexity_level
        )));
    }
    if !(0.0..=1.0).contains(&req.base_effectiveness) {
        return Err(AppError::InvalidArgument(format!(
            "base_effectiveness must be between 0 and 1, got {}",
            req.base_effectiveness
        )));
    }

    let row = insert_technique(
        &state.db,
        NewTechnique {
            slug: req.slug.trim(),
            name: req.name.trim(),
            category: &req.category,
            complexity_level: req.complexity_level,
            base_effectiveness: req.base_effectiveness,
            template: req.template.as_deref(),
        },
    )
    .await?;

    cache::invalidate_catalog(&state.redis).await;

    Ok((StatusCode::CREATED, Json(row)))
}

#[derive(Debug, Deserialize)]
pub struct ActiveToggle {
    pub is_active: bool,
}

/// PATCH /api/v1/techniques/:id/active
pub async fn handle_set_active(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ActiveToggle>,
) -> Result<StatusCode, AppError> {
    set_technique_active(&state.db, id, req.is_active).await?;
    cache::invalidate_catalog(&state.redis).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/intents
pub async fn handle_list_intents(
    State(state): State<AppState>,
) -> Result<Json<Vec<IntentRow>>, AppError> {
    let intents = list_intents(&state.db).await?;
    Ok(Json(intents))
}
