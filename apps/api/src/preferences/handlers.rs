use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::preference::FavoriteRow;
use crate::preferences::store::{add_favorite, list_favorites, remove_favorite};
use crate::state::AppState;

/// GET /api/v1/users/:user_id/favorites
pub async fn handle_list_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<FavoriteRow>>, AppError> {
    let favorites = list_favorites(&state.db, user_id).await?;
    Ok(Json(favorites))
}

/// PUT /api/v1/users/:user_id/favorites/:technique_id
pub async fn handle_add_favorite(
    State(state): State<AppState>,
    Path((user_id, technique_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    add_favorite(&state.db, user_id, technique_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/users/:user_id/favorites/:technique_id
pub async fn handle_remove_favorite(
    State(state): State<AppState>,
    Path((user_id, technique_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, AppError> {
    remove_favorite(&state.db, user_id, technique_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
