//! Axum route handlers for the Prompt Enhancement API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::{enhance_prompt, EnhanceRequest, EnhanceResponse};
use crate::models::prompt::GeneratedPromptRow;
use crate::state::AppState;

/// POST /api/v1/prompts/enhance
///
/// Full pipeline: classify → recommend → apply technique → persist.
pub async fn handle_enhance(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhanceResponse>, AppError> {
    let response = enhance_prompt(
        &state.db,
        &state.llm,
        state.classifier.as_ref(),
        Arc::clone(&state.catalog),
        request,
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/v1/prompts/:id
///
/// Returns a persisted enhancement result.
pub async fn handle_get_prompt(
    State(state): State<AppState>,
    Path(prompt_id): Path<Uuid>,
) -> Result<Json<GeneratedPromptRow>, AppError> {
    let row =
        sqlx::query_as::<_, GeneratedPromptRow>("SELECT * FROM generated_prompts WHERE id = $1")
            .bind(prompt_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Prompt {prompt_id} not found")))?;

    Ok(Json(row))
}
