use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::intent::classifier::ClassifiedIntent;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub request_text: String,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub intent: ClassifiedIntent,
}

/// POST /api/v1/intents/classify
///
/// Classifies free-form request text into a taxonomy path and complexity.
/// Useful for previewing what the enhancement pipeline would do.
pub async fn handle_classify(
    State(state): State<AppState>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, AppError> {
    if request.request_text.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "request_text must not be empty".to_string(),
        ));
    }

    let intent = state.classifier.classify(&request.request_text).await?;
    Ok(Json(ClassifyResponse { intent }))
}
