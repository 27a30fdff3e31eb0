use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted output of the prompt enhancement pipeline.
///
/// `technique_id` is NULL when no active technique was recommended and the
/// request text passed through unchanged (status `passthrough`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedPromptRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub request_text: String,
    pub intent_path: String,
    pub complexity: i16,
    pub technique_id: Option<Uuid>,
    pub enhanced_prompt: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
