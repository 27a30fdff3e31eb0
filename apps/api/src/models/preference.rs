use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A technique a user has marked as a favorite. The recommender reads these
/// as a snapshot and never writes them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FavoriteRow {
    pub user_id: Uuid,
    pub technique_id: Uuid,
    pub created_at: DateTime<Utc>,
}
