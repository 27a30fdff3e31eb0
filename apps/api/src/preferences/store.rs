//! Favorite-technique data access.

use std::collections::HashSet;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::preference::FavoriteRow;

/// The user's favorite technique ids as a snapshot for one scoring request.
pub async fn favorite_ids(pool: &PgPool, user_id: Uuid) -> Result<HashSet<Uuid>, AppError> {
    let ids: Vec<Uuid> =
        sqlx::query_scalar("SELECT technique_id FROM user_favorites WHERE user_id = $1")
            .bind(user_id)
            .fetch_all(pool)
            .await?;

    Ok(ids.into_iter().collect())
}

/// All favorites for a user, newest first.
pub async fn list_favorites(pool: &PgPool, user_id: Uuid) -> Result<Vec<FavoriteRow>, AppError> {
    Ok(sqlx::query_as::<_, FavoriteRow>(
        "SELECT * FROM user_favorites WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

/// Marks a technique as a favorite. Idempotent; the technique must exist
/// (active or not — favoriting a deactivated technique keeps history intact).
pub async fn add_favorite(
    pool: &PgPool,
    user_id: Uuid,
    technique_id: Uuid,
) -> Result<(), AppError> {
    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM techniques WHERE id = $1)")
            .bind(technique_id)
            .fetch_one(pool)
            .await?;
    if !exists {
        return Err(AppError::NotFound(format!(
            "Technique {technique_id} not found"
        )));
    }

    sqlx::query(
        r#"
        INSERT INTO user_favorites (user_id, technique_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, technique_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(technique_id)
    .execute(pool)
    .await?;

    info!("User {user_id} favorited technique {technique_id}");
    Ok(())
}

/// Removes a favorite. Missing rows are reported as NotFound.
pub async fn remove_favorite(
    pool: &PgPool,
    user_id: Uuid,
    technique_id: Uuid,
) -> Result<(), AppError> {
    let result =
        sqlx::query("DELETE FROM user_favorites WHERE user_id = $1 AND technique_id = $2")
            .bind(user_id)
            .bind(technique_id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Technique {technique_id} is not in user {user_id}'s favorites"
        )));
    }

    info!("User {user_id} unfavorited technique {technique_id}");
    Ok(())
}
