//! Catalog data access — the recommender's read-only collaborators plus the
//! administrator write path.
//!
//! The trait carries exactly the three lookups the recommender needs:
//! active techniques, intent path resolution, and per-intent effectiveness
//! overrides. Overrides are fetched as one map per intent; a technique id
//! missing from the map means "fall back to base effectiveness".

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache;
use crate::errors::AppError;
use crate::models::technique::{EffectivenessOverrideRow, IntentRow, TechniqueRow};

#[async_trait]
pub trait TechniqueCatalog: Send + Sync {
    /// All techniques currently flagged active.
    async fn active_techniques(&self) -> Result<Vec<TechniqueRow>, AppError>;

    /// Resolves a taxonomy path to an intent id. Unknown path → None, not an error.
    async fn resolve_intent_path(&self, path: &str) -> Result<Option<Uuid>, AppError>;

    /// Effectiveness overrides for one intent, keyed by technique id.
    async fn effectiveness_overrides(
        &self,
        intent_id: Uuid,
    ) -> Result<HashMap<Uuid, f64>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Postgres catalog
// ────────────────────────────────────────────────────────────────────────────

pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TechniqueCatalog for PgCatalog {
    async fn active_techniques(&self) -> Result<Vec<TechniqueRow>, AppError> {
        Ok(sqlx::query_as::<_, TechniqueRow>(
            "SELECT * FROM techniques WHERE is_active = TRUE ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    async fn resolve_intent_path(&self, path: &str) -> Result<Option<Uuid>, AppError> {
        Ok(
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM intents WHERE path = $1")
                .bind(path)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn effectiveness_overrides(
        &self,
        intent_id: Uuid,
    ) -> Result<HashMap<Uuid, f64>, AppError> {
        let rows = sqlx::query_as::<_, EffectivenessOverrideRow>(
            "SELECT * FROM technique_effectiveness WHERE intent_id = $1",
        )
        .bind(intent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| (row.technique_id, row.effectiveness_score))
            .collect())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cached catalog
// ────────────────────────────────────────────────────────────────────────────

/// Redis read-through layer over `PgCatalog`. Only the active-technique set is
/// cached — it is read on every recommendation and changes only on admin
/// mutation. Intent resolution and overrides stay on Postgres.
pub struct CachedCatalog {
    inner: PgCatalog,
    redis: redis::Client,
    ttl_secs: u64,
}

impl CachedCatalog {
    pub fn new(inner: PgCatalog, redis: redis::Client, ttl_secs: u64) -> Self {
        Self {
            inner,
            redis,
            ttl_secs,
        }
    }
}

#[async_trait]
impl TechniqueCatalog for CachedCatalog {
    async fn active_techniques(&self) -> Result<Vec<TechniqueRow>, AppError> {
        if let Some(techniques) = cache::get_active_techniques(&self.redis).await {
            debug!("Catalog cache hit: {} active techniques", techniques.len());
            return Ok(techniques);
        }

        let techniques = self.inner.active_techniques().await?;
        cache::put_active_techniques(&self.redis, &techniques, self.ttl_secs).await;
        Ok(techniques)
    }

    async fn resolve_intent_path(&self, path: &str) -> Result<Option<Uuid>, AppError> {
        self.inner.resolve_intent_path(path).await
    }

    async fn effectiveness_overrides(
        &self,
        intent_id: Uuid,
    ) -> Result<HashMap<Uuid, f64>, AppError> {
        self.inner.effectiveness_overrides(intent_id).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Administrator write path
// ────────────────────────────────────────────────────────────────────────────

/// Parameters for creating a catalog technique.
pub struct NewTechnique<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    pub category: &'a str,
    pub complexity_level: i16,
    pub base_effectiveness: f64,
    pub template: Option<&'a str>,
}

/// Inserts a technique and returns the stored row.
pub async fn insert_technique(
    pool: &PgPool,
    params: NewTechnique<'_>,
) -> Result<TechniqueRow, AppError> {
    let row = sqlx::query_as::<_, TechniqueRow>(
        r#"
        INSERT INTO techniques
            (id, slug, name, category, complexity_level, base_effectiveness, template, is_active)
        VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.slug)
    .bind(params.name)
    .bind(params.category)
    .bind(params.complexity_level)
    .bind(params.base_effectiveness)
    .bind(params.template)
    .fetch_one(pool)
    .await?;

    info!("Created technique {} ({})", row.slug, row.id);
    Ok(row)
}

/// Flips the active flag. Deactivation excludes the technique from future
/// recommendations; rows referencing it (favorites, generated prompts) are
/// kept untouched.
pub async fn set_technique_active(
    pool: &PgPool,
    technique_id: Uuid,
    is_active: bool,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE techniques SET is_active = $1 WHERE id = $2")
        .bind(is_active)
        .bind(technique_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "Technique {technique_id} not found"
        )));
    }

    info!("Technique {technique_id} is_active set to {is_active}");
    Ok(())
}

/// Fetches one technique by id, active or not.
pub async fn get_technique(
    pool: &PgPool,
    technique_id: Uuid,
) -> Result<Option<TechniqueRow>, AppError> {
    Ok(
        sqlx::query_as::<_, TechniqueRow>("SELECT * FROM techniques WHERE id = $1")
            .bind(technique_id)
            .fetch_optional(pool)
            .await?,
    )
}

/// All taxonomy nodes, ordered by path for stable listings.
pub async fn list_intents(pool: &PgPool) -> Result<Vec<IntentRow>, AppError> {
    Ok(
        sqlx::query_as::<_, IntentRow>("SELECT * FROM intents ORDER BY path")
            .fetch_all(pool)
            .await?,
    )
}
