use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A prompt-engineering technique from the administrator-managed catalog.
///
/// Reference data: immutable during a scoring request. Deactivation excludes
/// a technique from future recommendations but never deletes rows that
/// reference it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TechniqueRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub category: String,
    /// Ordinal 1–5: the task difficulty this technique typically fits.
    pub complexity_level: i16,
    /// Effectiveness estimate in [0, 1] when no intent-specific override exists.
    pub base_effectiveness: f64,
    /// Enhancement template with a `{request}` placeholder. Techniques without
    /// a template are applied via an LLM refinement call instead.
    pub template: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// A node of the intent taxonomy, addressed by dotted path
/// (e.g. `creative.writing.fiction`). Read-only for the recommender.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct IntentRow {
    pub id: Uuid,
    pub path: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-(intent, technique) effectiveness override. Absence of a pair means
/// "fall back to the technique's base effectiveness".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EffectivenessOverrideRow {
    pub intent_id: Uuid,
    pub technique_id: Uuid,
    pub effectiveness_score: f64,
    pub confidence: f64,
}
