//! Prompt enhancement — orchestrates the full pipeline.
//!
//! Flow: classify → favorite_ids → recommend → apply top technique →
//!       persist to generated_prompts → return response.
//!
//! The recommendation step never calls the LLM; only classification (when the
//! LLM backend is enabled) and template-less refinement do.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::store::{get_technique, TechniqueCatalog};
use crate::errors::AppError;
use crate::generation::prompts::{ENHANCE_PROMPT_TEMPLATE, ENHANCE_SYSTEM};
use crate::intent::classifier::{ClassifiedIntent, IntentClassifier};
use crate::llm_client::LlmClient;
use crate::preferences::store::favorite_ids;
use crate::recommender::selector::{RankedTechnique, RecommendRequest, Recommender};

/// Techniques considered per enhancement; only the top one is applied, the
/// rest are returned so the client can offer alternatives.
const RECOMMEND_LIMIT: usize = 3;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct EnhanceRequest {
    pub user_id: Uuid,
    pub request_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnhanceResponse {
    pub prompt_id: Uuid,
    pub intent: ClassifiedIntent,
    pub recommendations: Vec<RankedTechnique>,
    pub applied_technique_id: Option<Uuid>,
    pub enhanced_prompt: String,
    /// `enhanced` when a technique was applied, `passthrough` otherwise.
    pub status: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Enhancement pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the enhancement pipeline and persists the result.
///
/// An empty recommendation list (no active techniques) is not an error: the
/// original request text passes through unchanged with status `passthrough`.
pub async fn enhance_prompt(
    pool: &PgPool,
    llm: &LlmClient,
    classifier: &dyn IntentClassifier,
    catalog: Arc<dyn TechniqueCatalog>,
    request: EnhanceRequest,
) -> Result<EnhanceResponse, AppError> {
    if request.request_text.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "request_text must not be empty".to_string(),
        ));
    }

    // Step 1: classify
    let intent = classifier.classify(&request.request_text).await?;
    info!(
        "Classified request for user {}: {} (complexity {})",
        request.user_id, intent.intent_path, intent.complexity
    );

    // Step 2: favorites snapshot
    let favorites = favorite_ids(pool, request.user_id).await?;

    // Step 3: recommend
    let recommendations = Recommender::new(catalog)
        .recommend(&RecommendRequest {
            intent_path: intent.intent_path.clone(),
            complexity: intent.complexity,
            favorite_technique_ids: favorites,
            limit: RECOMMEND_LIMIT,
        })
        .await?;

    // Step 4: apply the top technique
    let (applied_technique_id, enhanced_prompt, status) = match recommendations.first() {
        None => {
            warn!(
                "No active techniques for intent {} — passing request through",
                intent.intent_path
            );
            (None, request.request_text.clone(), "passthrough")
        }
        Some(top) => {
            let technique = get_technique(pool, top.technique_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Technique {} not found", top.technique_id))
                })?;

            let enhanced = match technique.template.as_deref() {
                Some(template) => apply_template(template, &request.request_text),
                None => {
                    let prompt = ENHANCE_PROMPT_TEMPLATE
                        .replace("{technique_name}", &technique.name)
                        .replace("{technique_category}", &technique.category)
                        .replace("{request_text}", &request.request_text);
                    llm.call_text(&prompt, ENHANCE_SYSTEM)
                        .await
                        .map_err(|e| AppError::Llm(format!("Prompt refinement failed: {e}")))?
                }
            };
            (Some(technique.id), enhanced, "enhanced")
        }
    };

    // Step 5: persist
    let prompt_id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO generated_prompts
            (id, user_id, request_text, intent_path, complexity, technique_id, enhanced_prompt, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(prompt_id)
    .bind(request.user_id)
    .bind(&request.request_text)
    .bind(&intent.intent_path)
    .bind(intent.complexity)
    .bind(applied_technique_id)
    .bind(&enhanced_prompt)
    .bind(status)
    .execute(pool)
    .await?;

    info!(
        "Generated prompt {} for user {} (status {})",
        prompt_id, request.user_id, status
    );

    Ok(EnhanceResponse {
        prompt_id,
        intent,
        recommendations,
        applied_technique_id,
        enhanced_prompt,
        status: status.to_string(),
    })
}

/// Substitutes the request into a technique template. Templates without a
/// `{request}` placeholder get the request appended after a blank line.
pub fn apply_template(template: &str, request_text: &str) -> String {
    if template.contains("{request}") {
        template.replace("{request}", request_text)
    } else {
        format!("{template}\n\n{request_text}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
