//! Technique selection — filter active → score → sort → limit.
//!
//! `rank_techniques` is a pure function over a catalog snapshot so the full
//! algorithm is testable without a database. `Recommender` is the thin async
//! layer that fetches the snapshot from the `TechniqueCatalog` collaborators
//! and delegates to it. The recommender holds no mutable state; concurrent
//! calls are independent.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::store::TechniqueCatalog;
use crate::errors::AppError;
use crate::intent::taxonomy::IntentPath;
use crate::models::technique::TechniqueRow;
use crate::recommender::scoring::{complexity_adjustment, final_score, personalization_bonus};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Inputs to one recommendation call. Favorites are a caller-owned snapshot;
/// an empty set disables the personalization bonus.
#[derive(Debug, Clone)]
pub struct RecommendRequest {
    pub intent_path: String,
    pub complexity: i16,
    pub favorite_technique_ids: HashSet<Uuid>,
    pub limit: usize,
}

/// One ranked catalog entry. `effectiveness_score` is the base-or-override
/// score plus the complexity adjustment; `final_score` adds the
/// personalization bonus and applies the [0, 0.99] clamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedTechnique {
    pub technique_id: Uuid,
    pub name: String,
    pub effectiveness_score: f64,
    pub personalization_bonus: f64,
    pub final_score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Core ranking algorithm
// ────────────────────────────────────────────────────────────────────────────

/// Ranks a catalog snapshot for one request.
///
/// 1. Keep only techniques flagged active.
/// 2. Base score = the intent override when present, else base effectiveness.
/// 3. Apply the complexity adjustment and personalization bonus.
/// 4. Sort descending by final score; ties ascend by technique id so repeated
///    calls with identical inputs return identical output.
/// 5. Truncate to `limit`.
pub fn rank_techniques(
    techniques: &[TechniqueRow],
    overrides: &HashMap<Uuid, f64>,
    complexity: i16,
    favorites: &HashSet<Uuid>,
    limit: usize,
) -> Vec<RankedTechnique> {
    let mut ranked: Vec<RankedTechnique> = techniques
        .iter()
        .filter(|t| t.is_active)
        .map(|t| {
            let base = overrides
                .get(&t.id)
                .copied()
                .unwrap_or(t.base_effectiveness);
            let effectiveness_score = base + complexity_adjustment(complexity, t.complexity_level);
            let bonus = personalization_bonus(favorites.contains(&t.id));
            RankedTechnique {
                technique_id: t.id,
                name: t.name.clone(),
                effectiveness_score,
                personalization_bonus: bonus,
                final_score: final_score(effectiveness_score, bonus),
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.technique_id.cmp(&b.technique_id))
    });
    ranked.truncate(limit);
    ranked
}

// ────────────────────────────────────────────────────────────────────────────
// Async orchestration
// ────────────────────────────────────────────────────────────────────────────

pub struct Recommender {
    catalog: Arc<dyn TechniqueCatalog>,
}

impl Recommender {
    pub fn new(catalog: Arc<dyn TechniqueCatalog>) -> Self {
        Self { catalog }
    }

    /// Produces the ranked technique list for a classified intent.
    ///
    /// An unknown intent path yields no overrides (every technique falls back
    /// to its base effectiveness) and zero active techniques yield an empty
    /// list — neither is an error.
    pub async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<Vec<RankedTechnique>, AppError> {
        let path = validate(request)?;

        let intent_id = self.catalog.resolve_intent_path(path.as_str()).await?;
        let overrides = match intent_id {
            Some(id) => self.catalog.effectiveness_overrides(id).await?,
            None => HashMap::new(),
        };
        let techniques = self.catalog.active_techniques().await?;

        Ok(rank_techniques(
            &techniques,
            &overrides,
            request.complexity,
            &request.favorite_technique_ids,
            request.limit,
        ))
    }
}

/// Caller contract checks. Violations name the offending field and value;
/// no partial results are returned. Returns the normalized path used for
/// intent resolution.
fn validate(request: &RecommendRequest) -> Result<IntentPath, AppError> {
    let path = IntentPath::parse(&request.intent_path)?;
    if !(1..=5).contains(&request.complexity) {
        return Err(AppError::InvalidArgument(format!(
            "complexity must be between 1 and 5, got {}",
            request.complexity
        )));
    }
    if request.limit == 0 {
        return Err(AppError::InvalidArgument(
            "limit must be a positive integer, got 0".to_string(),
        ));
    }
    Ok(path)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;

    fn make_technique(id: u128, level: i16, base: f64) -> TechniqueRow {
        TechniqueRow {
            id: Uuid::from_u128(id),
            slug: format!("technique-{id}"),
            name: format!("Technique {id}"),
            category: "reasoning".to_string(),
            complexity_level: level,
            base_effectiveness: base,
            template: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn make_request(complexity: i16, limit: usize) -> RecommendRequest {
        RecommendRequest {
            intent_path: "creative.writing.fiction".to_string(),
            complexity,
            favorite_technique_ids: HashSet::new(),
            limit,
        }
    }

    #[test]
    fn test_exact_complexity_match_scores_base_plus_bonus() {
        // base 0.70, level 3, requested 3 → 0.70 + 0.1 = 0.80
        let techniques = vec![make_technique(1, 3, 0.70)];
        let ranked = rank_techniques(&techniques, &HashMap::new(), 3, &HashSet::new(), 10);
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].final_score - 0.80).abs() < 1e-9);
        assert_eq!(ranked[0].personalization_bonus, 0.0);
    }

    #[test]
    fn test_distance_two_applies_penalty() {
        // base 0.70, level 3, requested 5 → 0.70 - 0.2 = 0.50
        let techniques = vec![make_technique(1, 3, 0.70)];
        let ranked = rank_techniques(&techniques, &HashMap::new(), 5, &HashSet::new(), 10);
        assert!((ranked[0].final_score - 0.50).abs() < 1e-9);
    }

    #[test]
    fn test_favorite_adds_exactly_bonus() {
        // base 0.70, level 3, requested 3, favorited → min(0.80 + 0.15, 0.99) = 0.95
        let techniques = vec![make_technique(1, 3, 0.70)];
        let favorites: HashSet<Uuid> = [Uuid::from_u128(1)].into_iter().collect();

        let plain = rank_techniques(&techniques, &HashMap::new(), 3, &HashSet::new(), 10);
        let boosted = rank_techniques(&techniques, &HashMap::new(), 3, &favorites, 10);

        assert!((boosted[0].final_score - 0.95).abs() < 1e-9);
        assert!((boosted[0].final_score - plain[0].final_score - 0.15).abs() < 1e-9);
        assert_eq!(boosted[0].personalization_bonus, 0.15);
    }

    #[test]
    fn test_favorite_bonus_respects_ceiling() {
        let techniques = vec![make_technique(1, 3, 0.95)];
        let favorites: HashSet<Uuid> = [Uuid::from_u128(1)].into_iter().collect();
        let ranked = rank_techniques(&techniques, &HashMap::new(), 3, &favorites, 10);
        assert_eq!(ranked[0].final_score, 0.99);
    }

    #[test]
    fn test_override_replaces_base_effectiveness() {
        let techniques = vec![make_technique(1, 3, 0.40)];
        let overrides: HashMap<Uuid, f64> = [(Uuid::from_u128(1), 0.85)].into_iter().collect();
        let ranked = rank_techniques(&techniques, &overrides, 3, &HashSet::new(), 10);
        assert!((ranked[0].final_score - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_missing_override_falls_back_to_base() {
        let techniques = vec![make_technique(1, 3, 0.40), make_technique(2, 3, 0.40)];
        let overrides: HashMap<Uuid, f64> = [(Uuid::from_u128(1), 0.85)].into_iter().collect();
        let ranked = rank_techniques(&techniques, &overrides, 3, &HashSet::new(), 10);
        assert_eq!(ranked[0].technique_id, Uuid::from_u128(1));
        assert!((ranked[1].final_score - 0.50).abs() < 1e-9);
    }

    #[test]
    fn test_inactive_techniques_are_excluded() {
        let mut inactive = make_technique(1, 3, 0.99);
        inactive.is_active = false;
        let techniques = vec![inactive, make_technique(2, 3, 0.50)];
        let ranked = rank_techniques(&techniques, &HashMap::new(), 3, &HashSet::new(), 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].technique_id, Uuid::from_u128(2));
    }

    #[test]
    fn test_sorted_non_increasing_with_id_tie_break() {
        let techniques = vec![
            make_technique(7, 3, 0.60),
            make_technique(2, 3, 0.60),
            make_technique(4, 3, 0.80),
        ];
        let ranked = rank_techniques(&techniques, &HashMap::new(), 3, &HashSet::new(), 10);

        for pair in ranked.windows(2) {
            assert!(pair[0].final_score >= pair[1].final_score);
        }
        // 7 and 2 tie on score — ascending id breaks the tie
        assert_eq!(ranked[0].technique_id, Uuid::from_u128(4));
        assert_eq!(ranked[1].technique_id, Uuid::from_u128(2));
        assert_eq!(ranked[2].technique_id, Uuid::from_u128(7));
    }

    #[test]
    fn test_all_scores_within_bounds() {
        let techniques = vec![
            make_technique(1, 1, 0.05), // heavy penalty at requested 5
            make_technique(2, 5, 0.99), // favorited, would exceed ceiling
        ];
        let favorites: HashSet<Uuid> = [Uuid::from_u128(2)].into_iter().collect();
        let ranked = rank_techniques(&techniques, &HashMap::new(), 5, &favorites, 10);
        for entry in &ranked {
            assert!((0.0..=0.99).contains(&entry.final_score), "score {} out of range", entry.final_score);
        }
    }

    #[test]
    fn test_limit_truncates_result() {
        let techniques: Vec<_> = (1..=6).map(|i| make_technique(i, 3, 0.50)).collect();
        let ranked = rank_techniques(&techniques, &HashMap::new(), 3, &HashSet::new(), 4);
        assert_eq!(ranked.len(), 4);
    }

    #[test]
    fn test_limit_beyond_catalog_returns_all_active() {
        let techniques: Vec<_> = (1..=3).map(|i| make_technique(i, 3, 0.50)).collect();
        let ranked = rank_techniques(&techniques, &HashMap::new(), 3, &HashSet::new(), 50);
        assert_eq!(ranked.len(), 3);
    }

    #[test]
    fn test_identical_inputs_yield_identical_output() {
        let techniques: Vec<_> = (1..=5).map(|i| make_technique(i, (i % 5 + 1) as i16, 0.30 + 0.1 * i as f64)).collect();
        let overrides: HashMap<Uuid, f64> = [(Uuid::from_u128(3), 0.77)].into_iter().collect();
        let favorites: HashSet<Uuid> = [Uuid::from_u128(5)].into_iter().collect();

        let first = rank_techniques(&techniques, &overrides, 4, &favorites, 10);
        let second = rank_techniques(&techniques, &overrides, 4, &favorites, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_catalog_yields_empty_result() {
        let ranked = rank_techniques(&[], &HashMap::new(), 3, &HashSet::new(), 10);
        assert!(ranked.is_empty());
    }

    // ── Orchestration against a stub catalog ────────────────────────────────

    struct StubCatalog {
        techniques: Vec<TechniqueRow>,
        intents: HashMap<String, Uuid>,
        overrides: HashMap<Uuid, HashMap<Uuid, f64>>,
    }

    #[async_trait]
    impl TechniqueCatalog for StubCatalog {
        async fn active_techniques(&self) -> Result<Vec<TechniqueRow>, AppError> {
            Ok(self.techniques.clone())
        }

        async fn resolve_intent_path(&self, path: &str) -> Result<Option<Uuid>, AppError> {
            Ok(self.intents.get(path).copied())
        }

        async fn effectiveness_overrides(
            &self,
            intent_id: Uuid,
        ) -> Result<HashMap<Uuid, f64>, AppError> {
            Ok(self.overrides.get(&intent_id).cloned().unwrap_or_default())
        }
    }

    fn stub_with_override() -> Arc<StubCatalog> {
        let intent_id = Uuid::from_u128(100);
        Arc::new(StubCatalog {
            techniques: vec![make_technique(1, 3, 0.40)],
            intents: [("creative.writing.fiction".to_string(), intent_id)]
                .into_iter()
                .collect(),
            overrides: [(
                intent_id,
                [(Uuid::from_u128(1), 0.70)].into_iter().collect(),
            )]
            .into_iter()
            .collect(),
        })
    }

    #[tokio::test]
    async fn test_recommend_uses_intent_override() {
        let recommender = Recommender::new(stub_with_override());
        let ranked = recommender.recommend(&make_request(3, 10)).await.unwrap();
        // override 0.70 + exact-match 0.1 = 0.80
        assert!((ranked[0].final_score - 0.80).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_recommend_unknown_path_falls_back_to_base() {
        let recommender = Recommender::new(stub_with_override());
        let mut request = make_request(3, 10);
        request.intent_path = "no.such.path".to_string();
        let ranked = recommender.recommend(&request).await.unwrap();
        // base 0.40 + exact-match 0.1 = 0.50 — unknown path is not an error
        assert!((ranked[0].final_score - 0.50).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_recommend_rejects_complexity_zero_and_six() {
        let recommender = Recommender::new(stub_with_override());
        for complexity in [0, 6] {
            let err = recommender
                .recommend(&make_request(complexity, 10))
                .await
                .unwrap_err();
            match err {
                AppError::InvalidArgument(msg) => {
                    assert!(msg.contains("complexity"), "message was: {msg}");
                    assert!(msg.contains(&complexity.to_string()));
                }
                other => panic!("Expected InvalidArgument, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_recommend_rejects_zero_limit() {
        let recommender = Recommender::new(stub_with_override());
        let err = recommender
            .recommend(&make_request(3, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(msg) if msg.contains("limit")));
    }

    #[tokio::test]
    async fn test_recommend_rejects_empty_intent_path() {
        let recommender = Recommender::new(stub_with_override());
        let mut request = make_request(3, 10);
        request.intent_path = "".to_string();
        let err = recommender.recommend(&request).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_recommend_empty_catalog_is_ok_and_empty() {
        let recommender = Recommender::new(Arc::new(StubCatalog {
            techniques: vec![],
            intents: HashMap::new(),
            overrides: HashMap::new(),
        }));
        let ranked = recommender.recommend(&make_request(3, 10)).await.unwrap();
        assert!(ranked.is_empty());
    }
}
