//! Redis helpers for the technique catalog read-through cache.
//!
//! Every function here is best-effort: a cache failure is logged and treated
//! as a miss, never surfaced to the request. Postgres remains the source of
//! truth; the cache only bounds read-after-write staleness to its TTL.

use redis::AsyncCommands;
use tracing::warn;

use crate::models::technique::TechniqueRow;

/// Cache key for the full active-technique set.
pub const ACTIVE_TECHNIQUES_KEY: &str = "catalog:techniques:active";

/// Returns the cached active-technique set, or None on miss or any cache error.
pub async fn get_active_techniques(client: &redis::Client) -> Option<Vec<TechniqueRow>> {
    let mut conn = match client.get_multiplexed_async_connection().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!("Catalog cache unavailable, falling back to Postgres: {e}");
            return None;
        }
    };

    let payload: Option<String> = match conn.get(ACTIVE_TECHNIQUES_KEY).await {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Catalog cache read failed, falling back to Postgres: {e}");
            return None;
        }
    };

    let payload = payload?;
    match serde_json::from_str(&payload) {
        Ok(techniques) => Some(techniques),
        Err(e) => {
            warn!("Discarding undecodable catalog cache entry: {e}");
            None
        }
    }
}

/// Stores the active-technique set with the given TTL.
pub async fn put_active_techniques(
    client: &redis::Client,
    techniques: &[TechniqueRow],
    ttl_secs: u64,
) {
    let payload = match serde_json::to_string(techniques) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Failed to serialize catalog for caching: {e}");
            return;
        }
    };

    let mut conn = match client.get_multiplexed_async_connection().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!("Catalog cache unavailable, skipping write: {e}");
            return;
        }
    };

    let result: Result<(), _> = conn.set_ex(ACTIVE_TECHNIQUES_KEY, payload, ttl_secs).await;
    if let Err(e) = result {
        warn!("Catalog cache write failed: {e}");
    }
}

/// Drops the cached catalog. Called after technique mutations so new entries
/// become visible before the TTL expires.
pub async fn invalidate_catalog(client: &redis::Client) {
    let mut conn = match client.get_multiplexed_async_connection().await {
        Ok(conn) => conn,
        Err(e) => {
            warn!("Catalog cache unavailable, skipping invalidation: {e}");
            return;
        }
    };

    let result: Result<(), _> = conn.del(ACTIVE_TECHNIQUES_KEY).await;
    if let Err(e) = result {
        warn!("Catalog cache invalidation failed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_cached_payload_round_trips() {
        let techniques = vec![TechniqueRow {
            id: Uuid::new_v4(),
            slug: "chain_of_thought".to_string(),
            name: "Chain of Thought".to_string(),
            category: "reasoning".to_string(),
            complexity_level: 3,
            base_effectiveness: 0.85,
            template: Some("Think step by step.\n\n{request}".to_string()),
            is_active: true,
            created_at: Utc::now(),
        }];

        let payload = serde_json::to_string(&techniques).unwrap();
        let recovered: Vec<TechniqueRow> = serde_json::from_str(&payload).unwrap();
        assert_eq!(recovered.len(), 1);
        assert_eq!(recovered[0].slug, "chain_of_thought");
        assert_eq!(recovered[0].complexity_level, 3);
    }

    #[test]
    fn test_cache_key_is_stable() {
        // The key is part of the operational contract (dashboards, manual DEL).
        assert_eq!(ACTIVE_TECHNIQUES_KEY, "catalog:techniques:active");
    }
}
