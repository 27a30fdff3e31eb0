// Technique recommender: ranks active catalog techniques for a classified
// intent and complexity, optionally personalized by the caller's favorites.
// The scoring arithmetic is pure and synchronous; selector.rs owns the
// orchestration against the catalog trait.

pub mod handlers;
pub mod scoring;
pub mod selector;
