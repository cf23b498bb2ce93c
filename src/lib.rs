//! Nomad Nav - skill-demand relocation matching engine
//!
//! This library matches a person's declared skills against synthetic per-city
//! demand scores and ranks candidate cities by a weighted blend of skill
//! match and geographic proximity. Rendering (table, map, graph) is the job
//! of an external collaborator that consumes the result set read-only.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{haversine_distance, DemandModel, Ranker, MAX_RESULTS};
pub use models::{
    City, ExpertiseLevel, MatchResult, RankedResults, RankingParams, Role, SessionState,
    SkillProfile, SKILL_TAXONOMY,
};
pub use services::{load_catalog, SessionStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let catalog = load_catalog(1_000_000).expect("embedded catalog loads");
        assert!(!catalog.is_empty());
        assert!(haversine_distance(0.0, 0.0, 0.0, 0.0) == 0.0);
    }
}
