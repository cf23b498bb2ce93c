use crate::models::{ExpertiseLevel, Role};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to set the session role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRoleRequest {
    pub role: Role,
}

/// Request to add (or re-level) a skill in the profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddSkillRequest {
    #[validate(length(min = 1))]
    pub skill: String,
    pub level: ExpertiseLevel,
}

/// Request to set the home city by catalog label ("Lisbon, PT")
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetCityRequest {
    #[validate(length(min = 1))]
    pub city: String,
}

/// Request to run one simulation over the whole catalog.
///
/// Tunables left out of the request fall back to the configured
/// `[matching]` defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SimulateRequest {
    #[validate(range(min = 0.0))]
    #[serde(alias = "max_distance_km", rename = "maxDistanceKm", default)]
    pub max_distance_km: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(alias = "min_overlap_pct", rename = "minOverlapPct", default)]
    pub min_overlap_pct: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    #[serde(alias = "w_skill", rename = "wSkill", default)]
    pub w_skill: Option<f64>,
    #[serde(default)]
    pub limit: Option<usize>,
    /// Optional demand seed for reproducible runs; omitted = fresh market
    #[serde(default)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_request_omitted_tunables_are_none() {
        let req: SimulateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.max_distance_km.is_none());
        assert!(req.min_overlap_pct.is_none());
        assert!(req.w_skill.is_none());
        assert!(req.limit.is_none());
        assert!(req.seed.is_none());
    }

    #[test]
    fn test_simulate_request_accepts_snake_case_aliases() {
        let req: SimulateRequest =
            serde_json::from_str(r#"{"max_distance_km": 2500.0, "w_skill": 0.8}"#).unwrap();
        assert_eq!(req.max_distance_km, Some(2500.0));
        assert_eq!(req.w_skill, Some(0.8));
    }
}

/// Request to save or load a named session snapshot
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SnapshotRequest {
    #[validate(length(min = 1))]
    pub name: String,
}
