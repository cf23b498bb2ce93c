// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    is_known_skill, City, DemandVector, ExpertiseLevel, MatchResult, ProfileError, RankedResults,
    RankingParams, Role, SessionState, SkillProfile, SKILL_TAXONOMY,
};
pub use requests::{AddSkillRequest, SetCityRequest, SetRoleRequest, SimulateRequest, SnapshotRequest};
pub use responses::{CityView, ErrorResponse, HealthResponse, SaveSessionResponse, SimulateResponse};
