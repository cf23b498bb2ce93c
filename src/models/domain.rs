use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Fixed skill taxonomy. Every skill in a profile must come from this list;
/// the demand model produces one score per entry for every city.
pub const SKILL_TAXONOMY: &[&str] = &[
    "python",
    "rust",
    "javascript",
    "data science",
    "machine learning",
    "devops",
    "graphic design",
    "ui/ux design",
    "copywriting",
    "digital marketing",
    "seo",
    "project management",
    "community management",
    "video editing",
    "translation",
    "accounting",
];

/// Check a skill name against the fixed taxonomy
pub fn is_known_skill(skill: &str) -> bool {
    SKILL_TAXONOMY.contains(&skill)
}

/// A city from the geographic reference dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub country_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
}

impl City {
    /// Display label, unique within the working set ("Lisbon, PT")
    pub fn label(&self) -> String {
        format!("{}, {}", self.name, self.country_code)
    }
}

/// Expertise level for a single skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpertiseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExpertiseLevel {
    /// The largest expertise weight, used to normalize overlap percentages
    pub const MAX_WEIGHT: f64 = 1.8;

    /// Fixed expertise weights; not user-editable
    pub fn weight(&self) -> f64 {
        match self {
            ExpertiseLevel::Beginner => 0.5,
            ExpertiseLevel::Intermediate => 1.0,
            ExpertiseLevel::Advanced => 1.8,
        }
    }
}

/// Errors from profile mutation
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("unknown skill '{0}': not in the skill taxonomy")]
    UnknownSkill(String),
}

/// The user's skills and expertise levels, keyed by skill name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    skills: BTreeMap<String, ExpertiseLevel>,
}

impl SkillProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a skill at the given level. Re-adding a skill updates its level.
    /// Skills outside the taxonomy are rejected without mutating the profile.
    pub fn add(&mut self, skill: &str, level: ExpertiseLevel) -> Result<(), ProfileError> {
        if !is_known_skill(skill) {
            return Err(ProfileError::UnknownSkill(skill.to_string()));
        }
        self.skills.insert(skill.to_string(), level);
        Ok(())
    }

    /// Remove a skill; returns true if it was present
    pub fn remove(&mut self, skill: &str) -> bool {
        self.skills.remove(skill).is_some()
    }

    pub fn level(&self, skill: &str) -> Option<ExpertiseLevel> {
        self.skills.get(skill).copied()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ExpertiseLevel)> {
        self.skills.iter()
    }

    pub fn skill_names(&self) -> Vec<String> {
        self.skills.keys().cloned().collect()
    }
}

/// Synthetic per-skill demand scores for one city, each in [0.1, 10.0]
pub type DemandVector = BTreeMap<String, f64>;

/// User role for the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Freelancer")]
    Freelancer,
    #[serde(rename = "Remote Project Lead")]
    RemoteProjectLead,
    #[serde(rename = "Community Organizer")]
    CommunityOrganizer,
}

/// Tunable parameters for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingParams {
    #[serde(rename = "maxDistanceKm")]
    pub max_distance_km: f64,
    #[serde(rename = "minOverlapPct")]
    pub min_overlap_pct: f64,
    /// Blend weight between skill match and proximity, in [0, 1]
    #[serde(rename = "wSkill")]
    pub w_skill: f64,
    pub limit: usize,
}

impl Default for RankingParams {
    fn default() -> Self {
        Self {
            max_distance_km: 5000.0,
            min_overlap_pct: 0.0,
            w_skill: 0.5,
            limit: crate::core::ranker::MAX_RESULTS,
        }
    }
}

/// One scored candidate city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(rename = "cityLabel")]
    pub city_label: String,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "skillScore")]
    pub skill_score: f64,
    #[serde(rename = "proximityScore")]
    pub proximity_score: f64,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
    #[serde(rename = "overlapPct")]
    pub overlap_pct: f64,
}

/// Output of one simulation run: ranked survivors plus how many cities
/// were considered before filtering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedResults {
    pub results: Vec<MatchResult>,
    #[serde(rename = "totalConsidered")]
    pub total_considered: usize,
}

/// The whole of a user's in-memory session. Passed explicitly into the
/// engine; replaced wholesale on snapshot load, never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub role: Option<Role>,
    pub profile: SkillProfile,
    #[serde(rename = "homeCity")]
    pub home_city: Option<String>,
    pub params: RankingParams,
    pub results: Option<Vec<MatchResult>>,
}

impl SessionState {
    /// Fresh empty session, same as "Reset Session"
    pub fn reset(&mut self) {
        *self = SessionState::default();
    }
}
