use crate::models::{
    ExpertiseLevel, MatchResult, RankingParams, Role, SessionState, SkillProfile,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from session snapshot persistence. A failed load is recoverable
/// and leaves the caller's in-memory state untouched.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid session name '{0}'")]
    InvalidName(String),

    #[error("failed to load session snapshot: {0}")]
    LoadFailed(String),

    #[error("failed to serialize session snapshot: {0}")]
    Serialize(String),

    #[error("failed to write session snapshot: {0}")]
    WriteFailed(#[from] std::io::Error),
}

/// On-disk snapshot document: `{role, data: {...}, timestamp}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDoc {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub data: SnapshotData,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotData {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub expertise: BTreeMap<String, ExpertiseLevel>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub weights: Option<RankingParams>,
    #[serde(default)]
    pub results: Option<Vec<MatchResult>>,
}

/// Serialize a session into the snapshot document format
pub fn encode_snapshot(state: &SessionState) -> SnapshotDoc {
    SnapshotDoc {
        role: state.role,
        data: SnapshotData {
            skills: state.profile.skill_names(),
            expertise: state
                .profile
                .iter()
                .map(|(skill, level)| (skill.clone(), *level))
                .collect(),
            city: state.home_city.clone(),
            weights: Some(state.params),
            results: state.results.clone(),
        },
        timestamp: chrono::Utc::now(),
    }
}

/// Reconstruct a full replacement session from a snapshot document.
///
/// Missing optional fields fall back to defaults; a profile entry outside
/// the skill taxonomy makes the whole document malformed.
pub fn decode_snapshot(doc: &SnapshotDoc) -> Result<SessionState, SnapshotError> {
    let mut profile = SkillProfile::new();
    for (skill, level) in &doc.data.expertise {
        profile
            .add(skill, *level)
            .map_err(|e| SnapshotError::LoadFailed(e.to_string()))?;
    }

    Ok(SessionState {
        role: doc.role,
        profile,
        home_city: doc.data.city.clone(),
        params: doc.data.weights.unwrap_or_default(),
        results: doc.data.results.clone(),
    })
}

/// File-backed store for named session snapshots
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, SnapshotError> {
        if name.is_empty() || name.contains(['/', '\\', '.']) {
            return Err(SnapshotError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }

    /// Write the session to `<dir>/<name>.json`, replacing any previous
    /// snapshot of that name
    pub fn save(&self, name: &str, state: &SessionState) -> Result<PathBuf, SnapshotError> {
        let path = self.path_for(name)?;
        fs::create_dir_all(&self.dir)?;

        let doc = encode_snapshot(state);
        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| SnapshotError::Serialize(e.to_string()))?;
        fs::write(&path, json)?;

        tracing::debug!("Saved session snapshot '{}' to {}", name, path.display());
        Ok(path)
    }

    /// Read a snapshot back as a full replacement session. Any read or
    /// parse failure surfaces as `LoadFailed`; nothing is partially applied.
    pub fn load(&self, name: &str) -> Result<SessionState, SnapshotError> {
        let path = self.path_for(name)?;
        let raw = fs::read_to_string(&path)
            .map_err(|e| SnapshotError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        let doc: SnapshotDoc =
            serde_json::from_str(&raw).map_err(|e| SnapshotError::LoadFailed(e.to_string()))?;

        decode_snapshot(&doc)
    }

    /// Names of all snapshots currently on disk
    pub fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    path.file_stem().map(|s| s.to_string_lossy().into_owned())
                } else {
                    None
                }
            })
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> SessionState {
        let mut profile = SkillProfile::new();
        profile.add("python", ExpertiseLevel::Advanced).unwrap();
        profile.add("copywriting", ExpertiseLevel::Beginner).unwrap();

        SessionState {
            role: Some(Role::Freelancer),
            profile,
            home_city: Some("Lisbon, PT".to_string()),
            params: RankingParams {
                max_distance_km: 3000.0,
                min_overlap_pct: 10.0,
                w_skill: 0.7,
                limit: 50,
            },
            results: Some(vec![MatchResult {
                city_label: "Porto, PT".to_string(),
                distance_km: 274.0,
                skill_score: 1.2,
                proximity_score: 0.785,
                total_score: 1.07,
                overlap_pct: 33.3,
            }]),
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let state = sample_state();
        let decoded = decode_snapshot(&encode_snapshot(&state)).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_decode_defaults_missing_fields() {
        let raw = r#"{"timestamp": "2026-08-29T12:00:00Z"}"#;
        let doc: SnapshotDoc = serde_json::from_str(raw).unwrap();
        let state = decode_snapshot(&doc).unwrap();

        assert!(state.role.is_none());
        assert!(state.profile.is_empty());
        assert!(state.home_city.is_none());
        assert!(state.results.is_none());
    }

    #[test]
    fn test_decode_rejects_unknown_skill() {
        let raw = r#"{
            "data": {"expertise": {"necromancy": "Advanced"}},
            "timestamp": "2026-08-29T12:00:00Z"
        }"#;
        let doc: SnapshotDoc = serde_json::from_str(raw).unwrap();
        assert!(matches!(
            decode_snapshot(&doc),
            Err(SnapshotError::LoadFailed(_))
        ));
    }

    #[test]
    fn test_store_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());
        let state = sample_state();

        store.save("trip-planning", &state).unwrap();
        let loaded = store.load("trip-planning").unwrap();

        assert_eq!(loaded, state);
        assert_eq!(store.list(), vec!["trip-planning".to_string()]);
    }

    #[test]
    fn test_load_missing_snapshot_fails_recoverably() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path());

        assert!(matches!(
            store.load("never-saved"),
            Err(SnapshotError::LoadFailed(_))
        ));
    }

    #[test]
    fn test_load_malformed_snapshot_fails() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{not valid json").unwrap();
        let store = SessionStore::new(dir.path());

        assert!(matches!(
            store.load("broken"),
            Err(SnapshotError::LoadFailed(_))
        ));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let store = SessionStore::new("/tmp/sessions");
        assert!(matches!(
            store.load("../etc/passwd"),
            Err(SnapshotError::InvalidName(_))
        ));
        assert!(matches!(
            store.save("", &SessionState::default()),
            Err(SnapshotError::InvalidName(_))
        ));
    }
}
