use crate::models::domain::MatchResult;
use serde::{Deserialize, Serialize};

/// Response for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub results: Vec<MatchResult>,
    #[serde(rename = "totalConsidered")]
    pub total_considered: usize,
    pub returned: usize,
}

/// Catalog entry exposed at the rendering boundary (read-only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityView {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub population: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response after saving a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveSessionResponse {
    pub success: bool,
    pub name: String,
}
