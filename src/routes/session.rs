use crate::config::MatchingSettings;
use crate::core::{DemandModel, Ranker};
use crate::models::{
    AddSkillRequest, City, CityView, ErrorResponse, HealthResponse, RankingParams,
    SaveSessionResponse, SessionState, SetCityRequest, SetRoleRequest, SimulateRequest,
    SimulateResponse, SnapshotRequest,
};
use crate::services::{find_city, SessionStore, SnapshotError};
use actix_web::{web, HttpResponse, Responder};
use std::sync::{Arc, Mutex, RwLock};
use validator::Validate;

/// Application state shared across all handlers.
///
/// One in-process session (the engine is single-user by design); the catalog
/// is immutable after startup and exposed read-only at the rendering boundary.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Vec<City>>,
    pub session: Arc<RwLock<SessionState>>,
    pub demand: Arc<Mutex<DemandModel>>,
    pub store: SessionStore,
    pub matching: MatchingSettings,
}

/// Configure all session/command routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/cities", web::get().to(list_cities))
        .route("/session", web::get().to(get_session))
        .route("/session/role", web::post().to(set_role))
        .route("/session/reset", web::post().to(reset_session))
        .route("/session/skills", web::post().to(add_skill))
        .route("/session/skills/{skill}", web::delete().to(remove_skill))
        .route("/session/city", web::post().to(set_city))
        .route("/session/save", web::post().to(save_session))
        .route("/session/load", web::post().to(load_session))
        .route("/session/snapshots", web::get().to(list_snapshots))
        .route("/simulate", web::post().to(run_simulation))
        .route("/results/export", web::get().to(export_results));
}

fn bad_request(error: &str, message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: 400,
    })
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: if state.catalog.is_empty() {
            "degraded".to_string()
        } else {
            "healthy".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Catalog labels plus coordinates for the external renderer (read-only)
async fn list_cities(state: web::Data<AppState>) -> impl Responder {
    let cities: Vec<CityView> = state
        .catalog
        .iter()
        .map(|c| CityView {
            label: c.label(),
            latitude: c.latitude,
            longitude: c.longitude,
            population: c.population,
        })
        .collect();

    HttpResponse::Ok().json(cities)
}

/// Current session state
async fn get_session(state: web::Data<AppState>) -> impl Responder {
    let session = state.session.read().unwrap_or_else(|e| e.into_inner());
    HttpResponse::Ok().json(session.clone())
}

/// Set the session role (starts the session)
async fn set_role(
    state: web::Data<AppState>,
    req: web::Json<SetRoleRequest>,
) -> impl Responder {
    let mut session = state.session.write().unwrap_or_else(|e| e.into_inner());
    session.role = Some(req.role);

    tracing::info!("Session role set to {:?}", req.role);
    HttpResponse::Ok().json(session.clone())
}

/// Reset the whole session, including the cached demand market
async fn reset_session(state: web::Data<AppState>) -> impl Responder {
    {
        let mut session = state.session.write().unwrap_or_else(|e| e.into_inner());
        session.reset();
    }
    state
        .demand
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .clear();

    tracing::info!("Session reset");
    HttpResponse::Ok().json(SessionState::default())
}

/// Add a skill to the profile. Skills outside the taxonomy are rejected
/// without touching the profile.
async fn add_skill(
    state: web::Data<AppState>,
    req: web::Json<AddSkillRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("validation_failed", errors.to_string());
    }

    let mut session = state.session.write().unwrap_or_else(|e| e.into_inner());
    match session.profile.add(&req.skill, req.level) {
        Ok(()) => {
            tracing::debug!("Added skill '{}' at {:?}", req.skill, req.level);
            HttpResponse::Ok().json(session.clone())
        }
        Err(e) => bad_request("invalid_profile", e.to_string()),
    }
}

/// Remove a skill from the profile
async fn remove_skill(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let skill = path.into_inner();
    let mut session = state.session.write().unwrap_or_else(|e| e.into_inner());

    if session.profile.remove(&skill) {
        HttpResponse::Ok().json(session.clone())
    } else {
        HttpResponse::NotFound().json(ErrorResponse {
            error: "skill_not_found".to_string(),
            message: format!("'{}' is not in the profile", skill),
            status_code: 404,
        })
    }
}

/// Set the home city by catalog label
async fn set_city(state: web::Data<AppState>, req: web::Json<SetCityRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("validation_failed", errors.to_string());
    }

    if find_city(&state.catalog, &req.city).is_none() {
        return bad_request(
            "unknown_city",
            format!("'{}' is not in the city catalog", req.city),
        );
    }

    let mut session = state.session.write().unwrap_or_else(|e| e.into_inner());
    session.home_city = Some(req.city.clone());

    tracing::info!("Home city set to {}", req.city);
    HttpResponse::Ok().json(session.clone())
}

/// Run one full simulation and replace the session's result set.
///
/// An empty result set is a valid outcome, not an error.
async fn run_simulation(
    state: web::Data<AppState>,
    req: web::Json<SimulateRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for simulate request: {:?}", errors);
        return bad_request("validation_failed", errors.to_string());
    }

    let home_label = {
        let session = state.session.read().unwrap_or_else(|e| e.into_inner());
        match &session.home_city {
            Some(label) => label.clone(),
            None => return bad_request("no_home_city", "Set a home city first".to_string()),
        }
    };

    let home = match find_city(&state.catalog, &home_label) {
        Some(city) => city.clone(),
        None => {
            return bad_request(
                "unknown_city",
                format!("Home city '{}' is not in the catalog", home_label),
            );
        }
    };

    // Configured [matching] defaults, overridden per request
    let defaults = state.matching.ranking_params();
    let params = RankingParams {
        max_distance_km: req.max_distance_km.unwrap_or(defaults.max_distance_km),
        min_overlap_pct: req.min_overlap_pct.unwrap_or(defaults.min_overlap_pct),
        w_skill: req.w_skill.unwrap_or(defaults.w_skill),
        limit: req.limit.unwrap_or(defaults.limit),
    };

    let profile = {
        let session = state.session.read().unwrap_or_else(|e| e.into_inner());
        session.profile.clone()
    };

    let ranked = {
        let mut demand = state.demand.lock().unwrap_or_else(|e| e.into_inner());
        // An explicit seed pins the market; regenerate when it changes
        if req.seed.is_some() && demand.seed() != req.seed {
            *demand = DemandModel::new(req.seed);
        }
        Ranker::new(params).rank(&home, &state.catalog, &profile, &mut demand)
    };

    tracing::info!(
        "Simulation from {}: {} matches out of {} cities considered",
        home_label,
        ranked.results.len(),
        ranked.total_considered
    );

    let mut session = state.session.write().unwrap_or_else(|e| e.into_inner());
    session.params = params;
    session.results = Some(ranked.results.clone());

    HttpResponse::Ok().json(SimulateResponse {
        returned: ranked.results.len(),
        total_considered: ranked.total_considered,
        results: ranked.results,
    })
}

/// Save the session to a named snapshot file
async fn save_session(
    state: web::Data<AppState>,
    req: web::Json<SnapshotRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("validation_failed", errors.to_string());
    }

    let session = state.session.read().unwrap_or_else(|e| e.into_inner());
    match state.store.save(&req.name, &session) {
        Ok(path) => {
            tracing::info!("Session saved as '{}' ({})", req.name, path.display());
            HttpResponse::Ok().json(SaveSessionResponse {
                success: true,
                name: req.name.clone(),
            })
        }
        Err(SnapshotError::InvalidName(name)) => {
            bad_request("invalid_name", format!("'{}' is not a valid session name", name))
        }
        Err(e) => {
            tracing::error!("Failed to save session '{}': {}", req.name, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "snapshot_save_failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Load a named snapshot, fully replacing the in-memory session.
/// On any failure the existing session is left untouched.
async fn load_session(
    state: web::Data<AppState>,
    req: web::Json<SnapshotRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("validation_failed", errors.to_string());
    }

    match state.store.load(&req.name) {
        Ok(loaded) => {
            let mut session = state.session.write().unwrap_or_else(|e| e.into_inner());
            *session = loaded;
            tracing::info!("Session '{}' loaded", req.name);
            HttpResponse::Ok().json(session.clone())
        }
        Err(e) => {
            tracing::warn!("Failed to load session '{}': {}", req.name, e);
            bad_request("snapshot_load_failed", e.to_string())
        }
    }
}

/// Names of all saved snapshots
async fn list_snapshots(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.store.list())
}

/// Download the last result set as CSV
async fn export_results(state: web::Data<AppState>) -> impl Responder {
    let results = {
        let session = state.session.read().unwrap_or_else(|e| e.into_inner());
        session.results.clone().unwrap_or_default()
    };

    match crate::services::to_csv_string(&results) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                "Content-Disposition",
                "attachment; filename=\"match_results.csv\"",
            ))
            .body(csv),
        Err(e) => {
            tracing::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "export_failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_shape() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
