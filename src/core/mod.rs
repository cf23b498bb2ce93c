// Core algorithm exports
pub mod demand;
pub mod distance;
pub mod ranker;
pub mod scoring;

pub use demand::{generate_demand, DemandModel};
pub use distance::{haversine_distance, BoundingBox};
pub use ranker::{Ranker, MAX_RESULTS};
pub use scoring::{overlap_pct, proximity_score, skill_score, total_score};
