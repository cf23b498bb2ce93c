use crate::core::demand::DemandModel;
use crate::core::distance::{haversine_distance, BoundingBox};
use crate::core::scoring::{overlap_pct, proximity_score, skill_score, total_score};
use crate::models::{City, MatchResult, RankedResults, RankingParams, SkillProfile};
use std::cmp::Ordering;

/// Hard cap on the size of a result set
pub const MAX_RESULTS: usize = 200;

/// Ranking orchestrator: scores every catalog city against the user's
/// profile and home location through a staged filter pipeline.
///
/// # Pipeline stages
/// 1. Home-city exclusion and bounding-box pre-filter
/// 2. Exact max-distance cut
/// 3. Zero-skill-score cut
/// 4. Minimum-overlap cut, then sort and truncate
#[derive(Debug, Clone)]
pub struct Ranker {
    params: RankingParams,
}

impl Ranker {
    pub fn new(params: RankingParams) -> Self {
        let mut params = params;
        params.w_skill = params.w_skill.clamp(0.0, 1.0);
        params.limit = params.limit.min(MAX_RESULTS);
        Self { params }
    }

    pub fn with_default_params() -> Self {
        Self::new(RankingParams::default())
    }

    pub fn params(&self) -> &RankingParams {
        &self.params
    }

    /// Rank all catalog cities against the home city and profile.
    ///
    /// Skipped (not errored): cities beyond the max distance, cities with no
    /// demand for any profile skill, cities below the overlap threshold.
    /// An empty result set is a valid outcome.
    pub fn rank(
        &self,
        home: &City,
        cities: &[City],
        profile: &SkillProfile,
        demand: &mut DemandModel,
    ) -> RankedResults {
        let home_label = home.label();
        let bbox = BoundingBox::around(home.latitude, home.longitude, self.params.max_distance_km);
        // The box does not wrap the antimeridian; fall back to exact
        // distances only when the radius pushes it out of range.
        let bbox_usable = bbox.min_lon > -180.0
            && bbox.max_lon < 180.0
            && bbox.min_lat > -90.0
            && bbox.max_lat < 90.0;

        let total_considered = cities.iter().filter(|c| c.label() != home_label).count();

        let mut results: Vec<MatchResult> = cities
            .iter()
            .filter(|city| city.label() != home_label)
            .filter(|city| !bbox_usable || bbox.contains(city.latitude, city.longitude))
            .filter_map(|city| {
                let distance_km = haversine_distance(
                    home.latitude,
                    home.longitude,
                    city.latitude,
                    city.longitude,
                );
                if distance_km > self.params.max_distance_km {
                    return None;
                }

                let skill = skill_score(profile, demand.vector_for(city));
                if skill == 0.0 {
                    return None;
                }

                let overlap = overlap_pct(skill, profile.len());
                if overlap < self.params.min_overlap_pct {
                    return None;
                }

                let proximity = proximity_score(distance_km);

                Some(MatchResult {
                    city_label: city.label(),
                    distance_km,
                    skill_score: skill,
                    proximity_score: proximity,
                    total_score: total_score(skill, proximity, self.params.w_skill),
                    overlap_pct: overlap,
                })
            })
            .collect();

        // Sort by total score (descending), then distance (ascending),
        // then label for a deterministic order
        results.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    a.distance_km
                        .partial_cmp(&b.distance_km)
                        .unwrap_or(Ordering::Equal)
                })
                .then_with(|| a.city_label.cmp(&b.city_label))
        });

        results.truncate(self.params.limit);

        RankedResults {
            results,
            total_considered,
        }
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_params()
    }
}
