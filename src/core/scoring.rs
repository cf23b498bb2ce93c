use crate::models::{DemandVector, ExpertiseLevel, SkillProfile};

/// Skill-match score of a profile against one city's demand vector.
///
/// `skill_score = Σ demand[s] * expertise_weight(s)` over the skills present
/// in both the profile and the demand vector. Skills the city has no demand
/// entry for contribute zero; an empty profile scores zero.
#[inline]
pub fn skill_score(profile: &SkillProfile, demand: &DemandVector) -> f64 {
    profile
        .iter()
        .filter_map(|(skill, level)| demand.get(skill).map(|d| d * level.weight()))
        .sum()
}

/// Normalized skill match relative to the theoretical maximum of
/// `|profile| * 1.8` (all skills Advanced, demand 1 each).
///
/// Kept exactly in this form for compatibility: it is an approximation, not
/// a true percentage, and exceeds 100 whenever demand values exceed 1.
#[inline]
pub fn overlap_pct(skill_score: f64, profile_size: usize) -> f64 {
    if profile_size == 0 {
        return 0.0;
    }
    skill_score / (profile_size as f64 * ExpertiseLevel::MAX_WEIGHT) * 100.0
}

/// Distance-decayed closeness score in (0, 1], monotonically decreasing
#[inline]
pub fn proximity_score(distance_km: f64) -> f64 {
    1.0 / (1.0 + distance_km / 1000.0)
}

/// Weighted blend of skill match and proximity, the ranking key.
/// `w_skill` is expected in [0, 1].
#[inline]
pub fn total_score(skill_score: f64, proximity_score: f64, w_skill: f64) -> f64 {
    w_skill * skill_score + (1.0 - w_skill) * proximity_score
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn profile_with(entries: &[(&str, ExpertiseLevel)]) -> SkillProfile {
        let mut profile = SkillProfile::new();
        for (skill, level) in entries {
            profile.add(skill, *level).unwrap();
        }
        profile
    }

    #[test]
    fn test_skill_score_single_advanced() {
        // Reference point: advanced python against demand 2.0
        let profile = profile_with(&[("python", ExpertiseLevel::Advanced)]);
        let mut demand = BTreeMap::new();
        demand.insert("python".to_string(), 2.0);

        let score = skill_score(&profile, &demand);
        assert!((score - 3.6).abs() < 1e-9, "Expected 3.6, got {}", score);
        assert!((overlap_pct(score, profile.len()) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_skill_score_empty_profile() {
        let profile = SkillProfile::new();
        let mut demand = BTreeMap::new();
        demand.insert("python".to_string(), 5.0);

        assert_eq!(skill_score(&profile, &demand), 0.0);
    }

    #[test]
    fn test_skill_missing_from_demand_contributes_zero() {
        let profile = profile_with(&[
            ("python", ExpertiseLevel::Intermediate),
            ("rust", ExpertiseLevel::Advanced),
        ]);
        let mut demand = BTreeMap::new();
        demand.insert("rust".to_string(), 1.5);

        let score = skill_score(&profile, &demand);
        assert!((score - 1.5 * 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_proximity_bounds() {
        assert_eq!(proximity_score(0.0), 1.0);

        let mut previous = proximity_score(0.0);
        for d in [1.0, 10.0, 100.0, 1000.0, 10_000.0, 20_000.0] {
            let score = proximity_score(d);
            assert!(score > 0.0 && score <= 1.0);
            assert!(score < previous, "proximity must strictly decrease");
            previous = score;
        }
    }

    #[test]
    fn test_total_score_blend() {
        // w_skill = 0 ignores the skill side entirely
        assert_eq!(total_score(42.0, 0.8, 0.0), 0.8);
        // w_skill = 1 ignores proximity
        assert_eq!(total_score(42.0, 0.8, 1.0), 42.0);
        // Halfway blend
        let blended = total_score(2.0, 0.5, 0.5);
        assert!((blended - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_overlap_zero_profile_size() {
        assert_eq!(overlap_pct(0.0, 0), 0.0);
    }
}
