use crate::models::{City, DemandVector, SKILL_TAXONOMY};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Multiplicative noise range applied to the population base
const NOISE_MIN: f64 = 0.7;
const NOISE_MAX: f64 = 1.3;

/// Demand scores are clamped to this range
const DEMAND_MIN: f64 = 0.1;
const DEMAND_MAX: f64 = 10.0;

/// Generate a synthetic demand vector for one city.
///
/// `base = population / 1_000_000`; every skill draws an independent uniform
/// noise factor in [0.7, 1.3] and the product is clamped to [0.1, 10.0].
/// This is the single source of "labor market" realism and is intentionally
/// crude; callers that need reproducibility must pass a seed.
///
/// A given seed is mixed with a hash of the city label, so one session-level
/// seed still produces distinct (but reproducible) vectors per city.
pub fn generate_demand(city: &City, taxonomy: &[&str], seed: Option<u64>) -> DemandVector {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(mix_seed(s, &city.label())),
        None => StdRng::from_os_rng(),
    };

    let base = city.population as f64 / 1_000_000.0;

    taxonomy
        .iter()
        .map(|skill| {
            let noise = rng.random_range(NOISE_MIN..=NOISE_MAX);
            let score = (base * noise).clamp(DEMAND_MIN, DEMAND_MAX);
            (skill.to_string(), score)
        })
        .collect()
}

fn mix_seed(seed: u64, label: &str) -> u64 {
    seed ^ label_hash(label)
}

/// FNV-1a over the label bytes. The mix must be stable across builds and
/// Rust releases so a saved seed replays the same market.
fn label_hash(label: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let mut hash = FNV_OFFSET;
    for byte in label.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Session-scoped demand source: generates a vector per city on first use
/// and caches it by label, so repeated simulation runs in one session see
/// the same market.
#[derive(Debug, Default)]
pub struct DemandModel {
    seed: Option<u64>,
    cache: HashMap<String, DemandVector>,
}

impl DemandModel {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            seed,
            cache: HashMap::new(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Demand vector for a city over the fixed taxonomy, cached per label
    pub fn vector_for(&mut self, city: &City) -> &DemandVector {
        let seed = self.seed;
        self.cache
            .entry(city.label())
            .or_insert_with(|| generate_demand(city, SKILL_TAXONOMY, seed))
    }

    /// Drop all cached vectors, e.g. when the seed changes between runs
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn cached_cities(&self) -> usize {
        self.cache.len()
    }
}
