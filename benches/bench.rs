// Criterion benchmarks for Nomad Nav

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nomad_nav::core::{generate_demand, DemandModel, Ranker};
use nomad_nav::models::{City, ExpertiseLevel, RankingParams, SkillProfile, SKILL_TAXONOMY};

fn synthetic_city(id: usize) -> City {
    City {
        name: format!("City{:04}", id),
        country_code: "XX".to_string(),
        latitude: -60.0 + (id as f64 * 0.37) % 120.0,
        longitude: -170.0 + (id as f64 * 0.73) % 340.0,
        population: 150_000 + (id as u64 * 37_000) % 12_000_000,
    }
}

fn bench_profile() -> SkillProfile {
    let mut profile = SkillProfile::new();
    profile.add("python", ExpertiseLevel::Advanced).unwrap();
    profile.add("devops", ExpertiseLevel::Intermediate).unwrap();
    profile.add("copywriting", ExpertiseLevel::Beginner).unwrap();
    profile
}

fn bench_haversine(c: &mut Criterion) {
    c.bench_function("haversine_distance", |b| {
        b.iter(|| {
            nomad_nav::core::haversine_distance(
                black_box(38.7223),
                black_box(-9.1393),
                black_box(41.1579),
                black_box(-8.6291),
            )
        });
    });
}

fn bench_demand_generation(c: &mut Criterion) {
    let city = synthetic_city(17);
    c.bench_function("generate_demand", |b| {
        b.iter(|| generate_demand(black_box(&city), black_box(SKILL_TAXONOMY), black_box(Some(42))));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let profile = bench_profile();
    let home = synthetic_city(0);
    let ranker = Ranker::new(RankingParams {
        max_distance_km: 10_000.0,
        min_overlap_pct: 0.0,
        w_skill: 0.6,
        limit: 200,
    });

    let mut group = c.benchmark_group("ranking");

    for city_count in [50, 200, 1000, 5000].iter() {
        let cities: Vec<City> = (1..=*city_count).map(synthetic_city).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", city_count),
            city_count,
            |b, _| {
                // Pre-warm the cache so the bench measures scoring, not RNG
                let mut demand = DemandModel::new(Some(42));
                for city in &cities {
                    demand.vector_for(city);
                }

                b.iter(|| {
                    ranker.rank(
                        black_box(&home),
                        black_box(&cities),
                        black_box(&profile),
                        &mut demand,
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_haversine, bench_demand_generation, bench_ranking);
criterion_main!(benches);
