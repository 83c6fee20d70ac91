use blueprint_scorer::{BlueprintScorer, ScorerConfig, ScoringContext};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_rank(c: &mut Criterion) {
    let scorer = BlueprintScorer::with_embedded_catalog(ScorerConfig::default()).unwrap();
    let ctx = ScoringContext::new("coral_forest")
        .with_species(["lizards", "foxes", "humans"])
        .with_current_buildings(["butcher", "lizard_house", "trappers_camp", "tavern"]);

    let shortlist: Vec<String> = ["cookhouse", "fox_house", "market"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let all: Vec<String> = scorer.catalog().buildings().iter().map(|b| b.id.clone()).collect();

    c.bench_function("score_single", |b| {
        b.iter(|| scorer.score(black_box("cookhouse"), black_box(&ctx)))
    });
    c.bench_function("rank_shortlist", |b| {
        b.iter(|| scorer.rank(black_box(&shortlist), black_box(&ctx)))
    });
    c.bench_function("rank_catalog_sequential", |b| {
        b.iter(|| scorer.rank(black_box(&all), black_box(&ctx)))
    });
    c.bench_function("rank_catalog_parallel", |b| {
        b.iter(|| scorer.rank_parallel(black_box(&all), black_box(&ctx)))
    });
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
